//! Test doubles shared by the integration tests.

mod mock_contact_repository;
mod mock_contact_service;
mod mock_message_source;

#[allow(unused_imports)]
pub use mock_contact_repository::MockContactRepository;
#[allow(unused_imports)]
pub use mock_contact_service::{Answer, MockContactService};
#[allow(unused_imports)]
pub use mock_message_source::RecordingMessageSource;
