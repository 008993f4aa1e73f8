//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between
//! repositories and the HTTP controller.

mod contact_service;

pub use contact_service::{ContactService, ContactServiceImpl};
