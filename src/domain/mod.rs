//! Domain value objects and validation.
//!
//! This module contains type-safe wrappers for domain concepts like contact
//! IDs and email addresses, plus the field-level validation used at the form
//! boundary before any service is called.

pub mod contact_id;
pub mod email;
pub mod errors;
pub mod validation;

pub use contact_id::ContactId;
pub use email::EmailAddress;
pub use errors::ValidationError;
pub use validation::{FieldError, FieldErrorKind, FieldValidator, ValidationErrors};
