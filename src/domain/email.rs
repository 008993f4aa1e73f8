//! Email address format.
//!
//! Contacts store the address as entered; this type only guards the format
//! used by form validation.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// One '@', a non-empty local part, and a domain without empty labels.
/// Single-label domains such as `user@localhost` are accepted.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)*$").expect("email pattern is a valid regex")
});

/// A well-formed email address.
///
/// ```
/// use contact_manager::domain::EmailAddress;
///
/// let email: EmailAddress = "foo.bar@bar.com".parse().unwrap();
/// assert_eq!(email.as_str(), "foo.bar@bar.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();
        if Self::is_valid(&email) {
            Ok(Self(email))
        } else {
            Err(ValidationError::InvalidEmail(email))
        }
    }

    /// Format check used by [`FieldValidator::email`](super::FieldValidator::email).
    pub fn is_valid(email: &str) -> bool {
        EMAIL_PATTERN.is_match(email)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for EmailAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
