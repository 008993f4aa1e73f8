//! Field-level input validation.
//!
//! Validation happens at the boundary, before a service is called. A
//! [`FieldValidator`] records at most one error per field so a form can show a
//! single annotation next to each input.

use super::email::EmailAddress;
use std::fmt;

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// A required value is missing or blank.
    Required,

    /// The value is longer than the field allows (counted in characters).
    TooLong { max: usize },

    /// The value is not a well-formed email address.
    InvalidEmail,
}

impl FieldErrorKind {
    /// Human readable text shown next to the form input.
    pub fn message(&self) -> String {
        match self {
            Self::Required => "may not be empty".to_string(),
            Self::TooLong { max } => format!("length must be between 0 and {}", max),
            Self::InvalidEmail => "not a well-formed email address".to_string(),
        }
    }
}

/// A rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name, as submitted by the client (e.g. `firstName`).
    pub field: &'static str,
    pub kind: FieldErrorKind,
}

/// Structured list of field errors produced by validating one form object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of rejected fields.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// The error recorded for `field`, if any.
    pub fn field_error(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|error| error.field == field)
    }

    /// Names of all rejected fields in the order they were checked.
    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|error| error.field).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    fn push(&mut self, field: &'static str, kind: FieldErrorKind) {
        if self.field_error(field).is_none() {
            self.errors.push(FieldError { field, kind });
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field error(s):", self.errors.len())?;
        for error in &self.errors {
            write!(f, " {} {};", error.field, error.kind.message())?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Accumulates field errors for one form object.
#[derive(Debug, Default)]
pub struct FieldValidator {
    errors: ValidationErrors,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value must be present, non-blank, and at most `max_length` characters.
    pub fn required(&mut self, field: &'static str, value: Option<&str>, max_length: usize) -> &mut Self {
        match non_blank(value) {
            None => self.errors.push(field, FieldErrorKind::Required),
            Some(value) => self.check_length(field, value, max_length),
        }
        self
    }

    /// Value may be absent; when present it must fit in `max_length` characters.
    pub fn optional(&mut self, field: &'static str, value: Option<&str>, max_length: usize) -> &mut Self {
        if let Some(value) = non_blank(value) {
            self.check_length(field, value, max_length);
        }
        self
    }

    /// Optional email: length is checked first, then the format.
    pub fn email(&mut self, field: &'static str, value: Option<&str>, max_length: usize) -> &mut Self {
        if let Some(value) = non_blank(value) {
            self.check_length(field, value, max_length);
            if !EmailAddress::is_valid(value) {
                self.errors.push(field, FieldErrorKind::InvalidEmail);
            }
        }
        self
    }

    /// Return `Ok(())` when no field was rejected.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    fn check_length(&mut self, field: &'static str, value: &str, max_length: usize) {
        if value.chars().count() > max_length {
            self.errors.push(field, FieldErrorKind::TooLong { max: max_length });
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
