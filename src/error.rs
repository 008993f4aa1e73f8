//! Error types for the contact manager.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Field validation errors live in [`crate::domain::validation`]; they never reach the
//! service layer.

use crate::domain::ContactId;
use thiserror::Error;

/// Errors returned by contact repositories and the contact service.
#[derive(Error, Debug)]
pub enum ContactError {
    /// No contact exists with the requested identifier
    #[error("No contact found with id: {0}")]
    NotFound(String),

    /// The contact was modified by someone else since it was read
    #[error("Contact {id} was modified concurrently (expected version {expected}, found {actual})")]
    ConcurrencyConflict {
        id: ContactId,
        expected: i64,
        actual: i64,
    },

    /// A persisted row could not be mapped back to a contact
    #[error("Invalid persisted contact data: {0}")]
    InvalidData(String),

    /// The underlying SQLite call failed
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl ContactError {
    /// NotFound for a concrete identifier.
    pub fn not_found(id: ContactId) -> Self {
        Self::NotFound(id.to_string())
    }
}

/// Errors that can occur while opening and migrating the database.
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLite refused to open or migrate the database
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The database was written by a newer version of this application
    #[error("Database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion { db_version: u32, latest_supported: u32 },
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with ContactError
pub type ContactResult<T> = Result<T, ContactError>;

/// Convenience type alias for Results with DbError
pub type DbResult<T> = Result<T, DbError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
