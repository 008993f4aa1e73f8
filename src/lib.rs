//! Contact Manager - a small web application for keeping a list of contacts.
//!
//! Contacts are stored in SQLite and managed through server-rendered HTML
//! forms and a JSON list/search API.
//!
//! # Architecture
//!
//! - **domain**: Validated value types and form field validation
//! - **models**: Contact entity, address, paging and boundary DTOs
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **db**: SQLite connection bootstrap and schema migrations
//! - **repositories**: Contact persistence with optimistic locking
//! - **services**: Transactional contact operations
//! - **server**: Controller, HTML views and axum routes

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;

pub use config::Config;
pub use domain::{ContactId, EmailAddress, ValidationErrors};
pub use error::{ConfigError, ContactError, ContactResult, DbError};
pub use models::{Address, Contact, ContactDto, ContactListDto, PageRequest, SearchDto};
pub use repositories::{ContactRepository, SqliteContactRepository};
pub use server::{AppState, ContactController, DefaultMessageSource, MessageSource};
pub use services::{ContactService, ContactServiceImpl};
