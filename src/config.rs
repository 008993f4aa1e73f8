//! Configuration management for the contact manager.
//!
//! Configuration is read from environment variables, after loading a `.env`
//! file if one is present.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::net::SocketAddr;

/// Configuration for the contact manager.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file, or `:memory:` (default: "contacts.db")
    pub database_path: String,

    /// Address the HTTP server listens on (default: 127.0.0.1:8080)
    pub bind_address: SocketAddr,

    /// Page size used when a list request does not name one (default: 10)
    pub default_page_size: u32,

    /// Upper bound for requested page sizes (default: 100)
    pub max_page_size: u32,

    /// Log level used when `RUST_LOG` is not set (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `CONTACTS_DATABASE_PATH`: SQLite file path (default: "contacts.db")
    /// - `CONTACTS_BIND_ADDRESS`: listen address (default: "127.0.0.1:8080")
    /// - `DEFAULT_PAGE_SIZE`: default page size (default: 10)
    /// - `MAX_PAGE_SIZE`: maximum page size (default: 100)
    /// - `LOG_LEVEL`: logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is not an error
        let _ = dotenvy::dotenv();

        let defaults = Config::default();

        let database_path =
            env::var("CONTACTS_DATABASE_PATH").unwrap_or(defaults.database_path);
        if database_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "CONTACTS_DATABASE_PATH".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let bind_address = match env::var("CONTACTS_BIND_ADDRESS") {
            Ok(val) => val.parse::<SocketAddr>().map_err(|_| ConfigError::InvalidValue {
                var: "CONTACTS_BIND_ADDRESS".to_string(),
                reason: format!("Must be a socket address like 127.0.0.1:8080, got: {}", val),
            })?,
            Err(_) => defaults.bind_address,
        };

        let max_page_size = Self::parse_env_u32("MAX_PAGE_SIZE", defaults.max_page_size)?;
        if max_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                var: "MAX_PAGE_SIZE".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let default_page_size =
            Self::parse_env_u32("DEFAULT_PAGE_SIZE", defaults.default_page_size)?;
        if default_page_size == 0 || default_page_size > max_page_size {
            return Err(ConfigError::InvalidValue {
                var: "DEFAULT_PAGE_SIZE".to_string(),
                reason: format!("Must be between 1 and {}", max_page_size),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Config {
            database_path,
            bind_address,
            default_page_size,
            max_page_size,
            log_level,
        })
    }

    /// Parse an environment variable as u32 with a default value.
    fn parse_env_u32(var_name: &str, default: u32) -> ConfigResult<u32> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: "contacts.db".to_string(),
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8080)),
            default_page_size: 10,
            max_page_size: 100,
            log_level: "info".to_string(),
        }
    }
}
