//! Contact Manager - Main entry point

use anyhow::Result;
use contact_manager::repositories::{ContactRepository, SqliteContactRepository};
use contact_manager::server::{self, AppState, ContactController, DefaultMessageSource};
use contact_manager::services::{ContactService, ContactServiceImpl};
use contact_manager::{db, Config};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so LOG_LEVEL can seed the filter
    let config = Config::from_env();
    let log_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting Contact Manager with database: {}",
        config.database_path
    );

    let conn = db::open_db(&config.database_path)?;

    let repository = Arc::new(SqliteContactRepository::new(conn)) as Arc<dyn ContactRepository>;
    let service = Arc::new(ContactServiceImpl::new(repository)) as Arc<dyn ContactService>;
    let controller = ContactController::new(service, Arc::new(DefaultMessageSource::new()))
        .with_page_sizes(config.default_page_size, config.max_page_size);

    let app = server::router(AppState::new(controller));

    info!(
        "Page size: default {}, max {}",
        config.default_page_size, config.max_page_size
    );

    server::run_server(config.bind_address, app).await?;

    info!("Contact Manager shutdown complete");
    Ok(())
}
