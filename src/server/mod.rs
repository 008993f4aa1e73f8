//! HTTP server for the contact manager.
//!
//! Serves the HTML pages and the JSON list endpoints over axum.

pub mod controller;
pub mod handlers;
pub mod messages;
pub mod views;

pub use controller::ContactController;
pub use handlers::{router, AppState};
pub use messages::{DefaultMessageSource, MessageSource};

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// Run the HTTP server until Ctrl+C is received.
pub async fn run_server(bind_address: SocketAddr, app: Router) -> Result<()> {
    let listener = TcpListener::bind(bind_address).await?;
    info!(address = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
