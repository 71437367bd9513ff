//! WhatsApp messaging relay gateway.
//!
//! Receives provider webhooks, relays events to live WebSocket clients keyed
//! by phone number, and sends outbound messages through the WhatsApp Cloud
//! API with an optimistic local echo.

mod config;
mod error;
mod provider;
mod routes;
mod state;

use std::sync::Arc;

use relay_core::ConnectionRegistry;
use tracing::info;
use whatsapp_cloud::CloudClient;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting relay gateway");

    // Provider client and the in-memory connection registry
    let client = CloudClient::new(config.cloud_config())?;
    let registry = Arc::new(ConnectionRegistry::new());

    // Build application state
    let state = AppState::new(registry, Arc::new(client), config.verify_token.clone());

    // Build router
    let app = routes::router().with_state(state);

    // Start server
    info!(addr = %config.addr, "Relay gateway listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
