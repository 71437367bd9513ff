//! Route handlers for the relay gateway.

pub mod health;
pub mod send;
pub mod webhook;
pub mod ws;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Provider webhook: verification handshake + event delivery
        .route("/webhook", get(webhook::verify).post(webhook::receive))
        // Outbound send
        .route("/send", post(send::send))
        // Live connection registration
        .route("/ws", get(ws::upgrade))
        // Health check
        .route("/health", get(health::health))
}
