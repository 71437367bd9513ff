//! Application state shared across handlers.

use std::sync::Arc;

use relay_core::ConnectionRegistry;

use crate::provider::ProviderSend;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Live connections and pending queues.
    pub registry: Arc<ConnectionRegistry>,
    /// Upstream provider for outbound sends.
    pub provider: Arc<dyn ProviderSend>,
    /// Webhook verification secret.
    pub verify_token: String,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        provider: Arc<dyn ProviderSend>,
        verify_token: String,
    ) -> Self {
        Self {
            registry,
            provider,
            verify_token,
        }
    }
}
