//! Error types for whatsapp-cloud.

use thiserror::Error;

/// Errors that can occur when interacting with the WhatsApp Cloud API.
#[derive(Debug, Error)]
pub enum CloudError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The provider rejected the request. `status` and `message` carry the
    /// provider's own HTTP status and diagnostic text, unmodified.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CloudError {
    /// The provider's HTTP status, when this error carries one.
    pub fn provider_status(&self) -> Option<u16> {
        match self {
            CloudError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
