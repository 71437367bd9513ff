//! Error types for the relay gateway.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use relay_core::PhoneError;
use thiserror::Error;
use whatsapp_cloud::CloudError;

/// Errors surfaced by the gateway's HTTP handlers.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required request field was absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The destination failed E.164 normalization.
    #[error(transparent)]
    InvalidPhone(#[from] PhoneError),

    /// The provider rejected the send; its status and message pass through.
    #[error("provider error: {0}")]
    Provider(#[from] CloudError),

    /// The webhook body did not parse. Surfaced as 500 so the provider's
    /// retry mechanism redelivers.
    #[error("webhook parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::MissingField(field) => {
                tracing::warn!(field, "request rejected: missing field");
                let body =
                    serde_json::json!({ "error": format!("missing required field: {field}") });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            GatewayError::InvalidPhone(err) => {
                tracing::warn!(error = %err, "request rejected: bad phone number");
                let body = serde_json::json!({ "error": err.to_string() });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            GatewayError::Provider(CloudError::Api { status, message }) => {
                tracing::error!(status, message = %message, "provider error");
                let status = StatusCode::from_u16(status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let body = serde_json::json!({ "success": false, "error": message });
                (status, Json(body)).into_response()
            }
            GatewayError::Provider(err) => {
                tracing::error!(error = %err, "provider request failed");
                let body = serde_json::json!({ "success": false, "error": err.to_string() });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
            GatewayError::Parse(err) => {
                tracing::error!(error = %err, "webhook body did not parse");
                let body = serde_json::json!({ "error": err.to_string() });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

/// Result type for gateway handlers.
pub type Result<T> = std::result::Result<T, GatewayError>;
