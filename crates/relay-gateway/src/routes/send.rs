//! Outbound send endpoint.
//!
//! Validates and normalizes the destination, calls the provider, then
//! mirrors the sent message into the registry's dispatch path so the
//! originating UI sees its own message immediately instead of waiting for
//! the provider's status webhook round-trip.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::State;
use axum::Json;
use relay_core::{normalize_e164, RelayEvent};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{GatewayError, Result};
use crate::state::AppState;

/// Request body for `POST /send`.
#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub to: Option<String>,
    pub message: Option<String>,
    /// Caller-supplied message id, used for the local echo when present.
    pub id: Option<String>,
}

/// Successful send response.
#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub success: bool,
    /// The provider's raw response body.
    pub data: serde_json::Value,
}

/// Send a message through the provider and echo it to the live connection.
pub async fn send(
    State(state): State<AppState>,
    Json(request): Json<SendRequest>,
) -> Result<Json<SendResponse>> {
    let to = request
        .to
        .as_deref()
        .filter(|to| !to.is_empty())
        .ok_or(GatewayError::MissingField("to"))?;
    let message = request
        .message
        .as_deref()
        .filter(|message| !message.is_empty())
        .ok_or(GatewayError::MissingField("message"))?;

    let to = normalize_e164(to)?;

    // No retry here: the provider has its own delivery guarantees, and a
    // retry surface at this layer would double-send.
    let outcome = state.provider.send_text(&to, message).await?;

    // Optimistic local echo: caller id > provider id > local fallback. The
    // consuming UI reconciles this echo with the later status webhook by
    // message id, not arrival order.
    let echo_id = request
        .id
        .clone()
        .or_else(|| outcome.message_id.clone())
        .unwrap_or_else(local_message_id);
    let event = RelayEvent::outbound_echo(&echo_id, message, unix_timestamp());
    if let Err(err) = state.registry.dispatch(&to, event) {
        warn!(to = %to, error = %err, "outbound echo dispatch failed");
    }

    info!(to = %to, id = %echo_id, "outbound message sent");
    Ok(Json(SendResponse {
        success: true,
        data: outcome.raw,
    }))
}

/// Current unix time in seconds, as the string form events carry.
fn unix_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
        .to_string()
}

/// Timestamp-prefixed fallback id for when neither the caller nor the
/// provider supplied one.
fn local_message_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());
    format!("{}-{}", millis, Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use relay_core::{ChannelSink, ConnectionRegistry, PhoneError};
    use whatsapp_cloud::CloudError;

    use super::*;
    use crate::provider::testing::RecordingProvider;

    fn state_with(provider: RecordingProvider) -> AppState {
        AppState::new(
            Arc::new(ConnectionRegistry::new()),
            Arc::new(provider),
            "secret".to_string(),
        )
    }

    fn request(to: Option<&str>, message: Option<&str>, id: Option<&str>) -> SendRequest {
        SendRequest {
            to: to.map(String::from),
            message: message.map(String::from),
            id: id.map(String::from),
        }
    }

    #[tokio::test]
    async fn missing_to_is_rejected() {
        let err = send(
            State(state_with(RecordingProvider::default())),
            Json(request(None, Some("hello"), None)),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, GatewayError::MissingField("to")));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_message_is_rejected() {
        let err = send(
            State(state_with(RecordingProvider::default())),
            Json(request(Some("971501234567"), None, None)),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, GatewayError::MissingField("message")));
    }

    #[tokio::test]
    async fn invalid_destination_is_rejected() {
        let err = send(
            State(state_with(RecordingProvider::default())),
            Json(request(Some("abc"), Some("hello"), None)),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            GatewayError::InvalidPhone(PhoneError::InvalidFormat(_))
        ));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bare_digits_destination_is_normalized_for_the_provider() {
        let provider = Arc::new(RecordingProvider::default());
        let state = AppState::new(
            Arc::new(ConnectionRegistry::new()),
            provider.clone(),
            "secret".to_string(),
        );

        send(
            State(state),
            Json(request(Some("501234567"), Some("hello"), None)),
        )
        .await
        .unwrap();

        assert_eq!(provider.calls(), [("+501234567".to_string(), "hello".to_string())]);
    }

    #[tokio::test]
    async fn leading_zero_destination_fails_the_strict_pattern() {
        let err = send(
            State(state_with(RecordingProvider::default())),
            Json(request(Some("0501234567"), Some("hello"), None)),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, GatewayError::InvalidPhone(_)));
    }

    #[tokio::test]
    async fn echo_carries_caller_supplied_id() {
        let state = state_with(RecordingProvider::with_message_id("wamid.PROVIDER"));
        let (sink, mut events) = ChannelSink::channel();
        state
            .registry
            .register("971501234567", Box::new(sink))
            .unwrap();

        send(
            State(state),
            Json(request(Some("+971501234567"), Some("hello"), Some("local-7"))),
        )
        .await
        .unwrap();

        let event = events.try_recv().unwrap();
        assert_eq!(event.id, "local-7");
        assert_eq!(event.from, "me");
        assert_eq!(event.text, "hello");
        assert_eq!(event.status, None);
    }

    #[tokio::test]
    async fn echo_falls_back_to_provider_id() {
        let state = state_with(RecordingProvider::with_message_id("wamid.PROVIDER"));
        let (sink, mut events) = ChannelSink::channel();
        state
            .registry
            .register("971501234567", Box::new(sink))
            .unwrap();

        send(
            State(state),
            Json(request(Some("+971501234567"), Some("hello"), None)),
        )
        .await
        .unwrap();

        assert_eq!(events.try_recv().unwrap().id, "wamid.PROVIDER");
    }

    #[tokio::test]
    async fn echo_generates_timestamp_prefixed_id_as_last_resort() {
        let state = state_with(RecordingProvider::default());
        let (sink, mut events) = ChannelSink::channel();
        state
            .registry
            .register("971501234567", Box::new(sink))
            .unwrap();

        send(
            State(state),
            Json(request(Some("+971501234567"), Some("hello"), None)),
        )
        .await
        .unwrap();

        let event = events.try_recv().unwrap();
        let (prefix, _) = event.id.split_once('-').unwrap();
        assert!(prefix.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn echo_is_queued_when_no_connection_is_live() {
        let state = state_with(RecordingProvider::default());

        send(
            State(state.clone()),
            Json(request(Some("+971501234567"), Some("hello"), None)),
        )
        .await
        .unwrap();

        assert_eq!(state.registry.pending_count("+971501234567").unwrap(), 1);
    }

    #[tokio::test]
    async fn provider_failure_mirrors_its_status_and_skips_the_echo() {
        let state = state_with(RecordingProvider::failing(401));

        let err = send(
            State(state.clone()),
            Json(request(Some("+971501234567"), Some("hello"), None)),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            GatewayError::Provider(CloudError::Api { status: 401, .. })
        ));
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(state.registry.pending_count("+971501234567").unwrap(), 0);
    }

    #[tokio::test]
    async fn success_returns_raw_provider_body() {
        let response = send(
            State(state_with(RecordingProvider::with_message_id("wamid.X"))),
            Json(request(Some("+971501234567"), Some("hello"), None)),
        )
        .await
        .unwrap();

        assert!(response.0.success);
        assert_eq!(
            response.0.data,
            serde_json::json!({ "messages": [{ "id": "wamid.X" }] })
        );
    }
}
