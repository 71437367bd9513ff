//! Provider webhook ingress.
//!
//! Two entry points, no persisted state:
//!
//! - `GET /webhook` answers Meta's one-time verification handshake with the
//!   raw challenge string (not JSON-wrapped).
//! - `POST /webhook` fans the notification envelope out into relay events
//!   and always acks with 200 once parsing completes; a parse failure is a
//!   500 so the provider redelivers. Duplicate deliveries are re-dispatched
//!   as-is: dedup belongs to the persistence layer, not here.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use relay_core::{digits_only, ConnectionRegistry, RelayEvent};
use serde::Deserialize;
use tracing::{debug, info, warn};
use whatsapp_cloud::WebhookEnvelope;

use crate::error::Result;
use crate::state::AppState;

/// Fixed acknowledgement body for event deliveries.
pub const ACK_BODY: &str = "EVENT_RECEIVED";

/// Query parameters of the verification handshake.
#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,

    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,

    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Answer the provider's verification handshake.
///
/// 200 with the literal challenge on a subscribe request carrying the
/// configured secret; bare 403 otherwise.
pub async fn verify(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Response {
    let subscribed = params.mode.as_deref() == Some("subscribe");
    let token_matches = params.verify_token.as_deref() == Some(state.verify_token.as_str());

    if subscribed && token_matches {
        info!("webhook verification handshake accepted");
        (StatusCode::OK, params.challenge.unwrap_or_default()).into_response()
    } else {
        warn!(mode = ?params.mode, "webhook verification rejected");
        StatusCode::FORBIDDEN.into_response()
    }
}

/// Receive an event-delivery notification.
///
/// The body is parsed manually from raw bytes so a malformed payload maps to
/// 500 (provider retry) instead of an extractor's 4xx.
pub async fn receive(State(state): State<AppState>, body: Bytes) -> Result<&'static str> {
    let envelope: WebhookEnvelope = serde_json::from_slice(&body)?;
    let dispatched = process_envelope(&state.registry, &envelope);
    debug!(events = dispatched, "webhook notification processed");
    Ok(ACK_BODY)
}

/// Fan a notification envelope out into registry dispatches.
///
/// Inbound messages are keyed by the digits-only sender id; status updates
/// by the digits-only recipient id (their `from` is the literal `"me"`).
/// An id that fails E.164 normalization is logged and skipped so the
/// webhook still acks.
fn process_envelope(registry: &ConnectionRegistry, envelope: &WebhookEnvelope) -> usize {
    let mut dispatched = 0;

    for entry in &envelope.entry {
        for change in &entry.changes {
            let Some(value) = &change.value else { continue };

            for msg in &value.messages {
                let from = digits_only(&msg.from);
                let text = msg
                    .text
                    .as_ref()
                    .map(|t| t.body.clone())
                    // Non-text messages carry their type label as a placeholder.
                    .unwrap_or_else(|| msg.msg_type.clone());
                let event = RelayEvent::inbound(&msg.id, &from, text, &msg.timestamp);

                match registry.dispatch(&from, event) {
                    Ok(delivery) => {
                        dispatched += 1;
                        debug!(from = %from, id = %msg.id, ?delivery, "inbound message dispatched");
                    }
                    Err(err) => {
                        warn!(from = %msg.from, error = %err, "skipping inbound message with unusable sender id");
                    }
                }
            }

            for status in &value.statuses {
                let recipient = digits_only(&status.recipient_id);
                let event =
                    RelayEvent::status_update(&status.id, &status.status, &status.timestamp);

                match registry.dispatch(&recipient, event) {
                    Ok(delivery) => {
                        dispatched += 1;
                        debug!(recipient = %recipient, id = %status.id, ?delivery, "status update dispatched");
                    }
                    Err(err) => {
                        warn!(recipient = %status.recipient_id, error = %err, "skipping status with unusable recipient id");
                    }
                }
            }
        }
    }

    dispatched
}
