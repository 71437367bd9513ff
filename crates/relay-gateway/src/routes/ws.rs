//! Live WebSocket connections.
//!
//! A client opens the socket and binds it to a phone number by sending a
//! JSON control frame `{ "phoneNumber": "+9715..." }`. Binding is silent
//! (no acknowledgement) and repeatable: a later control frame binds the
//! same socket under an additional key. Relay events arrive unsolicited as
//! JSON-serialized `RelayEvent`s.
//!
//! Liveness: the server pings on an interval and closes a connection that
//! has produced no frame for two full intervals, so silently dead
//! transports are reaped instead of lingering until the next rebind.

use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use relay_core::{Binding, ChannelSink, ConnectionId};
use serde::Deserialize;
use tokio::time::{interval, Instant};
use tracing::{debug, error, info, warn};

use crate::state::AppState;

const PING_INTERVAL: Duration = Duration::from_secs(30);

/// A connection silent for two ping intervals is considered dead.
const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Control frame binding this socket to a phone number.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BindFrame {
    phone_number: String,
}

/// Upgrade the HTTP connection and spawn the per-connection handler.
pub async fn upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let (sink, mut events) = ChannelSink::channel();
    let mut bindings: Vec<ConnectionId> = Vec::new();
    let mut last_seen = Instant::now();
    let mut ping = interval(PING_INTERVAL);

    debug!("websocket connection opened");

    loop {
        tokio::select! {
            // Registry → client: push relay events as JSON text frames.
            Some(event) = events.recv() => {
                match serde_json::to_string(&event) {
                    Ok(json) => {
                        if socket.send(Message::Text(json)).await.is_err() {
                            break;
                        }
                    }
                    Err(err) => error!(id = %event.id, error = %err, "failed to serialize relay event"),
                }
            }

            // Client → server: control frames and keepalive traffic.
            frame = socket.recv() => {
                let Some(Ok(frame)) = frame else { break };
                last_seen = Instant::now();
                match frame {
                    Message::Text(text) => bind_from_frame(&text, &state, &sink, &mut bindings),
                    Message::Close(_) => break,
                    Message::Ping(_) | Message::Pong(_) | Message::Binary(_) => {}
                }
            }

            _ = ping.tick() => {
                if last_seen.elapsed() > IDLE_TIMEOUT {
                    info!("closing idle websocket connection");
                    break;
                }
                if socket.send(Message::Ping(Vec::new())).await.is_err() {
                    break;
                }
            }
        }
    }

    for id in bindings {
        state.registry.unregister(id);
    }
    debug!("websocket connection closed");
}

/// Handle one inbound text frame.
///
/// Frames that are not bind requests are ignored with a debug line;
/// registration itself is silent toward the client either way.
fn bind_from_frame(
    text: &str,
    state: &AppState,
    sink: &ChannelSink,
    bindings: &mut Vec<ConnectionId>,
) {
    let frame: BindFrame = match serde_json::from_str(text) {
        Ok(frame) => frame,
        Err(err) => {
            debug!(error = %err, "ignoring unrecognized control frame");
            return;
        }
    };

    match state.registry.register(&frame.phone_number, Box::new(sink.clone())) {
        Ok(registration) => {
            bindings.push(registration.id);
            match registration.binding {
                Binding::Bound => {
                    info!(
                        phone = %frame.phone_number,
                        drained = registration.drained,
                        "websocket bound to phone"
                    );
                }
                // Last register wins; the replaced sink is dropped here and
                // its socket simply stops receiving events.
                Binding::Rebound(_) => {
                    info!(
                        phone = %frame.phone_number,
                        drained = registration.drained,
                        "websocket rebound, previous connection detached"
                    );
                }
            }
        }
        Err(err) => {
            warn!(phone = %frame.phone_number, error = %err, "rejected websocket binding");
        }
    }
}
