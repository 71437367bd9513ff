//! The relay event model.
//!
//! Every payload pushed to a live connection or held in a pending queue is a
//! [`RelayEvent`]: a snapshot of an inbound message, a delivery status
//! update, or the optimistic echo of an outbound send.

use serde::{Deserialize, Serialize};

/// Sender value for events that describe messages we sent ourselves.
pub const SELF_SENDER: &str = "me";

/// An event pushed to live connections, JSON-serialized on the wire.
///
/// `from` is a digits-only provider id for inbound messages and the literal
/// `"me"` for status updates and outbound echoes. `status` is the provider's
/// status string passed through verbatim (sent/delivered/read/failed today;
/// unknown values survive unchanged).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayEvent {
    /// Provider message id, caller-supplied id, or local fallback id.
    pub id: String,

    /// Digits-only sender id, or `"me"`.
    pub from: String,

    /// Message body; empty for status updates.
    pub text: String,

    /// Provider timestamp (unix seconds, as a string).
    pub timestamp: String,

    /// Delivery status for status updates; absent otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl RelayEvent {
    /// An inbound message parsed from a provider webhook `messages` entry.
    pub fn inbound(
        id: impl Into<String>,
        from: impl Into<String>,
        text: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            text: text.into(),
            timestamp: timestamp.into(),
            status: None,
        }
    }

    /// A delivery status update parsed from a provider webhook `statuses`
    /// entry. Status events describe messages we sent, so `from` is `"me"`.
    pub fn status_update(
        id: impl Into<String>,
        status: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from: SELF_SENDER.to_string(),
            text: String::new(),
            timestamp: timestamp.into(),
            status: Some(status.into()),
        }
    }

    /// The optimistic local echo of an outbound send, pushed before the
    /// provider's own status webhook arrives.
    pub fn outbound_echo(
        id: impl Into<String>,
        text: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from: SELF_SENDER.to_string(),
            text: text.into(),
            timestamp: timestamp.into(),
            status: None,
        }
    }
}
