//! Webhook payload types delivered by Meta.
//!
//! Payloads are an envelope of entries, each with changes, each with a value
//! that may carry inbound `messages` and/or delivery `statuses`. Every field
//! is tolerant (`#[serde(default)]`) so partial payloads still parse; the
//! provider retries aggressively on anything but a 200.

use serde::{Deserialize, Serialize};

/// Top-level webhook notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEnvelope {
    /// Always "whatsapp_business_account" for this product.
    #[serde(default)]
    pub object: String,

    /// Change entries, zero or more.
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

/// A single entry in the notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEntry {
    /// Business account id.
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub changes: Vec<WebhookChange>,
}

/// A change within an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookChange {
    /// Changed field, "messages" for everything this relay handles.
    #[serde(default)]
    pub field: String,

    #[serde(default)]
    pub value: Option<ChangeValue>,
}

/// The value payload carrying messages, statuses, and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeValue {
    #[serde(default)]
    pub messaging_product: String,

    #[serde(default)]
    pub metadata: Option<Metadata>,

    #[serde(default)]
    pub contacts: Vec<Contact>,

    /// Inbound messages, absent for status-only deliveries.
    #[serde(default)]
    pub messages: Vec<InboundMessage>,

    /// Delivery status updates for messages we sent.
    #[serde(default)]
    pub statuses: Vec<StatusUpdate>,
}

/// A single inbound message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Sender id, digits without a `+` (e.g. "971501234567").
    #[serde(default)]
    pub from: String,

    /// WhatsApp message id.
    #[serde(default)]
    pub id: String,

    /// Unix timestamp, seconds, as a string.
    #[serde(default)]
    pub timestamp: String,

    /// Message type: "text", "image", "audio", ...
    #[serde(default, rename = "type")]
    pub msg_type: String,

    /// Text content, present only when type = "text".
    #[serde(default)]
    pub text: Option<TextBody>,
}

/// Text content within a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBody {
    #[serde(default)]
    pub body: String,
}

/// A delivery status update for a message we sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// Id of the message the status refers to.
    #[serde(default)]
    pub id: String,

    /// "sent", "delivered", "read", "failed", or future values.
    #[serde(default)]
    pub status: String,

    /// Unix timestamp, seconds, as a string.
    #[serde(default)]
    pub timestamp: String,

    /// Recipient id, digits without a `+`.
    #[serde(default)]
    pub recipient_id: String,
}

/// Contact info accompanying inbound messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub wa_id: String,

    #[serde(default)]
    pub profile: Option<Profile>,
}

/// Profile info within a contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
}

/// Metadata about the receiving business number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub display_phone_number: String,

    #[serde(default)]
    pub phone_number_id: String,
}
