//! Wire types for the WhatsApp Cloud API.

pub mod send;
pub mod webhook;

pub use send::{ErrorBody, ErrorEnvelope, SendPayload, SendResponse, SentMessage, TextPayload};
pub use webhook::{
    ChangeValue, Contact, InboundMessage, Metadata, Profile, StatusUpdate, TextBody,
    WebhookChange, WebhookEntry, WebhookEnvelope,
};
