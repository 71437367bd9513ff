//! Request and response types for the messages endpoint.

use serde::{Deserialize, Serialize};

/// Request body for `POST /{phone_number_id}/messages`.
#[derive(Debug, Clone, Serialize)]
pub struct SendPayload {
    pub messaging_product: String,

    /// Destination in E.164 form.
    pub to: String,

    #[serde(rename = "type")]
    pub msg_type: String,

    pub text: TextPayload,
}

/// Text body for an outbound message.
#[derive(Debug, Clone, Serialize)]
pub struct TextPayload {
    pub body: String,
}

impl SendPayload {
    /// Create a text message payload.
    pub fn text(to: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            messaging_product: "whatsapp".to_string(),
            to: to.into(),
            msg_type: "text".to_string(),
            text: TextPayload { body: body.into() },
        }
    }
}

/// Successful response from the messages endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SendResponse {
    #[serde(default)]
    pub messaging_product: String,

    #[serde(default)]
    pub contacts: Vec<SendContact>,

    /// Accepted messages; the first carries the provider message id.
    #[serde(default)]
    pub messages: Vec<SentMessage>,
}

/// A contact echoed back by the send endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SendContact {
    #[serde(default)]
    pub input: String,

    #[serde(default)]
    pub wa_id: String,
}

/// An accepted message id.
#[derive(Debug, Clone, Deserialize)]
pub struct SentMessage {
    #[serde(default)]
    pub id: String,
}

/// Graph API error envelope returned on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

/// The error object inside the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,

    #[serde(default, rename = "type")]
    pub err_type: String,

    #[serde(default)]
    pub code: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_payload_serializes_to_provider_shape() {
        let payload = SendPayload::text("+971501234567", "hello");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "messaging_product": "whatsapp",
                "to": "+971501234567",
                "type": "text",
                "text": { "body": "hello" },
            })
        );
    }

    #[test]
    fn send_response_extracts_message_id() {
        let response: SendResponse = serde_json::from_value(serde_json::json!({
            "messaging_product": "whatsapp",
            "contacts": [{ "input": "+971501234567", "wa_id": "971501234567" }],
            "messages": [{ "id": "wamid.ABC" }]
        }))
        .unwrap();
        assert_eq!(response.messages[0].id, "wamid.ABC");
    }

    #[test]
    fn error_envelope_extracts_message() {
        let envelope: ErrorEnvelope = serde_json::from_value(serde_json::json!({
            "error": { "message": "Invalid parameter", "type": "OAuthException", "code": 100 }
        }))
        .unwrap();
        assert_eq!(envelope.error.unwrap().message, "Invalid parameter");
    }
}
