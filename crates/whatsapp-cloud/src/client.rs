//! WhatsApp Cloud API HTTP client.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, error, info};

use crate::config::CloudConfig;
use crate::error::CloudError;
use crate::types::send::{ErrorEnvelope, SendPayload, SendResponse};

/// Result of a successful send.
///
/// `raw` is the provider's response body untouched, so callers can forward
/// it verbatim; `message_id` is the first accepted message id, when present.
#[derive(Debug, Clone)]
pub struct SendOutcome {
    /// Provider-assigned message id.
    pub message_id: Option<String>,
    /// The raw response body.
    pub raw: serde_json::Value,
}

/// Client for the WhatsApp Cloud API messages endpoint.
#[derive(Clone)]
pub struct CloudClient {
    http: Client,
    config: CloudConfig,
}

impl CloudClient {
    /// Build a client for the given configuration.
    pub fn new(config: CloudConfig) -> Result<Self, CloudError> {
        if config.access_token.is_empty() {
            return Err(CloudError::Config("access token is empty".to_string()));
        }
        if config.phone_number_id.is_empty() {
            return Err(CloudError::Config("phone number id is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(CloudError::Http)?;

        info!(api_base = %config.api_base, "WhatsApp Cloud client ready");
        Ok(Self { http, config })
    }

    /// Send a text message to a recipient.
    ///
    /// `to` must already be in E.164 form; this layer does not normalize.
    /// Provider rejections come back as [`CloudError::Api`] carrying the
    /// provider's status code and diagnostic text unmodified. No retries:
    /// the provider has its own delivery guarantees, and retrying here
    /// would double-send.
    pub async fn send_text(&self, to: &str, body: &str) -> Result<SendOutcome, CloudError> {
        let url = self.config.messages_url();
        let payload = SendPayload::text(to, body);

        debug!(to = %to, "sending text message");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(&payload)
            .send()
            .await
            .map_err(CloudError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body_text)
                .ok()
                .and_then(|envelope| envelope.error)
                .map(|err| err.message)
                .filter(|msg| !msg.is_empty())
                .unwrap_or(body_text);
            error!(status = status.as_u16(), message = %message, "provider rejected send");
            return Err(CloudError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: serde_json::Value = response.json().await.map_err(CloudError::Http)?;
        let parsed: SendResponse = serde_json::from_value(raw.clone())?;
        let message_id = parsed
            .messages
            .first()
            .map(|msg| msg.id.clone())
            .filter(|id| !id.is_empty());

        debug!(to = %to, id = ?message_id, "message accepted by provider");
        Ok(SendOutcome { message_id, raw })
    }

    /// Get the configuration.
    pub fn config(&self) -> &CloudConfig {
        &self.config
    }
}

impl std::fmt::Debug for CloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudClient")
            .field("config", &self.config)
            .finish()
    }
}
