//! Provider send abstraction.

use async_trait::async_trait;
use whatsapp_cloud::{CloudClient, CloudError, SendOutcome};

/// Trait for sending messages through the upstream provider.
///
/// Abstracted to support different transports (WhatsApp Cloud API, tests).
#[async_trait]
pub trait ProviderSend: Send + Sync {
    /// Send a text message.
    ///
    /// # Arguments
    /// * `to` - Destination in E.164 form
    /// * `body` - Message content
    async fn send_text(&self, to: &str, body: &str) -> Result<SendOutcome, CloudError>;
}

#[async_trait]
impl ProviderSend for CloudClient {
    async fn send_text(&self, to: &str, body: &str) -> Result<SendOutcome, CloudError> {
        CloudClient::send_text(self, to, body).await
    }
}
