//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use whatsapp_cloud::CloudConfig;

/// Relay gateway configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// WhatsApp Cloud API access token.
    pub access_token: String,
    /// Business phone number id messages are sent from.
    pub phone_number_id: String,
    /// Secret the provider echoes during webhook verification.
    pub verify_token: String,
    /// Graph API base URL.
    pub api_base: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `RELAY_ADDR` | Server bind address | `127.0.0.1:8787` |
    /// | `WHATSAPP_ACCESS_TOKEN` | Cloud API access token | (required) |
    /// | `WHATSAPP_PHONE_NUMBER_ID` | Business phone number id | (required) |
    /// | `WHATSAPP_VERIFY_TOKEN` | Webhook verification secret | (required) |
    /// | `GRAPH_API_BASE` | Graph API base URL | Graph v18.0 |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("RELAY_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8787".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let access_token = env::var("WHATSAPP_ACCESS_TOKEN")
            .map_err(|_| ConfigError::MissingAccessToken)?;

        let phone_number_id = env::var("WHATSAPP_PHONE_NUMBER_ID")
            .map_err(|_| ConfigError::MissingPhoneNumberId)?;

        let verify_token = env::var("WHATSAPP_VERIFY_TOKEN")
            .map_err(|_| ConfigError::MissingVerifyToken)?;

        let api_base = env::var("GRAPH_API_BASE")
            .unwrap_or_else(|_| whatsapp_cloud::config::DEFAULT_API_BASE.to_string());

        Ok(Self {
            addr,
            access_token,
            phone_number_id,
            verify_token,
            api_base,
        })
    }

    /// Build the provider client configuration.
    pub fn cloud_config(&self) -> CloudConfig {
        CloudConfig::new(&self.access_token, &self.phone_number_id)
            .with_api_base(&self.api_base)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid RELAY_ADDR format")]
    InvalidAddr,

    #[error("WHATSAPP_ACCESS_TOKEN environment variable is required")]
    MissingAccessToken,

    #[error("WHATSAPP_PHONE_NUMBER_ID environment variable is required")]
    MissingPhoneNumberId,

    #[error("WHATSAPP_VERIFY_TOKEN environment variable is required")]
    MissingVerifyToken,
}
