//! Configuration types for whatsapp-cloud.

/// Default Graph API base URL.
pub const DEFAULT_API_BASE: &str = "https://graph.facebook.com/v18.0";

/// Configuration for talking to the WhatsApp Cloud API.
#[derive(Clone)]
pub struct CloudConfig {
    /// Graph API base URL (e.g., "https://graph.facebook.com/v18.0").
    pub api_base: String,
    /// Permanent or system-user access token.
    pub access_token: String,
    /// The business phone number id messages are sent from.
    pub phone_number_id: String,
}

impl CloudConfig {
    /// Create a new configuration against the default Graph API base.
    pub fn new(access_token: impl Into<String>, phone_number_id: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            access_token: access_token.into(),
            phone_number_id: phone_number_id.into(),
        }
    }

    /// Override the Graph API base URL (alternate version, test server).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Get the messages endpoint URL for the configured phone number.
    pub fn messages_url(&self) -> String {
        format!("{}/{}/messages", self.api_base, self.phone_number_id)
    }
}

impl std::fmt::Debug for CloudConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudConfig")
            .field("api_base", &self.api_base)
            .field("access_token", &"[redacted]")
            .field("phone_number_id", &self.phone_number_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = CloudConfig::new("token", "123456789012345");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.phone_number_id, "123456789012345");
    }

    #[test]
    fn test_messages_url() {
        let config = CloudConfig::new("token", "123456789012345");
        assert_eq!(
            config.messages_url(),
            "https://graph.facebook.com/v18.0/123456789012345/messages"
        );
    }

    #[test]
    fn test_with_api_base() {
        let config =
            CloudConfig::new("token", "42").with_api_base("http://127.0.0.1:9000/v18.0");
        assert_eq!(config.messages_url(), "http://127.0.0.1:9000/v18.0/42/messages");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = CloudConfig::new("super-secret", "42");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
    }
}
