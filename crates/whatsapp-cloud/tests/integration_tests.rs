//! Integration tests for whatsapp-cloud.
//!
//! These tests exercise the public API surface without a network. Tests that
//! hit the real Cloud API require WHATSAPP_ACCESS_TOKEN and
//! WHATSAPP_PHONE_NUMBER_ID in the environment and are ignored by default:
//!
//!   cargo test --test integration_tests -- --ignored

use std::env;

use whatsapp_cloud::{CloudClient, CloudConfig, WebhookEnvelope};

/// Helper to get live-test credentials from the environment.
fn live_config() -> Option<CloudConfig> {
    let token = env::var("WHATSAPP_ACCESS_TOKEN").ok()?;
    let phone_number_id = env::var("WHATSAPP_PHONE_NUMBER_ID").ok()?;
    Some(CloudConfig::new(token, phone_number_id))
}

mod config_tests {
    use super::*;

    #[test]
    fn test_messages_url_follows_api_base() {
        let config = CloudConfig::new("token", "123456789012345");
        assert_eq!(
            config.messages_url(),
            "https://graph.facebook.com/v18.0/123456789012345/messages"
        );

        let overridden = config.with_api_base("http://localhost:9000/v18.0");
        assert_eq!(
            overridden.messages_url(),
            "http://localhost:9000/v18.0/123456789012345/messages"
        );
    }

    #[test]
    fn test_client_requires_credentials() {
        assert!(CloudClient::new(CloudConfig::new("", "42")).is_err());
        assert!(CloudClient::new(CloudConfig::new("token", "")).is_err());
        assert!(CloudClient::new(CloudConfig::new("token", "42")).is_ok());
    }
}

mod webhook_tests {
    use super::*;

    #[test]
    fn test_mixed_notification_parses() {
        let payload = r#"{
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "BIZ",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "messages": [
                            { "from": "971501234567", "id": "m1", "timestamp": "1700000000",
                              "type": "text", "text": { "body": "hi" } }
                        ],
                        "statuses": [
                            { "id": "m0", "status": "read", "timestamp": "1699999999",
                              "recipient_id": "971501234567" }
                        ]
                    }
                }]
            }]
        }"#;

        let envelope: WebhookEnvelope = serde_json::from_str(payload).unwrap();
        let value = envelope.entry[0].changes[0].value.as_ref().unwrap();
        assert_eq!(value.messages.len(), 1);
        assert_eq!(value.statuses.len(), 1);
    }

    #[test]
    fn test_status_only_notification_parses() {
        let payload = r#"{
            "entry": [{ "changes": [{ "value": {
                "statuses": [{ "id": "m1", "status": "failed", "timestamp": "1700000000",
                               "recipient_id": "15551234" }]
            } }] }]
        }"#;

        let envelope: WebhookEnvelope = serde_json::from_str(payload).unwrap();
        let value = envelope.entry[0].changes[0].value.as_ref().unwrap();
        assert!(value.messages.is_empty());
        assert_eq!(value.statuses[0].status, "failed");
    }
}

mod live_tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires Cloud API credentials"]
    async fn test_send_text_to_self() {
        let _ = dotenvy::dotenv();
        let config = match live_config() {
            Some(config) => config,
            None => {
                eprintln!("Skipping: WHATSAPP_ACCESS_TOKEN / WHATSAPP_PHONE_NUMBER_ID not set");
                return;
            }
        };
        let recipient =
            env::var("WHATSAPP_TEST_RECIPIENT").expect("WHATSAPP_TEST_RECIPIENT not set");

        let client = CloudClient::new(config).unwrap();
        let outcome = client
            .send_text(&recipient, "integration test message")
            .await
            .unwrap();
        assert!(outcome.message_id.is_some());
    }
}
