//! WhatsApp Cloud API client library.
//!
//! This crate provides a Rust client for the WhatsApp Business (Cloud) API.
//! It supports:
//!
//! - Sending text messages through the Graph messages endpoint
//! - Decoding the webhook payloads Meta delivers for inbound messages and
//!   delivery status updates
//! - Surfacing provider errors verbatim (status code and diagnostic text)
//!
//! # Example
//!
//! ```no_run
//! use whatsapp_cloud::{CloudClient, CloudConfig};
//!
//! # async fn example() -> Result<(), whatsapp_cloud::CloudError> {
//! let config = CloudConfig::new("ACCESS_TOKEN", "123456789012345");
//! let client = CloudClient::new(config)?;
//!
//! let outcome = client.send_text("+971501234567", "Hello!").await?;
//! println!("Provider message id: {:?}", outcome.message_id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{CloudClient, SendOutcome};
pub use config::CloudConfig;
pub use error::CloudError;
pub use types::*;

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
