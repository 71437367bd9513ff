//! Error types for relay-core.

use thiserror::Error;

/// Errors from phone number normalization.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhoneError {
    /// The input does not reduce to `+` followed by 1-15 digits, first 1-9.
    #[error("invalid phone number format: {0:?}")]
    InvalidFormat(String),
}

/// Errors from delivering an event to a live connection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SinkError {
    /// The connection's receiving half is gone.
    #[error("connection closed")]
    Closed,
}
