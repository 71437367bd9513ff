//! Core relay primitives: phone normalization, the relay event model, and
//! the live-connection registry with per-phone pending queues.
//!
//! This crate is transport-agnostic. The gateway binds WebSocket connections
//! to phone numbers through the [`EventSink`] trait; anything that can accept
//! a [`RelayEvent`] without blocking can act as a live connection.
//!
//! # Example
//!
//! ```
//! use relay_core::{ChannelSink, ConnectionRegistry, Delivery, RelayEvent};
//!
//! let registry = ConnectionRegistry::new();
//!
//! // No connection yet: the event is queued for later.
//! let event = RelayEvent::inbound("m1", "971501234567", "hi", "1700000000");
//! assert_eq!(registry.dispatch("971501234567", event).unwrap(), Delivery::Queued);
//!
//! // Registering drains the queue into the new connection, FIFO.
//! let (sink, mut events) = ChannelSink::channel();
//! let registration = registry.register("+971501234567", Box::new(sink)).unwrap();
//! assert_eq!(registration.drained, 1);
//! assert_eq!(events.try_recv().unwrap().id, "m1");
//! ```

pub mod error;
pub mod event;
pub mod phone;
pub mod registry;
pub mod sink;

pub use error::{PhoneError, SinkError};
pub use event::{RelayEvent, SELF_SENDER};
pub use phone::{digits_only, normalize_e164};
pub use registry::{Binding, ConnectionId, ConnectionRegistry, Delivery, Registration};
pub use sink::{ChannelSink, EventSink};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
