//! Delivery sinks for live connections.

use tokio::sync::mpsc;

use crate::error::SinkError;
use crate::event::RelayEvent;

/// A handle to one live connection's outgoing half.
///
/// Delivery is fire-and-forget: `deliver` must not block on the underlying
/// transport. The registry checks `is_open` before attempting delivery and
/// queues the event when the sink reports closed.
///
/// This trait is object-safe and used as `Box<dyn EventSink>`.
pub trait EventSink: Send + Sync {
    /// Hand an event to the connection for transmission.
    fn deliver(&self, event: RelayEvent) -> Result<(), SinkError>;

    /// Whether the transport still has a receiving half.
    fn is_open(&self) -> bool;
}

/// The production sink: an unbounded channel drained by the per-connection
/// WebSocket task.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<RelayEvent>,
}

impl ChannelSink {
    /// Wrap an existing sender.
    pub fn new(tx: mpsc::UnboundedSender<RelayEvent>) -> Self {
        Self { tx }
    }

    /// Create a sink together with its receiving half.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RelayEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn deliver(&self, event: RelayEvent) -> Result<(), SinkError> {
        self.tx.send(event).map_err(|_| SinkError::Closed)
    }

    fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}
