//! Live-connection registry and per-phone pending queues.
//!
//! The registry is the only shared mutable state in the relay. It maps
//! normalized phone numbers to live [`EventSink`]s and, for phones without a
//! live connection, to FIFO queues of undelivered events. It is an owned,
//! injectable component: construct it in `main` (or per test) and share it
//! behind an `Arc`.
//!
//! Every operation normalizes its phone argument with
//! [`normalize_e164`](crate::phone::normalize_e164) before touching the maps,
//! so the maps never contain or are queried with un-normalized keys.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::error::PhoneError;
use crate::event::RelayEvent;
use crate::phone::normalize_e164;
use crate::sink::EventSink;

/// Identifies one registered connection, for reverse lookup on close.
///
/// Ids are allocated monotonically and never reused, so a close event from a
/// connection that has since been replaced cannot evict its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

/// How a registration related to the phone's previous binding.
pub enum Binding {
    /// The phone had no live connection.
    Bound,
    /// The phone was already bound; last register wins and the previous
    /// sink is handed back so the caller can observe (and drop) it.
    Rebound(Box<dyn EventSink>),
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Bound => f.write_str("Bound"),
            Binding::Rebound(_) => f.write_str("Rebound"),
        }
    }
}

/// Result of a successful registration.
#[derive(Debug)]
pub struct Registration {
    /// Id to pass to [`ConnectionRegistry::unregister`] on close.
    pub id: ConnectionId,
    /// Bound fresh, or rebound over an existing connection.
    pub binding: Binding,
    /// Number of pending events drained into the new sink.
    pub drained: usize,
}

/// Outcome of a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Delivered to a live connection.
    Sent,
    /// No live connection (or delivery failed); appended to the phone's
    /// pending queue.
    Queued,
}

struct BoundConnection {
    id: ConnectionId,
    sink: Box<dyn EventSink>,
}

#[derive(Default)]
struct Inner {
    connections: HashMap<String, BoundConnection>,
    pending: HashMap<String, VecDeque<RelayEvent>>,
}

/// Process-wide mapping from normalized phone number to live connection,
/// with a per-phone FIFO queue for events that could not be delivered live.
///
/// Mutations are serialized by a mutex; the lock is never held across an
/// await point (sinks deliver without blocking). FIFO order is guaranteed
/// per phone only; there is no cross-phone ordering.
pub struct ConnectionRegistry {
    inner: Mutex<Inner>,
    next_id: AtomicU64,
}

impl ConnectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Bind a connection to a phone number, replacing any existing binding,
    /// then synchronously drain the phone's pending queue into it.
    ///
    /// The drain is best-effort: if the sink fails mid-drain, the
    /// undelivered remainder is put back at the front of the queue in its
    /// original order and the binding stays in place for a later retry.
    pub fn register(
        &self,
        phone: &str,
        sink: Box<dyn EventSink>,
    ) -> Result<Registration, PhoneError> {
        let key = normalize_e164(phone)?;
        let id = ConnectionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut inner = self.lock();

        let mut drained = 0;
        if let Some(mut queue) = inner.pending.remove(&key) {
            while let Some(event) = queue.pop_front() {
                match sink.deliver(event.clone()) {
                    Ok(()) => drained += 1,
                    Err(err) => {
                        warn!(
                            phone = %key,
                            error = %err,
                            remaining = queue.len() + 1,
                            "drain interrupted, re-queueing remainder"
                        );
                        queue.push_front(event);
                        break;
                    }
                }
            }
            if !queue.is_empty() {
                inner.pending.insert(key.clone(), queue);
            }
        }

        let previous = inner
            .connections
            .insert(key.clone(), BoundConnection { id, sink });

        let binding = match previous {
            Some(old) => {
                info!(phone = %key, drained, "live connection rebound");
                Binding::Rebound(old.sink)
            }
            None => {
                info!(phone = %key, drained, "live connection bound");
                Binding::Bound
            }
        };

        Ok(Registration { id, binding, drained })
    }

    /// Deliver an event to the phone's live connection, or queue it.
    ///
    /// A bound sink that reports closed, or that fails the delivery, is
    /// treated the same as no connection: the event lands in the pending
    /// queue and is flushed by the next successful `register`.
    pub fn dispatch(&self, phone: &str, event: RelayEvent) -> Result<Delivery, PhoneError> {
        let key = normalize_e164(phone)?;
        let mut inner = self.lock();

        if let Some(conn) = inner.connections.get(&key) {
            if conn.sink.is_open() {
                match conn.sink.deliver(event.clone()) {
                    Ok(()) => {
                        debug!(phone = %key, id = %event.id, "event delivered live");
                        return Ok(Delivery::Sent);
                    }
                    Err(err) => {
                        warn!(phone = %key, id = %event.id, error = %err, "live delivery failed, queueing");
                    }
                }
            } else {
                debug!(phone = %key, id = %event.id, "bound connection is closed, queueing");
            }
        }

        inner.pending.entry(key).or_default().push_back(event);
        Ok(Delivery::Queued)
    }

    /// Remove every phone binding held by the given connection.
    ///
    /// Returns the number of bindings removed. A stale id (the phone has
    /// since been rebound to a newer connection) removes nothing.
    pub fn unregister(&self, id: ConnectionId) -> usize {
        let mut inner = self.lock();
        let before = inner.connections.len();
        inner.connections.retain(|_, conn| conn.id != id);
        let removed = before - inner.connections.len();
        if removed > 0 {
            info!(connection = id.0, removed, "live connection unregistered");
        }
        removed
    }

    /// Depth of a phone's pending queue.
    pub fn pending_count(&self, phone: &str) -> Result<usize, PhoneError> {
        let key = normalize_e164(phone)?;
        Ok(self.lock().pending.get(&key).map_or(0, VecDeque::len))
    }

    /// Number of live bindings.
    pub fn connection_count(&self) -> usize {
        self.lock().connections.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock means a panic mid-mutation elsewhere; the maps are
        // still structurally sound, so keep serving rather than propagate.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
