//! Event types for the CueGate event system
//!
//! Provides shared event definitions and the EventBus used by the
//! playback gate host, its transport and its state store.

mod playback_types;

pub use playback_types::PlaybackState;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// CueGate event types
///
/// Events are broadcast via EventBus and can be serialized for SSE transmission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GateEvent {
    /// Transport state changed (Playing ↔ Paused)
    ///
    /// Emitted by the live engine only on an actual transition; repeated
    /// pause or play commands in the same state stay silent.
    PlaybackStateChanged {
        /// Transport state before change
        old_state: PlaybackState,
        /// Transport state after change
        new_state: PlaybackState,
        /// When state changed
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Transport position written (time or row)
    PositionChanged {
        /// Elapsed time, in the engine's unit
        current_time: f64,
        /// Index into the engine's row sequence
        current_row: u64,
        /// When the position was written
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Play permission flipped
    ///
    /// Broadcast by the state store after merging a patch that changed
    /// `can_play`.
    PermissionChanged {
        /// True iff no block reason is held
        can_play: bool,
        /// When the permission changed
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl GateEvent {
    /// Get event type as string for filtering and SSE event names
    pub fn event_type(&self) -> &'static str {
        match self {
            GateEvent::PlaybackStateChanged { .. } => "PlaybackStateChanged",
            GateEvent::PositionChanged { .. } => "PositionChanged",
            GateEvent::PermissionChanged { .. } => "PermissionChanged",
        }
    }
}

// ========================================
// EventBus Implementation
// ========================================

/// Central event distribution bus
///
/// The EventBus uses tokio::broadcast internally, providing:
/// - Non-blocking sends from synchronous code
/// - Any number of subscribers, each receiving every event emitted after it subscribed
/// - Bounded buffering (slow subscribers lag and lose the oldest events)
///
/// # Examples
///
/// ```
/// use cuegate_common::events::{EventBus, GateEvent};
/// use std::sync::Arc;
///
/// let event_bus = Arc::new(EventBus::new(100));
/// let mut rx = event_bus.subscribe();
///
/// event_bus.emit_lossy(GateEvent::PermissionChanged {
///     can_play: false,
///     timestamp: chrono::Utc::now(),
/// });
///
/// assert_eq!(rx.try_recv().unwrap().event_type(), "PermissionChanged");
/// ```
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<GateEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of events to buffer before dropping old events.
    ///   Must be greater than zero.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<GateEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists.
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: GateEvent,
    ) -> Result<usize, broadcast::error::SendError<GateEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: GateEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
