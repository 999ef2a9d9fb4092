//! Live engine interface and in-memory transport
//!
//! **Responsibilities:**
//! - `LiveEngine`: the transport commands the playback gate relays
//! - `TransportEngine`: a transport that tracks play state and position and
//!   reports changes on the event bus

use cuegate_common::events::{EventBus, GateEvent, PlaybackState};
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Transport a playback gate drives
///
/// Every command is fire-and-forget: it cannot fail from the caller's point
/// of view and the engine may complete the transition asynchronously.
pub trait LiveEngine: Send + Sync {
    /// Stop advancing; no-op if already paused
    fn pause(&self);

    /// Start advancing; no-op if already playing
    fn play(&self);

    /// Write the elapsed time, in the engine's unit
    fn set_current_time(&self, position: f64);

    /// Write the row index
    fn set_current_row(&self, index: u64);
}

impl<T: LiveEngine + ?Sized> LiveEngine for Arc<T> {
    fn pause(&self) {
        (**self).pause()
    }

    fn play(&self) {
        (**self).play()
    }

    fn set_current_time(&self, position: f64) {
        (**self).set_current_time(position)
    }

    fn set_current_row(&self, index: u64) {
        (**self).set_current_row(index)
    }
}

/// Point-in-time view of a transport
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransportSnapshot {
    pub state: PlaybackState,
    pub current_time: f64,
    pub current_row: u64,
}

#[derive(Debug)]
struct TransportInner {
    state: PlaybackState,
    current_time: f64,
    current_row: u64,
}

/// In-memory transport
///
/// Starts paused at time 0.0, row 0. State transitions are broadcast as
/// `PlaybackStateChanged`, position writes as `PositionChanged`.
pub struct TransportEngine {
    inner: RwLock<TransportInner>,
    events: Arc<EventBus>,
}

impl TransportEngine {
    pub fn new(events: Arc<EventBus>) -> Self {
        Self {
            inner: RwLock::new(TransportInner {
                state: PlaybackState::Paused,
                current_time: 0.0,
                current_row: 0,
            }),
            events,
        }
    }

    pub fn snapshot(&self) -> TransportSnapshot {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        TransportSnapshot {
            state: inner.state,
            current_time: inner.current_time,
            current_row: inner.current_row,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.snapshot().state
    }

    fn transition(&self, new_state: PlaybackState) {
        let old_state = {
            let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut inner.state, new_state)
        };

        if old_state == new_state {
            debug!("Transport already {}", new_state);
            return;
        }

        info!("Transport state changed: {} -> {}", old_state, new_state);
        self.events.emit_lossy(GateEvent::PlaybackStateChanged {
            old_state,
            new_state,
            timestamp: cuegate_common::time::now(),
        });
    }

    fn emit_position(&self) {
        let snapshot = self.snapshot();
        self.events.emit_lossy(GateEvent::PositionChanged {
            current_time: snapshot.current_time,
            current_row: snapshot.current_row,
            timestamp: cuegate_common::time::now(),
        });
    }
}

impl LiveEngine for TransportEngine {
    fn pause(&self) {
        self.transition(PlaybackState::Paused);
    }

    fn play(&self) {
        self.transition(PlaybackState::Playing);
    }

    fn set_current_time(&self, position: f64) {
        let position = if position.is_finite() && position >= 0.0 {
            position
        } else {
            warn!("Rejecting transport time {}, clamping to 0.0", position);
            0.0
        };

        self.inner.write().unwrap_or_else(PoisonError::into_inner).current_time = position;
        debug!("Transport time set to {}", position);
        self.emit_position();
    }

    fn set_current_row(&self, index: u64) {
        self.inner.write().unwrap_or_else(PoisonError::into_inner).current_row = index;
        debug!("Transport row set to {}", index);
        self.emit_position();
    }
}
