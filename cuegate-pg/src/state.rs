//! Shared permission state
//!
//! The state store holds the `can_play` flag derived by the playback gate
//! and distributes changes to any number of readers.

use cuegate_common::events::{EventBus, GateEvent};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;
use tracing::debug;

/// Partial state update produced by the playback gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePatch {
    /// True iff no block reason is currently held
    pub can_play: bool,
}

/// Container the playback gate publishes its permission flag to
///
/// The gate is the only writer; everything else reads.
pub trait StateStore: Send + Sync {
    /// Current play permission
    fn can_play(&self) -> bool;

    /// Merge a patch and notify subscribers
    fn apply(&self, patch: StatePatch);
}

impl<T: StateStore + ?Sized> StateStore for Arc<T> {
    fn can_play(&self) -> bool {
        (**self).can_play()
    }

    fn apply(&self, patch: StatePatch) {
        (**self).apply(patch)
    }
}

/// Shared state accessible by all components
///
/// Uses RwLock for concurrent read access with rare writes. Reads and writes
/// never suspend, so the gate can call into it from synchronous code.
pub struct SharedState {
    /// Play permission, true until the first tracked block
    can_play: RwLock<bool>,

    /// Event broadcaster for SSE events
    events: Arc<EventBus>,
}

impl SharedState {
    /// Create new shared state publishing to `events`
    pub fn new(events: Arc<EventBus>) -> Self {
        Self {
            can_play: RwLock::new(true),
            events,
        }
    }

    /// Subscribe to event stream for SSE
    pub fn subscribe_events(&self) -> broadcast::Receiver<GateEvent> {
        self.events.subscribe()
    }
}

impl StateStore for SharedState {
    fn can_play(&self) -> bool {
        *self.can_play.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, patch: StatePatch) {
        let changed = {
            let mut can_play = self.can_play.write().unwrap_or_else(PoisonError::into_inner);
            let changed = *can_play != patch.can_play;
            *can_play = patch.can_play;
            changed
        };

        if changed {
            debug!("Play permission changed: can_play={}", patch.can_play);
            self.events.emit_lossy(GateEvent::PermissionChanged {
                can_play: patch.can_play,
                timestamp: cuegate_common::time::now(),
            });
        }
    }
}
