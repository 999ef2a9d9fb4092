//! Multi-reason play/pause gate
//!
//! Any number of callers may block playback, each under its own
//! [`BlockReason`]. Play requests are honoured only while no reason is held.
//!
//! **Invariants:**
//! - `can_play` published to the store is true iff the block set is empty
//! - Blocking always pauses the engine before returning
//! - Releasing never resumes playback; a later `play()` is required
//!
//! The block set, the emptiness check, the resulting engine command and the
//! store update all happen under one mutex, so concurrent callers observe a
//! single order of block/release/play decisions.

use super::engine::LiveEngine;
use super::reason::BlockReason;
use crate::state::{StatePatch, StateStore};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Play/pause gate in front of a live engine
///
/// One gate per session; share it behind an `Arc`. All operations are
/// synchronous and infallible.
pub struct PlaybackGate<E, S> {
    engine: E,
    store: S,
    blocks: Mutex<HashSet<BlockReason>>,
}

impl<E: LiveEngine, S: StateStore> PlaybackGate<E, S> {
    /// Create an unblocked gate
    ///
    /// Publishes `can_play = true` so the store starts consistent with the
    /// empty block set.
    pub fn new(engine: E, store: S) -> Self {
        store.apply(StatePatch { can_play: true });
        Self {
            engine,
            store,
            blocks: Mutex::new(HashSet::new()),
        }
    }

    fn blocks(&self) -> MutexGuard<'_, HashSet<BlockReason>> {
        self.blocks.lock().unwrap_or_else(|poisoned| {
            warn!("Block set lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Pause the engine unconditionally
    pub fn pause(&self) {
        info!("Pause command relayed");
        self.engine.pause();
    }

    /// Play the engine if the store permits it
    ///
    /// While any block reason is held this is a silent no-op: the request
    /// is dropped, not queued.
    pub fn play(&self) {
        let blocks = self.blocks();
        if self.store.can_play() {
            info!("Play command relayed");
            self.engine.play();
        } else {
            debug!("Play suppressed, {} block reason(s) held", blocks.len());
        }
    }

    /// Forward a time write to the engine
    pub fn set_current_time(&self, position: f64) {
        self.engine.set_current_time(position);
    }

    /// Forward a row write to the engine
    pub fn set_current_row(&self, index: u64) {
        self.engine.set_current_row(index);
    }

    /// Block playback and pause the engine
    ///
    /// With `Some(reason)` the reason is held until released; holding an
    /// already-held reason changes nothing. With `None` the engine is paused
    /// but nothing is tracked, so the pause lasts only until the next
    /// permitted `play()`.
    ///
    /// Returns the permission patch that was applied to the store.
    pub fn block_playback(&self, reason: Option<BlockReason>) -> StatePatch {
        let mut blocks = self.blocks();

        match reason {
            Some(reason) => {
                info!("Playback blocked: {}", reason);
                blocks.insert(reason);
            }
            None => info!("Untracked playback block"),
        }

        self.engine.pause();

        let patch = StatePatch {
            can_play: blocks.is_empty(),
        };
        self.store.apply(patch);
        patch
    }

    /// Release a block reason
    ///
    /// Releasing a reason that is not held is a no-op. Playback does not
    /// resume on its own when the last reason goes away.
    ///
    /// Returns the permission patch that was applied to the store.
    pub fn release_playback(&self, reason: &BlockReason) -> StatePatch {
        let mut blocks = self.blocks();

        if blocks.remove(reason) {
            info!("Playback block released: {} ({} remaining)", reason, blocks.len());
        } else {
            debug!("Release of unheld block reason {} ignored", reason);
        }

        let patch = StatePatch {
            can_play: blocks.is_empty(),
        };
        self.store.apply(patch);
        patch
    }

    /// Currently held reasons, sorted
    pub fn active_reasons(&self) -> Vec<BlockReason> {
        let mut reasons: Vec<BlockReason> = self.blocks().iter().cloned().collect();
        reasons.sort();
        reasons
    }

    pub fn is_blocked(&self) -> bool {
        !self.blocks().is_empty()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
