//! # CueGate Playback Gate Library (cuegate-pg)
//!
//! Multi-reason play/pause gate in front of a live transport.
//!
//! **Purpose:** Let any number of independent subsystems (buffering, seeking,
//! error handling, ...) hold playback paused at the same time. Playback may
//! only resume once every one of them has released its block.
//!
//! **Architecture:** `PlaybackGate` owns the set of active block reasons and
//! relays transport commands to a `LiveEngine`; the derived `can_play` flag
//! is published through a `StateStore`. The HTTP/SSE surface in [`api`]
//! exposes one gate per running service.

pub mod api;
pub mod config;
pub mod error;
pub mod playback;
pub mod state;

pub use error::{Error, Result};
pub use playback::{BlockReason, LiveEngine, PlaybackGate, TransportEngine};
pub use state::{SharedState, StatePatch, StateStore};
