//! Playback gating and transport control
//!
//! - [`reason`]: block reason tokens
//! - [`engine`]: the live engine interface and the in-memory transport
//! - [`gate`]: the multi-reason play/pause gate

pub mod engine;
pub mod gate;
pub mod reason;

pub use engine::{LiveEngine, TransportEngine, TransportSnapshot};
pub use gate::PlaybackGate;
pub use reason::BlockReason;
