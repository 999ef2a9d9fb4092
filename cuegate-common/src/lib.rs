//! # CueGate Common Library
//!
//! Shared code for the CueGate playback services:
//! - Error types
//! - Event types (GateEvent enum) and the EventBus
//! - Bootstrap configuration loading
//! - Timestamp helpers

pub mod config;
pub mod error;
pub mod events;
pub mod time;

pub use error::{Error, Result};
