//! Test doubles for the playback gate collaborators
//!
//! - `RecordingEngine`: logs every transport command in order
//! - `MemoryStore`: plain state store that keeps every patch it receives

#![allow(dead_code)]

use cuegate_pg::{LiveEngine, PlaybackGate, StatePatch, StateStore};
use std::sync::{Arc, Mutex};

/// Transport command as seen by the engine
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Pause,
    Play,
    SetTime(f64),
    SetRow(u64),
}

#[derive(Default)]
pub struct RecordingEngine {
    commands: Mutex<Vec<Command>>,
}

impl RecordingEngine {
    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().unwrap().clone()
    }

    pub fn count(&self, command: &Command) -> usize {
        self.commands.lock().unwrap().iter().filter(|c| *c == command).count()
    }

    fn record(&self, command: Command) {
        self.commands.lock().unwrap().push(command);
    }
}

impl LiveEngine for RecordingEngine {
    fn pause(&self) {
        self.record(Command::Pause);
    }

    fn play(&self) {
        self.record(Command::Play);
    }

    fn set_current_time(&self, position: f64) {
        self.record(Command::SetTime(position));
    }

    fn set_current_row(&self, index: u64) {
        self.record(Command::SetRow(index));
    }
}

pub struct MemoryStore {
    can_play: Mutex<bool>,
    patches: Mutex<Vec<StatePatch>>,
}

impl MemoryStore {
    /// Store starting from an arbitrary permission value
    pub fn starting_at(can_play: bool) -> Self {
        Self {
            can_play: Mutex::new(can_play),
            patches: Mutex::new(Vec::new()),
        }
    }

    pub fn patches(&self) -> Vec<StatePatch> {
        self.patches.lock().unwrap().clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::starting_at(true)
    }
}

impl StateStore for MemoryStore {
    fn can_play(&self) -> bool {
        *self.can_play.lock().unwrap()
    }

    fn apply(&self, patch: StatePatch) {
        *self.can_play.lock().unwrap() = patch.can_play;
        self.patches.lock().unwrap().push(patch);
    }
}

pub type TestGate = PlaybackGate<Arc<RecordingEngine>, Arc<MemoryStore>>;

/// Fresh gate with recording collaborators
pub fn test_gate() -> TestGate {
    PlaybackGate::new(
        Arc::new(RecordingEngine::default()),
        Arc::new(MemoryStore::default()),
    )
}
