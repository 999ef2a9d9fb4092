//! Playback gate behaviour against recording collaborators
//!
//! Covers the buffering/seek/error coordination scenarios and the
//! guarantees callers rely on: blocks always pause, releases never play,
//! play is suppressed while any reason is held.

mod helpers;

use cuegate_pg::{BlockReason, PlaybackGate, StatePatch, StateStore};
use helpers::{test_gate, Command, MemoryStore, RecordingEngine};
use std::sync::Arc;

fn reason(id: &str) -> BlockReason {
    BlockReason::from(id)
}

#[test]
fn test_buffer_and_seek_overlap() {
    let gate = test_gate();

    let after_buffer = gate.block_playback(Some(reason("buffer")));
    let after_seek = gate.block_playback(Some(reason("seek")));
    assert!(!after_buffer.can_play);
    assert!(!after_seek.can_play);

    // "seek" is still held
    let after_release = gate.release_playback(&reason("buffer"));
    assert!(!after_release.can_play);
    assert!(!gate.store().can_play());

    assert_eq!(gate.engine().commands(), vec![Command::Pause, Command::Pause]);
    assert_eq!(gate.engine().count(&Command::Play), 0);
}

#[test]
fn test_block_release_then_play() {
    let gate = test_gate();

    gate.block_playback(Some(reason("x")));
    let patch = gate.release_playback(&reason("x"));
    assert_eq!(patch, StatePatch { can_play: true });
    assert!(gate.store().can_play());

    gate.play();
    assert_eq!(gate.engine().count(&Command::Play), 1);
    assert_eq!(gate.engine().commands(), vec![Command::Pause, Command::Play]);
}

#[test]
fn test_play_without_blocks() {
    let gate = test_gate();
    gate.play();
    assert_eq!(gate.engine().commands(), vec![Command::Play]);
}

#[test]
fn test_untracked_block() {
    let gate = test_gate();
    gate.block_playback(Some(reason("error")));

    let patch = gate.block_playback(None);

    assert_eq!(patch, StatePatch { can_play: false });
    assert_eq!(gate.active_reasons(), vec![reason("error")]);
    assert_eq!(gate.engine().count(&Command::Pause), 2);

    gate.release_playback(&reason("error"));
    assert!(gate.store().can_play());
}

#[test]
fn test_untracked_block_on_unblocked_gate() {
    let gate = test_gate();

    let patch = gate.block_playback(None);

    assert!(patch.can_play);
    assert!(!gate.is_blocked());
    assert_eq!(gate.engine().commands(), vec![Command::Pause]);
}

#[test]
fn test_every_block_publishes_a_patch() {
    let gate = test_gate();

    gate.block_playback(Some(reason("a")));
    gate.block_playback(Some(reason("a")));
    gate.release_playback(&reason("a"));
    gate.release_playback(&reason("a"));

    // First patch comes from construction
    assert_eq!(
        gate.store().patches(),
        vec![
            StatePatch { can_play: true },
            StatePatch { can_play: false },
            StatePatch { can_play: false },
            StatePatch { can_play: true },
            StatePatch { can_play: true },
        ]
    );
}

#[test]
fn test_construction_resets_stale_store() {
    let store = Arc::new(MemoryStore::starting_at(false));
    let gate = PlaybackGate::new(Arc::new(RecordingEngine::default()), Arc::clone(&store));

    assert!(store.can_play());
    gate.play();
    assert_eq!(gate.engine().count(&Command::Play), 1);
}

#[test]
fn test_position_writes_bypass_block_state() {
    let gate = test_gate();
    gate.block_playback(Some(reason("seek")));

    gate.set_current_time(42.0);
    gate.set_current_row(3);

    assert_eq!(
        gate.engine().commands(),
        vec![Command::Pause, Command::SetTime(42.0), Command::SetRow(3)]
    );
}

#[test]
fn test_scoped_reasons_do_not_interfere() {
    let gate = test_gate();
    let buffering = BlockReason::scoped("buffer", "track-1");
    let seeking = BlockReason::scoped("seek", "track-1");

    gate.block_playback(Some(buffering.clone()));
    gate.block_playback(Some(seeking.clone()));
    gate.release_playback(&buffering);

    gate.play();
    assert_eq!(gate.engine().count(&Command::Play), 0);

    gate.release_playback(&seeking);
    gate.play();
    assert_eq!(gate.engine().count(&Command::Play), 1);
}
