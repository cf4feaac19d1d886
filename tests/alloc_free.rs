//! Allocation-free update path tests.
//!
//! `Sequencer::update` runs on boards without a heap, so after setup it
//! must never allocate: not on note changes, lyric repaints, LED frames or
//! the idle animation. Each test plays a song past its end and aborts on
//! the first heap allocation.
//!
//! Just run `cargo test`; no feature flags needed.

use assert_no_alloc::{assert_no_alloc, AllocDisabler};

#[cfg(debug_assertions)]
#[global_allocator]
static A: AllocDisabler = AllocDisabler;

use bd_engine::{DisplayGeometry, Rng, Sequencer, SequencerConfig};
use bd_host::{ode_to_joy, GridDisplay, LedPanel, ManualClock, ToneLog};
use bd_ir::LedPattern;

/// Play the demo for `duration_ms` in 5 ms steps, aborting on any heap
/// allocation inside `update`.
fn assert_update_alloc_free(pattern: LedPattern, duration_ms: u32) {
    let song = ode_to_joy();
    let entries = song.lyric_entries();
    let clock = ManualClock::at(0);
    let geometry = DisplayGeometry::default();

    let mut sequencer = Sequencer::new(
        ToneLog::silent(),
        LedPanel::new(LedPanel::default_config()),
        clock.clone(),
        Rng::from_seed(1),
    )
    .with_display(GridDisplay::new(geometry.cols, geometry.rows), geometry);
    sequencer.configure(&SequencerConfig {
        pattern,
        leds: LedPanel::default_config(),
        ..SequencerConfig::default()
    });
    sequencer.set_song(&song.melody, &song.harmony);
    sequencer.set_lyrics(&entries);
    sequencer.play();

    assert_no_alloc(|| {
        for _ in 0..duration_ms / 5 {
            clock.advance(5);
            sequencer.update();
        }
    });
    assert!(!sequencer.is_playing());
}

#[test]
fn every_pattern_alloc_free() {
    let song_ms = ode_to_joy().duration_ms();
    for pattern in LedPattern::ALL {
        assert_update_alloc_free(pattern, song_ms + 2000);
    }
}

#[test]
fn word_lyrics_alloc_free() {
    let song = ode_to_joy();
    let clock = ManualClock::at(0);
    let mut sequencer = Sequencer::new(
        ToneLog::silent(),
        LedPanel::new(LedPanel::default_config()),
        clock.clone(),
        Rng::default(),
    )
    .with_display(GridDisplay::new(20, 4), DisplayGeometry { cols: 20, rows: 4 });
    sequencer.set_song(&song.melody, &song.harmony);
    sequencer.set_lyric_text("joy ful joy ful we a dore thee God of glo ry Lord of love");
    sequencer.play();

    assert_no_alloc(|| {
        for _ in 0..4000 {
            clock.advance(5);
            sequencer.update();
        }
    });
}
