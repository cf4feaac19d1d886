//! End-to-end playback through the offline simulator.

use bd_host::{ode_to_joy, LedPattern, PanelFrame, SequencerConfig, Simulator, Song};
use bd_ir::Note;

fn frames(song: &Song, pattern: LedPattern) -> Vec<PanelFrame> {
    let config = SequencerConfig { pattern, ..SequencerConfig::default() };
    Simulator::new(config).idle_tail(1500).run(song)
}

/// The panel as it stood at `time`.
fn shown_at(frames: &[PanelFrame], time: u32) -> &PanelFrame {
    frames.iter().rev().find(|f| f.time <= time).unwrap()
}

/// Index of the first frame at or after `time`.
fn first_at(frames: &[PanelFrame], time: u32) -> usize {
    frames.iter().position(|f| f.time >= time).unwrap_or(frames.len())
}

#[test]
fn lyrics_appear_in_order() {
    let song = ode_to_joy();
    let frames = frames(&song, LedPattern::NoteMapping);

    let mut last_seen = 0;
    for word in ["Joyful", "adore", "glory,", "Hearts", "flowers", "above."] {
        let index = frames[last_seen..]
            .iter()
            .position(|f| f.lcd[0].contains(word))
            .unwrap_or_else(|| panic!("{word:?} never shown"));
        last_seen += index;
    }
}

#[test]
fn melody_tones_match_the_score() {
    let song = ode_to_joy();
    let frames = frames(&song, LedPattern::RandomNotes);

    let mut start = 0u32;
    for note in &song.melody {
        let end = start + note.duration as u32 - 5;
        assert_eq!(shown_at(&frames, start).tones[0], note.frequency, "note at {start} ms");
        assert_eq!(shown_at(&frames, end).tones[0], note.frequency, "note at {end} ms");
        start += note.duration as u32;
    }
}

#[test]
fn song_end_blanks_leds_and_shows_idle_screen() {
    let song = ode_to_joy();
    let end = song.duration_ms();
    let frames = frames(&song, LedPattern::RainbowChase);

    let after = &frames[first_at(&frames, end)..];
    assert!(!after.is_empty());
    assert_eq!(after[0].tones, [0, 0]);
    assert!(after.iter().all(|f| !f.lcd[0].contains("above.")));
    assert!(after.iter().any(|f| f.lcd[0].contains("Please")));
}

#[test]
fn rests_silence_the_voice_but_keep_playing() {
    let mut song = Song::new("gaps");
    song.melody = vec![Note::new(523, 100), Note::rest(100), Note::new(523, 100)];
    let frames = frames(&song, LedPattern::VuMeter);

    let during_rest = &frames[first_at(&frames, 100)];
    assert_eq!(during_rest.time, 100);
    assert_eq!(during_rest.tones, [0, 0]);

    let resumed = &frames[first_at(&frames, 200)];
    assert_eq!(resumed.time, 200);
    assert_eq!(resumed.tones[0], 523);
    assert!(!resumed.leds.is_off());
}

#[test]
fn harmony_outlasting_melody_keeps_the_song_alive() {
    let mut song = Song::new("tail");
    song.melody = vec![Note::new(440, 100)];
    song.harmony = vec![Note::new(220, 400)];
    let frames = frames(&song, LedPattern::FrequencyBands);

    let mid = shown_at(&frames, 300);
    assert_eq!(mid.tones, [0, 220]);
    assert!(!mid.leds.is_off());

    let end = &frames[first_at(&frames, 400)];
    assert_eq!(end.tones, [0, 0]);
}
