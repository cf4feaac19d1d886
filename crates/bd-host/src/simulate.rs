//! Offline playback against a manual clock.

use bd_engine::{Millis, Rng, Sequencer, SequencerConfig};
use bd_ir::Song;
use tracing::debug;

use crate::clock::ManualClock;
use crate::config::for_panel;
use crate::panel::{GridDisplay, LedPanel, PanelFrame, ToneLog};

/// Runs a song to completion without real time passing.
///
/// The clock moves `step_ms` per tick. A frame is emitted for the first
/// tick and then whenever the panel changes. The run stops once the song
/// has been over for `idle_tail_ms`, or at `limit_ms`.
#[derive(Clone, Copy, Debug)]
pub struct Simulator {
    config: SequencerConfig,
    step_ms: Millis,
    limit_ms: Millis,
    idle_tail_ms: Millis,
    seed: u64,
}

impl Simulator {
    pub fn new(config: SequencerConfig) -> Self {
        Self {
            config,
            step_ms: 5,
            limit_ms: 10 * 60 * 1000,
            idle_tail_ms: 1000,
            seed: 0x5eed,
        }
    }

    pub fn step(mut self, ms: Millis) -> Self {
        self.step_ms = ms.max(1);
        self
    }

    pub fn limit(mut self, ms: Millis) -> Self {
        self.limit_ms = ms;
        self
    }

    pub fn idle_tail(mut self, ms: Millis) -> Self {
        self.idle_tail_ms = ms;
        self
    }

    /// Seed for the LED pattern generator. Same seed, same light show.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn run(&self, song: &Song) -> Vec<PanelFrame> {
        let mut frames = Vec::new();
        self.run_with(song, |frame| frames.push(frame.clone()));
        frames
    }

    /// Like [`run`](Self::run) but hands each frame to `on_frame` instead
    /// of collecting them.
    pub fn run_with<F: FnMut(&PanelFrame)>(&self, song: &Song, mut on_frame: F) {
        let (config, geometry) = for_panel(self.config);
        let entries = song.lyric_entries();
        let clock = ManualClock::at(0);

        let mut sequencer = Sequencer::new(
            ToneLog::silent(),
            LedPanel::new(config.leds),
            clock.clone(),
            Rng::from_seed(self.seed),
        )
        .with_display(GridDisplay::new(geometry.cols, geometry.rows), geometry);
        sequencer.configure(&config);
        sequencer.set_song(&song.melody, &song.harmony);
        sequencer.set_lyrics(&entries);
        sequencer.play();

        let mut last: Option<PanelFrame> = None;
        let mut ended_at = None;
        let mut ticks = 0u32;
        loop {
            let now = clock.get();
            sequencer.update();
            ticks += 1;

            let frame = PanelFrame::of(&sequencer, now);
            if !last.as_ref().is_some_and(|l| l.same_view(&frame)) {
                on_frame(&frame);
                last = Some(frame);
            }

            if sequencer.is_playing() {
                ended_at = None;
            } else if now.wrapping_sub(*ended_at.get_or_insert(now)) >= self.idle_tail_ms {
                break;
            }
            if now >= self.limit_ms {
                break;
            }
            clock.advance(self.step_ms);
        }
        debug!(ticks, end = clock.get(), "simulation done");
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SequencerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::ode_to_joy;
    use bd_engine::DEFAULT_IDLE_MESSAGE;
    use bd_ir::{LedPattern, Note};

    fn two_notes() -> Song {
        let mut song = Song::new("two");
        song.melody = vec![Note::new(440, 100), Note::new(880, 100)];
        song.harmony = vec![Note::new(220, 150)];
        song.add_lyric("one", 0);
        song.add_lyric("two", 1);
        song
    }

    #[test]
    fn first_frame_shows_first_note_and_lyric() {
        let frames = Simulator::default().run(&two_notes());
        let first = &frames[0];
        assert_eq!(first.time, 0);
        assert_eq!(first.tones, [440, 220]);
        assert!(first.lcd[0].contains("one"), "{:?}", first.lcd);
    }

    #[test]
    fn tones_follow_the_score() {
        let frames = Simulator::default().run(&two_notes());
        let at = |t: Millis| frames.iter().rev().find(|f| f.time <= t).map(|f| f.tones);
        assert_eq!(at(99), Some([440, 220]));
        assert_eq!(at(100), Some([880, 220]));
        assert_eq!(at(150), Some([880, 0]));
        assert_eq!(at(200), Some([0, 0]));
    }

    #[test]
    fn song_end_goes_idle() {
        let frames = Simulator::default().idle_tail(400).run(&two_notes());
        let last = frames.last().unwrap();
        assert_eq!(last.tones, [0, 0]);
        assert!(last.leds.is_off());
        let shown = last.lcd[0].trim();
        assert!(!shown.is_empty());
        assert!(DEFAULT_IDLE_MESSAGE.contains(shown), "{shown:?}");
    }

    #[test]
    fn limit_cuts_long_songs() {
        let frames = Simulator::default().limit(1000).run(&ode_to_joy());
        assert!(frames.iter().all(|f| f.time <= 1000));
        assert!(frames.last().unwrap().tones != [0, 0]);
    }

    #[test]
    fn same_seed_same_show() {
        let config = SequencerConfig { pattern: LedPattern::RandomNotes, ..SequencerConfig::default() };
        let song = ode_to_joy();
        let a = Simulator::new(config).seed(7).limit(3000).run(&song);
        let b = Simulator::new(config).seed(7).limit(3000).run(&song);
        assert_eq!(a, b);
        assert!(a.iter().any(|f| !f.leds.is_off()));
    }

    #[test]
    fn every_pattern_lights_something() {
        for pattern in LedPattern::ALL {
            let config = SequencerConfig { pattern, ..SequencerConfig::default() };
            let frames = Simulator::new(config).limit(2000).run(&ode_to_joy());
            assert!(frames.iter().any(|f| !f.leds.is_off()), "{}", pattern.name());
        }
    }
}
