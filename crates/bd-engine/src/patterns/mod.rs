//! LED pattern engine.
//!
//! Every pattern is rendered from a [`VoiceFrame`] (what both voices are
//! sounding right now) and a step counter that advances once per render
//! and wraps at 256. The stateless patterns live in the submodules; the
//! engine keeps the little state the strobe and random patterns need.

mod ambient;
mod audio;
mod note_map;

pub use note_map::{note_color, NOTE_COLORS};

use bd_ir::{ChannelLevels, LedChannel, LedPattern};

use crate::hal::RandomSource;
use crate::time::{elapsed, Millis, Throttle};

/// How long the dim all-channel flash lasts after a note change.
pub const SPARKLE_MS: Millis = 100;
/// Strobe flag half-period.
pub const STROBE_MS: Millis = 100;

const SPARKLE_LEVEL: u8 = 100;

/// Voice frequencies sampled for one render. Zero means resting or stopped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VoiceFrame {
    pub melody: u16,
    pub harmony: u16,
    /// Either voice is playing (a rest still counts)
    pub playing: bool,
}

impl VoiceFrame {
    pub const SILENT: Self = Self { melody: 0, harmony: 0, playing: false };

    /// Melody if it is sounding, otherwise harmony.
    pub fn primary(&self) -> u16 {
        if self.melody > 0 {
            self.melody
        } else {
            self.harmony
        }
    }
}

/// Stateful renderer for the selected [`LedPattern`].
#[derive(Clone, Debug, Default)]
pub struct PatternEngine {
    pattern: LedPattern,
    step: u8,
    last_freq: [u16; 2],
    change_time: Millis,
    just_changed: bool,
    strobe_on: bool,
    strobe: Throttle,
    last_choice: Option<LedChannel>,
}

impl PatternEngine {
    pub fn new(pattern: LedPattern) -> Self {
        Self { pattern, ..Self::default() }
    }

    pub fn pattern(&self) -> LedPattern {
        self.pattern
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    /// Switch pattern. The step counter and note-change tracking restart.
    pub fn set_pattern(&mut self, pattern: LedPattern) {
        self.pattern = pattern;
        self.reset();
    }

    /// Restart the step counter and forget the last seen frequencies.
    pub fn reset(&mut self) {
        self.step = 0;
        self.last_freq = [0; 2];
        self.change_time = 0;
        self.just_changed = false;
    }

    /// Render one frame and advance the step counter.
    pub fn render<R: RandomSource>(
        &mut self,
        now: Millis,
        frame: VoiceFrame,
        rng: &mut R,
    ) -> ChannelLevels {
        let step = self.step;
        let levels = match self.pattern {
            LedPattern::FrequencyBands => audio::frequency_bands(frame, step),
            LedPattern::BeatPulse => audio::beat_pulse(frame, step),
            LedPattern::RainbowChase => ambient::rainbow_chase(step),
            LedPattern::VuMeter => audio::vu_meter(frame),
            LedPattern::DiscoStrobe => self.disco_strobe(now, frame),
            LedPattern::RandomNotes => self.random_notes(now, frame, rng),
            LedPattern::NoteMapping => note_map::note_mapping(frame, step),
        };
        self.step = self.step.wrapping_add(1);
        levels
    }

    fn disco_strobe(&mut self, now: Millis, frame: VoiceFrame) -> ChannelLevels {
        if self.strobe.try_fire(now, STROBE_MS) {
            self.strobe_on = !self.strobe_on;
        }
        ambient::strobe(self.strobe_on && frame.playing, self.step)
    }

    fn random_notes<R: RandomSource>(
        &mut self,
        now: Millis,
        frame: VoiceFrame,
        rng: &mut R,
    ) -> ChannelLevels {
        if [frame.melody, frame.harmony] != self.last_freq {
            self.last_freq = [frame.melody, frame.harmony];
            self.change_time = now;
            self.just_changed = true;
        }
        let since_change = elapsed(now, self.change_time);

        let mut levels = ChannelLevels::OFF;
        if frame.primary() > 0 {
            let channel = self.pick_channel(rng);
            levels.set(channel, 255);
            if self.just_changed && since_change < SPARKLE_MS {
                levels = levels.max(ChannelLevels::splat(SPARKLE_LEVEL));
            }
        }

        if since_change > SPARKLE_MS {
            self.just_changed = false;
        }
        levels
    }

    /// Uniform pick over the five channels. Right after a note change the
    /// previous choice is excluded by drawing from the other four.
    fn pick_channel<R: RandomSource>(&mut self, rng: &mut R) -> LedChannel {
        let channel = match self.last_choice {
            Some(last) if self.just_changed => {
                let r = rng.random_range(0, 4) as usize;
                let skip = last.index();
                LedChannel::from_index(if r >= skip { r + 1 } else { r })
            }
            _ => LedChannel::from_index(rng.random_range(0, 5) as usize),
        };
        self.last_choice = Some(channel);
        channel
    }

    pub fn last_choice(&self) -> Option<LedChannel> {
        self.last_choice
    }
}
