//! Non-blocking playback engine for the buzzduet sequencer.
//!
//! Drives two square-wave voices, a lyric display and five indicator LEDs
//! from a single polled entry point, [`Sequencer::update`]. All hardware is
//! reached through the traits in [`hal`].

#![cfg_attr(not(feature = "std"), no_std)]

// The test fakes need std even when the crate is built without it.
#[cfg(all(test, not(feature = "std")))]
#[macro_use]
extern crate std;

mod config;
mod display;
pub mod hal;
mod leds;
pub mod patterns;
mod player;
mod rng;
mod sequencer;
mod time;
mod voice;

#[cfg(test)]
mod testing;

pub use config::{DisplayGeometry, SequencerConfig, DEFAULT_LED_INTERVAL_MS};
pub use display::{
    DisplaySync, Lyrics, DEFAULT_IDLE_MESSAGE, IDLE_INTERVAL_MS, IDLE_STEP_WRAP, MAX_COLS,
    MAX_WORDS,
};
pub use hal::{CharDisplay, Clock, Delay, NoDisplay, NoPwm, PwmOutput, RandomSource, ToneOutput};
pub use leds::LedBank;
pub use patterns::{PatternEngine, VoiceFrame};
pub use player::{play_blocking, NOTE_GAP_MS};
pub use rng::Rng;
pub use sequencer::Sequencer;
pub use time::{elapsed, Millis, Throttle};
pub use voice::{Advance, VoiceTimeline};
