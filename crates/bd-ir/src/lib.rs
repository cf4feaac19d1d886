//! Core types for the buzzduet sequencer.
//!
//! This crate defines the data the engine consumes: notes, lyric entries,
//! LED channels and patterns, and the frequency helpers shared by the LED
//! patterns. Song files and the host parse into these types.
//!
//! Designed to be `no_std`. The owned [`Song`] container needs `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod frequency;
mod led;
mod lyrics;
mod note;
pub mod pitch;
#[cfg(feature = "alloc")]
mod song;

pub use frequency::{map_intensity, Band, INTENSITY_MAX_HZ, INTENSITY_MIN_HZ};
pub use led::{ChannelLevels, LedChannel, LedConfig, LedPattern, Pin};
pub use lyrics::{lyric_at, words, LyricEntry};
pub use note::{Note, Voice};
#[cfg(feature = "alloc")]
pub use song::{OwnedLyric, Song};
