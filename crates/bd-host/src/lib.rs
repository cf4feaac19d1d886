//! Desktop host for the buzzduet sequencer.
//!
//! Supplies std-backed collaborators for the engine and two ways to run a
//! song: [`Simulator`] steps a manual clock as fast as it can, and
//! [`Controller`] plays in real time on the sound card. Both render into
//! the same in-memory [`panel`].

mod clock;
mod config;
mod controller;
mod demo;
mod error;
pub mod panel;
mod random;
mod simulate;

pub use clock::{ManualClock, SystemClock, ThreadDelay};
pub use config::{for_panel, load_config, parse_config};
pub use controller::{AudioMode, Controller};
pub use demo::ode_to_joy;
pub use error::{HostError, Result};
pub use panel::{GridDisplay, LedPanel, PanelFrame, PanelSequencer, ToneLog};
pub use random::ThreadRandom;
pub use simulate::Simulator;

// Re-export common types so the CLI doesn't need the lower crates directly.
pub use bd_engine::{DisplayGeometry, Millis, SequencerConfig};
pub use bd_formats::{load_song, save_song, FormatError};
pub use bd_ir::{ChannelLevels, LedChannel, LedPattern, Song, Voice};
