//! Sound-card output for the buzzduet sequencer.
//!
//! [`SquareOutput`] implements the engine's `ToneOutput` by synthesising
//! both voices as square waves on the default cpal device.

mod error;
mod square;

pub use error::AudioError;
pub use square::{SquareOutput, SquareSynth, ToneCommand, AMPLITUDE};
