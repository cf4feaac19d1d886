//! Collaborator traits the engine drives.
//!
//! The engine never touches hardware directly. Tone generation, PWM,
//! the character display, the clock and randomness all come in through
//! these traits, so the same scheduler runs on a board or in a test.

use bd_ir::{Pin, Voice};

use crate::time::Millis;

/// Square-wave generator with one output per voice.
///
/// Both methods must be idempotent.
pub trait ToneOutput {
    /// Start (or retune) the voice's square wave.
    fn start_tone(&mut self, voice: Voice, frequency: u16);
    /// Silence the voice.
    fn stop_tone(&mut self, voice: Voice);
}

/// Duty-cycle output for LED pins.
pub trait PwmOutput {
    /// Set `pin` to `level` (0 = off, 255 = full on).
    fn write_intensity(&mut self, pin: Pin, level: u8);
}

/// Fixed-size character grid, e.g. an HD44780 LCD.
///
/// Text written past the right edge is truncated by the implementation.
pub trait CharDisplay {
    fn clear(&mut self);
    fn set_cursor(&mut self, col: u8, row: u8);
    fn print(&mut self, text: &str);
}

/// Monotonic millisecond counter. Allowed to wrap.
pub trait Clock {
    fn now_millis(&self) -> Millis;
}

/// Uniform integer source for LED pattern choices.
pub trait RandomSource {
    /// A value in `min..max`. Returns `min` if the range is empty.
    fn random_range(&mut self, min: u32, max: u32) -> u32;
}

/// Busy or sleeping wait, only used by the blocking player.
pub trait Delay {
    fn delay_ms(&mut self, ms: u32);
}

impl<T: ToneOutput + ?Sized> ToneOutput for &mut T {
    fn start_tone(&mut self, voice: Voice, frequency: u16) {
        (**self).start_tone(voice, frequency)
    }

    fn stop_tone(&mut self, voice: Voice) {
        (**self).stop_tone(voice)
    }
}

impl<P: PwmOutput + ?Sized> PwmOutput for &mut P {
    fn write_intensity(&mut self, pin: Pin, level: u8) {
        (**self).write_intensity(pin, level)
    }
}

impl<D: CharDisplay + ?Sized> CharDisplay for &mut D {
    fn clear(&mut self) {
        (**self).clear()
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        (**self).set_cursor(col, row)
    }

    fn print(&mut self, text: &str) {
        (**self).print(text)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> Millis {
        (**self).now_millis()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn random_range(&mut self, min: u32, max: u32) -> u32 {
        (**self).random_range(min, max)
    }
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}

/// Display stand-in for boards without an LCD.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDisplay;

impl CharDisplay for NoDisplay {
    fn clear(&mut self) {}
    fn set_cursor(&mut self, _col: u8, _row: u8) {}
    fn print(&mut self, _text: &str) {}
}

/// PWM stand-in for boards without indicator LEDs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPwm;

impl PwmOutput for NoPwm {
    fn write_intensity(&mut self, _pin: Pin, _level: u8) {}
}
