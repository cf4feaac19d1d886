//! Blocking playback, for sketches that have nothing else to do.
//!
//! This holds the caller for the whole sequence. It must not share tone or
//! LED outputs with a running [`Sequencer`](crate::Sequencer).

use bd_ir::{ChannelLevels, Note, Voice};

use crate::hal::{Delay, PwmOutput, ToneOutput};
use crate::leds::LedBank;
use crate::patterns::note_color;

/// Silence between consecutive notes.
pub const NOTE_GAP_MS: u32 = 50;

/// Play `notes` on one voice, showing each pitch's colour while it sounds.
pub fn play_blocking<T, P, D>(
    notes: &[Note],
    voice: Voice,
    tone: &mut T,
    leds: &mut LedBank<P>,
    delay: &mut D,
) where
    T: ToneOutput,
    P: PwmOutput,
    D: Delay,
{
    for note in notes {
        leds.write(ChannelLevels::OFF);
        if note.is_rest() {
            delay.delay_ms(note.duration as u32);
        } else {
            tone.start_tone(voice, note.frequency);
            leds.write(note_color(note.frequency, 0));
            delay.delay_ms(note.duration as u32);
            tone.stop_tone(voice);
        }
        delay.delay_ms(NOTE_GAP_MS);
        leds.write(ChannelLevels::OFF);
    }
}
