//! Fixed colour per pitch class.

use bd_ir::{ChannelLevels, LedChannel};
use libm::sinf;

use super::VoiceFrame;

/// Inclusive frequency window and the colour shown for it. Natural notes
/// cover the 4th and 5th octaves, sharps only the 4th.
pub const NOTE_COLORS: [(u16, u16, ChannelLevels); 18] = [
    // C: red
    (260, 267, ChannelLevels::rgbyw(255, 0, 0, 0, 0)),
    (520, 530, ChannelLevels::rgbyw(255, 0, 0, 0, 0)),
    // D: yellow
    (290, 300, ChannelLevels::rgbyw(0, 0, 0, 255, 0)),
    (580, 595, ChannelLevels::rgbyw(0, 0, 0, 255, 0)),
    // E: green
    (325, 335, ChannelLevels::rgbyw(0, 255, 0, 0, 0)),
    (650, 670, ChannelLevels::rgbyw(0, 255, 0, 0, 0)),
    // F: blue
    (345, 355, ChannelLevels::rgbyw(0, 0, 255, 0, 0)),
    (690, 710, ChannelLevels::rgbyw(0, 0, 255, 0, 0)),
    // G: white
    (387, 400, ChannelLevels::rgbyw(0, 0, 0, 0, 255)),
    (775, 795, ChannelLevels::rgbyw(0, 0, 0, 0, 255)),
    // A: orange
    (435, 450, ChannelLevels::rgbyw(255, 0, 0, 255, 0)),
    (870, 890, ChannelLevels::rgbyw(255, 0, 0, 255, 0)),
    // B: cyan
    (490, 500, ChannelLevels::rgbyw(0, 255, 255, 0, 0)),
    (980, 1000, ChannelLevels::rgbyw(0, 255, 255, 0, 0)),
    // C#, D#, F#, G#
    (277, 285, ChannelLevels::rgbyw(255, 0, 0, 127, 0)),
    (311, 320, ChannelLevels::rgbyw(0, 0, 0, 255, 127)),
    (370, 380, ChannelLevels::rgbyw(0, 0, 255, 0, 127)),
    (415, 425, ChannelLevels::rgbyw(127, 0, 0, 0, 255)),
];

const LOW_THRESHOLD: u16 = 260;
const HIGH_THRESHOLD: u16 = 1000;
const FALLBACK: ChannelLevels = ChannelLevels::rgbyw(0, 0, 0, 0, 100);

/// Colour for one frequency. `step` only drives the sub-bass pulse.
///
/// Zero (a rest) is dark. Anything between the pitch windows falls back to
/// a dim white.
pub fn note_color(frequency: u16, step: u8) -> ChannelLevels {
    if frequency == 0 {
        return ChannelLevels::OFF;
    }
    if let Some(&(_, _, color)) = NOTE_COLORS
        .iter()
        .find(|(lo, hi, _)| (*lo..=*hi).contains(&frequency))
    {
        return color;
    }
    if frequency > HIGH_THRESHOLD {
        let channel = LedChannel::SPECTRUM[(frequency as usize / 100) % 5];
        return ChannelLevels::single(channel, 255);
    }
    if frequency < LOW_THRESHOLD {
        let level = (150.0 + sinf(step as f32 * 0.2) * 50.0) as u8;
        return ChannelLevels::single(LedChannel::Red, level);
    }
    FALLBACK
}

/// Melody at full brightness, harmony at half while the melody sounds.
pub fn note_mapping(frame: VoiceFrame, step: u8) -> ChannelLevels {
    let melody = note_color(frame.melody, step);
    let harmony = note_color(frame.harmony, step);
    if frame.melody > 0 {
        melody.max(harmony.scale(127))
    } else {
        harmony
    }
}
