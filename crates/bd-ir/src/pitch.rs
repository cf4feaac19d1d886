//! Pitch names and equal-tempered frequencies for authoring songs.
//!
//! The constants are rounded to whole Hz, which is all a square-wave
//! buzzer can resolve anyway.

pub const NOTE_C3: u16 = 131;
pub const NOTE_CS3: u16 = 139;
pub const NOTE_D3: u16 = 147;
pub const NOTE_DS3: u16 = 156;
pub const NOTE_E3: u16 = 165;
pub const NOTE_F3: u16 = 175;
pub const NOTE_FS3: u16 = 185;
pub const NOTE_G3: u16 = 196;
pub const NOTE_GS3: u16 = 208;
pub const NOTE_A3: u16 = 220;
pub const NOTE_AS3: u16 = 233;
pub const NOTE_B3: u16 = 247;

pub const NOTE_C4: u16 = 262;
pub const NOTE_CS4: u16 = 277;
pub const NOTE_D4: u16 = 294;
pub const NOTE_DS4: u16 = 311;
pub const NOTE_E4: u16 = 330;
pub const NOTE_F4: u16 = 349;
pub const NOTE_FS4: u16 = 370;
pub const NOTE_G4: u16 = 392;
pub const NOTE_GS4: u16 = 415;
pub const NOTE_A4: u16 = 440;
pub const NOTE_AS4: u16 = 466;
pub const NOTE_B4: u16 = 494;

pub const NOTE_C5: u16 = 523;
pub const NOTE_CS5: u16 = 554;
pub const NOTE_D5: u16 = 587;
pub const NOTE_DS5: u16 = 622;
pub const NOTE_E5: u16 = 659;
pub const NOTE_F5: u16 = 698;
pub const NOTE_FS5: u16 = 740;
pub const NOTE_G5: u16 = 784;
pub const NOTE_GS5: u16 = 831;
pub const NOTE_A5: u16 = 880;
pub const NOTE_AS5: u16 = 932;
pub const NOTE_B5: u16 = 988;

pub const NOTE_C6: u16 = 1047;
pub const NOTE_CS6: u16 = 1109;
pub const NOTE_D6: u16 = 1175;
pub const NOTE_DS6: u16 = 1245;
pub const NOTE_E6: u16 = 1319;
pub const NOTE_F6: u16 = 1397;
pub const NOTE_FS6: u16 = 1480;
pub const NOTE_G6: u16 = 1568;
pub const NOTE_GS6: u16 = 1661;
pub const NOTE_A6: u16 = 1760;
pub const NOTE_AS6: u16 = 1865;
pub const NOTE_B6: u16 = 1976;

/// MIDI note number of A4.
const A4_MIDI: i32 = 69;

/// Semitone offsets of the natural notes A..G from C.
const LETTER_SEMITONES: [i16; 7] = [9, 11, 0, 2, 4, 5, 7];

/// Convert a MIDI note number to the nearest whole Hz (12-TET, A4 = 440).
pub fn midi_to_hz(note: u8) -> u16 {
    let semitones = note as i32 - A4_MIDI;
    let hz = 440.0 * libm::powf(2.0, semitones as f32 / 12.0);
    libm::roundf(hz).clamp(0.0, u16::MAX as f32) as u16
}

/// Parse a pitch name such as `C4`, `F#5`, `Bb3` or `cs4` into a MIDI note.
///
/// Accepts a letter A-G (any case), an optional accidental (`#`, `s` for
/// sharp, `b` for flat) and an octave 0-8.
pub fn parse_pitch(name: &str) -> Option<u8> {
    let bytes = name.as_bytes();
    let (&letter, rest) = bytes.split_first()?;
    let letter = letter.to_ascii_uppercase();
    if !(b'A'..=b'G').contains(&letter) {
        return None;
    }
    let base = LETTER_SEMITONES[(letter - b'A') as usize];

    let (accidental, rest) = match rest.split_first() {
        Some((&b'#', tail)) | Some((&b's', tail)) => (1, tail),
        Some((&b'b', tail)) => (-1, tail),
        _ => (0, rest),
    };

    let octave = match rest {
        [digit @ b'0'..=b'8'] => (*digit - b'0') as i16,
        _ => return None,
    };

    let midi = (octave + 1) * 12 + base + accidental;
    u8::try_from(midi).ok()
}
