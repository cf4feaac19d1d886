//! Built-in demo song.

use bd_ir::pitch::*;
use bd_ir::{Note, Song};

const Q: u16 = 400;
const H: u16 = 800;
const DQ: u16 = 600;
const E: u16 = 200;

const PHRASE: [u16; 12] = [
    NOTE_E4, NOTE_E4, NOTE_F4, NOTE_G4, NOTE_G4, NOTE_F4, NOTE_E4, NOTE_D4, NOTE_C4, NOTE_C4,
    NOTE_D4, NOTE_E4,
];

const LYRICS: [(&str, u16); 22] = [
    ("Joyful", 0),
    ("joyful", 2),
    ("we", 4),
    ("adore", 5),
    ("thee,", 7),
    ("God", 8),
    ("of", 9),
    ("glory,", 10),
    ("Lord", 12),
    ("of", 13),
    ("love;", 14),
    ("Hearts", 15),
    ("unfold", 16),
    ("like", 18),
    ("flowers", 19),
    ("before", 21),
    ("thee,", 23),
    ("opening", 24),
    ("to", 26),
    ("the", 27),
    ("sun", 28),
    ("above.", 29),
];

/// "Ode to Joy": two phrases, a root-and-third bass line and hymn lyrics.
pub fn ode_to_joy() -> Song {
    let mut song = Song::new("Ode to Joy");

    for ending in [[NOTE_E4, NOTE_D4, NOTE_D4], [NOTE_D4, NOTE_C4, NOTE_C4]] {
        song.melody.extend(PHRASE.iter().map(|&f| Note::new(f, Q)));
        song.melody.push(Note::new(ending[0], DQ));
        song.melody.push(Note::new(ending[1], E));
        song.melody.push(Note::new(ending[2], H));
    }

    let tonic = [Note::new(NOTE_C3, H), Note::new(NOTE_E3, H)];
    let dominant = [Note::new(NOTE_G3, H), Note::new(NOTE_B3, H)];
    for bar in 0..8 {
        if bar == 7 {
            song.harmony.extend([Note::new(NOTE_G3, H), Note::new(NOTE_C3, H)]);
        } else if bar % 2 == 0 {
            song.harmony.extend(tonic);
        } else {
            song.harmony.extend(dominant);
        }
    }

    for (word, trigger) in LYRICS {
        song.add_lyric(word, trigger);
    }
    song
}
