//! Owned song container produced by the file formats.

use alloc::string::String;
use alloc::vec::Vec;
use arrayvec::ArrayString;

use crate::lyrics::LyricEntry;
use crate::note::Note;

/// A lyric entry that owns its text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedLyric {
    pub text: String,
    pub trigger: u16,
}

/// A complete two-voice song.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Song {
    /// Song title
    pub title: ArrayString<32>,
    /// Melody voice
    pub melody: Vec<Note>,
    /// Harmony voice
    pub harmony: Vec<Note>,
    /// Lyrics keyed to the melody cursor, in trigger order
    pub lyrics: Vec<OwnedLyric>,
}

impl Song {
    /// Create an empty song. Titles longer than 32 bytes are cut at a char
    /// boundary.
    pub fn new(title: &str) -> Self {
        let mut song = Self::default();
        song.set_title(title);
        song
    }

    pub fn set_title(&mut self, title: &str) {
        self.title.clear();
        for c in title.chars() {
            if self.title.try_push(c).is_err() {
                break;
            }
        }
    }

    pub fn add_lyric(&mut self, text: &str, trigger: u16) {
        self.lyrics.push(OwnedLyric { text: String::from(text), trigger });
    }

    /// Borrowed lyric table suitable for the engine.
    pub fn lyric_entries(&self) -> Vec<LyricEntry<'_>> {
        self.lyrics
            .iter()
            .map(|l| LyricEntry::new(&l.text, l.trigger))
            .collect()
    }

    /// Total melody length in milliseconds.
    pub fn melody_ms(&self) -> u32 {
        self.melody.iter().map(|n| n.duration as u32).sum()
    }

    /// Length of the longer voice in milliseconds.
    pub fn duration_ms(&self) -> u32 {
        let harmony: u32 = self.harmony.iter().map(|n| n.duration as u32).sum();
        self.melody_ms().max(harmony)
    }

    /// Returns true if the lyric triggers never decrease.
    pub fn lyrics_sorted(&self) -> bool {
        self.lyrics.windows(2).all(|w| w[0].trigger <= w[1].trigger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_titles_are_truncated() {
        let song = Song::new("A very long title that will not fit in thirty two bytes");
        assert_eq!(song.title.len(), 32);
        assert!(song.title.starts_with("A very long title"));
    }

    #[test]
    fn duration_uses_longer_voice() {
        let mut song = Song::new("t");
        song.melody = alloc::vec![Note::new(440, 500), Note::rest(250)];
        song.harmony = alloc::vec![Note::new(220, 1000)];
        assert_eq!(song.melody_ms(), 750);
        assert_eq!(song.duration_ms(), 1000);
    }

    #[test]
    fn lyric_entries_borrow_text() {
        let mut song = Song::new("t");
        song.add_lyric("hi", 0);
        song.add_lyric("there", 3);
        let entries = song.lyric_entries();
        assert_eq!(entries[1], LyricEntry::new("there", 3));
        assert!(song.lyrics_sorted());
        song.add_lyric("oops", 1);
        assert!(!song.lyrics_sorted());
    }
}
