//! Binary `.bdz` song format.
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! "BDZ1"
//! u8 title_len, title bytes (UTF-8)
//! u16 melody_len,  melody_len  x (u16 frequency, u16 duration)
//! u16 harmony_len, harmony_len x (u16 frequency, u16 duration)
//! u16 lyric_len,   lyric_len   x (u16 trigger, u8 text_len, text bytes)
//! ```

use std::fs;
use std::io::{Cursor, ErrorKind};
use std::path::Path;

use bd_ir::{Note, OwnedLyric, Song};
use binrw::{binrw, BinRead, BinWrite};

use crate::FormatError;

pub const BDZ_MAGIC: &[u8; 4] = b"BDZ1";

#[binrw]
#[brw(little)]
#[derive(Debug)]
struct RawNote {
    frequency: u16,
    duration: u16,
}

#[binrw]
#[brw(little)]
#[derive(Debug)]
struct RawLyric {
    trigger: u16,
    #[bw(calc = text.len() as u8)]
    text_len: u8,
    #[br(count = text_len)]
    text: Vec<u8>,
}

#[binrw]
#[brw(little, magic = b"BDZ1")]
#[derive(Debug)]
struct RawSong {
    #[bw(calc = title.len() as u8)]
    title_len: u8,
    #[br(count = title_len)]
    title: Vec<u8>,
    #[bw(calc = melody.len() as u16)]
    melody_len: u16,
    #[br(count = melody_len)]
    melody: Vec<RawNote>,
    #[bw(calc = harmony.len() as u16)]
    harmony_len: u16,
    #[br(count = harmony_len)]
    harmony: Vec<RawNote>,
    #[bw(calc = lyrics.len() as u16)]
    lyric_len: u16,
    #[br(count = lyric_len)]
    lyrics: Vec<RawLyric>,
}

/// Decode a `.bdz` image.
pub fn from_bdz(data: &[u8]) -> Result<Song, FormatError> {
    let raw = RawSong::read(&mut Cursor::new(data)).map_err(map_read_error)?;

    let mut song = Song::new(&String::from_utf8_lossy(&raw.title));
    song.melody = to_notes(&raw.melody, "melody")?;
    song.harmony = to_notes(&raw.harmony, "harmony")?;
    song.lyrics = raw
        .lyrics
        .into_iter()
        .map(|l| OwnedLyric {
            text: String::from_utf8_lossy(&l.text).into_owned(),
            trigger: l.trigger,
        })
        .collect();
    Ok(song)
}

/// Encode a song as a `.bdz` image.
pub fn to_bdz(song: &Song) -> Result<Vec<u8>, FormatError> {
    let raw = RawSong {
        title: song.title.as_bytes().to_vec(),
        melody: from_notes(&song.melody, "melody")?,
        harmony: from_notes(&song.harmony, "harmony")?,
        lyrics: song
            .lyrics
            .iter()
            .map(|l| {
                if l.text.len() > u8::MAX as usize {
                    return Err(FormatError::TooLong { what: "lyric text" });
                }
                Ok(RawLyric { trigger: l.trigger, text: l.text.as_bytes().to_vec() })
            })
            .collect::<Result<_, _>>()?,
    };
    if raw.lyrics.len() > u16::MAX as usize {
        return Err(FormatError::TooLong { what: "lyric table" });
    }

    let mut out = Cursor::new(Vec::new());
    raw.write(&mut out)?;
    Ok(out.into_inner())
}

pub fn save_bdz(song: &Song, path: impl AsRef<Path>) -> Result<(), FormatError> {
    fs::write(path, to_bdz(song)?)?;
    Ok(())
}

fn check_duration(duration: u16, part: &'static str, index: usize) -> Result<(), FormatError> {
    if duration == 0 {
        return Err(FormatError::ZeroDuration { part, index });
    }
    Ok(())
}

fn to_notes(raw: &[RawNote], part: &'static str) -> Result<Vec<Note>, FormatError> {
    raw.iter()
        .enumerate()
        .map(|(index, n)| {
            check_duration(n.duration, part, index)?;
            Ok(Note::new(n.frequency, n.duration))
        })
        .collect()
}

fn from_notes(notes: &[Note], part: &'static str) -> Result<Vec<RawNote>, FormatError> {
    if notes.len() > u16::MAX as usize {
        return Err(FormatError::TooLong { what: part });
    }
    notes
        .iter()
        .enumerate()
        .map(|(index, n)| {
            check_duration(n.duration, part, index)?;
            Ok(RawNote { frequency: n.frequency, duration: n.duration })
        })
        .collect()
}

fn map_read_error(err: binrw::Error) -> FormatError {
    match err {
        binrw::Error::BadMagic { .. } => FormatError::InvalidHeader,
        binrw::Error::Io(ref io) if io.kind() == ErrorKind::UnexpectedEof => {
            FormatError::UnexpectedEof
        }
        other => FormatError::Binary(other),
    }
}
