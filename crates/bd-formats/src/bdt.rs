//! Text `.bdt` song format.
//!
//! One directive per line. Blank lines and lines starting with `#` are
//! ignored.
//!
//! ```text
//! title: Ode to Joy
//! melody: E4/400 E4/400 F4/400 G4/400 R/200
//! harmony: C3/800 440/800
//! lyrics: Joy@0 ful@2
//! ```
//!
//! A note is `PITCH/ms` where `PITCH` is a name like `C#4`, a raw frequency
//! in Hz, or `R` for a rest. `melody:`, `harmony:` and `lyrics:` append, so
//! long parts can span several lines.
//!
//! A lyric is `text@note`. `@note` alone is a pause (empty text). Inside the
//! text, `\s` is a space, `\\` a backslash and `\u{..}` any other
//! whitespace character.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use bd_ir::pitch::{midi_to_hz, parse_pitch};
use bd_ir::{Note, Song};

use crate::FormatError;

/// Parse a `.bdt` score.
pub fn parse_bdt(text: &str) -> Result<Song, FormatError> {
    let mut song = Song::default();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once(':') else {
            return Err(FormatError::parse(line, "expected `key: value`"));
        };
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "title" => song.set_title(value),
            "melody" => parse_notes(value, line, &mut song.melody)?,
            "harmony" => parse_notes(value, line, &mut song.harmony)?,
            "lyrics" => {
                for token in value.split_whitespace() {
                    let (text, trigger) = parse_lyric(token, line)?;
                    song.add_lyric(&text, trigger);
                }
            }
            other => return Err(FormatError::parse(line, format!("unknown directive `{other}`"))),
        }
    }
    Ok(song)
}

fn parse_notes(value: &str, line: usize, out: &mut Vec<Note>) -> Result<(), FormatError> {
    for token in value.split_whitespace() {
        out.push(parse_note(token, line)?);
    }
    Ok(())
}

fn parse_note(token: &str, line: usize) -> Result<Note, FormatError> {
    let Some((pitch, ms)) = token.split_once('/') else {
        return Err(FormatError::parse(line, format!("note `{token}` needs a `/duration`")));
    };
    let duration: u16 = ms
        .parse()
        .ok()
        .filter(|&d| d > 0)
        .ok_or_else(|| FormatError::parse(line, format!("bad duration in `{token}`")))?;
    let frequency = if pitch.eq_ignore_ascii_case("r") {
        0
    } else if let Ok(hz) = pitch.parse::<u16>() {
        hz
    } else {
        parse_pitch(pitch)
            .map(midi_to_hz)
            .ok_or_else(|| FormatError::parse(line, format!("unknown pitch `{pitch}`")))?
    };
    Ok(Note::new(frequency, duration))
}

fn parse_lyric(token: &str, line: usize) -> Result<(String, u16), FormatError> {
    let Some((text, trigger)) = token
        .rsplit_once('@')
        .and_then(|(text, trigger)| Some((text, trigger.parse::<u16>().ok()?)))
    else {
        return Err(FormatError::parse(line, format!("lyric `{token}` should be word@note")));
    };
    let text = unescape(text)
        .ok_or_else(|| FormatError::parse(line, format!("bad escape in lyric `{token}`")))?;
    Ok((text, trigger))
}

fn unescape(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            's' => out.push(' '),
            '\\' => out.push('\\'),
            'u' => {
                let rest = chars.as_str().strip_prefix('{')?;
                let (hex, tail) = rest.split_once('}')?;
                out.push(char::from_u32(u32::from_str_radix(hex, 16).ok()?)?);
                chars = tail.chars();
            }
            _ => return None,
        }
    }
    Some(out)
}

fn escape(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            ' ' => out.push_str("\\s"),
            '\\' => out.push_str("\\\\"),
            c if c.is_whitespace() => {
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
}

/// Render a song as `.bdt` text. Pitches are written in Hz so nothing is
/// lost to rounding.
pub fn to_bdt(song: &Song) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "title: {}", song.title);
    write_notes(&mut out, "melody", &song.melody);
    write_notes(&mut out, "harmony", &song.harmony);
    for chunk in song.lyrics.chunks(8) {
        out.push_str("lyrics:");
        for lyric in chunk {
            out.push(' ');
            escape(&lyric.text, &mut out);
            let _ = write!(out, "@{}", lyric.trigger);
        }
        out.push('\n');
    }
    out
}

fn write_notes(out: &mut String, key: &str, notes: &[Note]) {
    for chunk in notes.chunks(8) {
        out.push_str(key);
        out.push(':');
        for note in chunk {
            if note.is_rest() {
                let _ = write!(out, " R/{}", note.duration);
            } else {
                let _ = write!(out, " {}/{}", note.frequency, note.duration);
            }
        }
        out.push('\n');
    }
}

pub fn save_bdt(song: &Song, path: impl AsRef<Path>) -> Result<(), FormatError> {
    fs::write(path, to_bdt(song))?;
    Ok(())
}
