//! Song file formats for the buzzduet sequencer.
//!
//! Two formats load into [`bd_ir::Song`]:
//!
//! - `.bdz`: compact little-endian binary, read and written with binrw.
//! - `.bdt`: a line-oriented text score meant to be written by hand.

mod bdt;
mod bdz;

use std::fs;
use std::path::Path;

use bd_ir::Song;
use thiserror::Error;
use tracing::{debug, warn};

pub use bdt::{parse_bdt, save_bdt, to_bdt};
pub use bdz::{from_bdz, save_bdz, to_bdz, BDZ_MAGIC};

/// Error type for format parsing.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid header or magic bytes")]
    InvalidHeader,
    #[error("unexpected end of file")]
    UnexpectedEof,
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("{what} is too long for the file format")]
    TooLong { what: &'static str },
    #[error("{part} note {index} has zero duration")]
    ZeroDuration { part: &'static str, index: usize },
    #[error("unsupported file extension: {0:?}")]
    UnsupportedFormat(String),
    #[error("binary format error: {0}")]
    Binary(#[from] binrw::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FormatError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        FormatError::Parse { line, message: message.into() }
    }
}

/// Load a song, picking the format from the file extension.
pub fn load_song(path: impl AsRef<Path>) -> Result<Song, FormatError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let song = match ext.as_str() {
        "bdz" => from_bdz(&fs::read(path)?)?,
        "bdt" => parse_bdt(&fs::read_to_string(path)?)?,
        _ => return Err(FormatError::UnsupportedFormat(ext)),
    };
    if !song.lyrics_sorted() {
        warn!(path = %path.display(), "lyric triggers are not in order");
    }
    debug!(
        path = %path.display(),
        title = song.title.as_str(),
        melody = song.melody.len(),
        harmony = song.harmony.len(),
        "song loaded"
    );
    Ok(song)
}

/// Save a song, picking the format from the file extension.
pub fn save_song(song: &Song, path: impl AsRef<Path>) -> Result<(), FormatError> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("bdz") => save_bdz(song, path),
        Some(ext) if ext.eq_ignore_ascii_case("bdt") => save_bdt(song, path),
        other => Err(FormatError::UnsupportedFormat(other.unwrap_or_default().to_string())),
    }
}
