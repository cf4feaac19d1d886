use std::io;

use bd_audio::AudioError;
use bd_formats::FormatError;
use thiserror::Error;

/// Anything the host can fail at.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("song file: {0}")]
    Format(#[from] FormatError),
    #[error("audio: {0}")]
    Audio(#[from] AudioError),
    #[error("config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("unknown LED pattern {0:?}")]
    UnknownPattern(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, HostError>;
