//! Note and voice types.

/// A single tone in a voice's sequence.
///
/// Laid out as two little `u16`s so authored tables stay compact in flash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    /// Frequency in Hz (0 = rest)
    pub frequency: u16,
    /// How long the note lasts, in milliseconds
    pub duration: u16,
}

impl Note {
    /// Create a sounding note.
    pub const fn new(frequency: u16, duration: u16) -> Self {
        Self { frequency, duration }
    }

    /// Create a rest of the given length.
    pub const fn rest(duration: u16) -> Self {
        Self { frequency: 0, duration }
    }

    /// Returns true if this note is silent.
    pub const fn is_rest(self) -> bool {
        self.frequency == 0
    }
}

/// One of the two independently timed tone channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Voice {
    Melody,
    Harmony,
}

impl Voice {
    pub const ALL: [Voice; 2] = [Voice::Melody, Voice::Harmony];

    /// Index into per-voice arrays (melody = 0, harmony = 1).
    pub const fn index(self) -> usize {
        match self {
            Voice::Melody => 0,
            Voice::Harmony => 1,
        }
    }
}
