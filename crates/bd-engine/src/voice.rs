//! Per-voice note timeline.
//!
//! A `VoiceTimeline` walks one borrowed note sequence against the wall
//! clock. It crosses at most one note boundary per [`advance`] call: if the
//! host polls too slowly, timing drifts late but never skips a note.
//!
//! [`advance`]: VoiceTimeline::advance

use bd_ir::{Note, Voice};

use crate::hal::ToneOutput;
use crate::time::{elapsed, Millis};

/// Outcome of one [`VoiceTimeline::advance`] poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Voice is not playing.
    Idle,
    /// Current note still has time left.
    Held,
    /// Moved on to the next note, which is now sounding (or resting).
    Changed,
    /// Ran off the end of the sequence and stopped.
    Finished,
}

/// Playback state for one voice.
#[derive(Clone, Debug)]
pub struct VoiceTimeline<'a> {
    voice: Voice,
    notes: &'a [Note],
    /// Index of the sounding note; equals `notes.len()` after the last one
    cursor: usize,
    playing: bool,
    /// Clock reading when the current note began
    segment_start: Millis,
}

impl<'a> VoiceTimeline<'a> {
    pub const fn new(voice: Voice) -> Self {
        Self {
            voice,
            notes: &[],
            cursor: 0,
            playing: false,
            segment_start: 0,
        }
    }

    /// Replace the sequence and rewind. Playing state is left alone unless
    /// the new sequence is empty.
    pub fn configure(&mut self, notes: &'a [Note]) {
        self.notes = notes;
        self.cursor = 0;
        if notes.is_empty() {
            self.playing = false;
        }
    }

    /// Start from the first note. Returns false (and does nothing) if
    /// there is nothing to play.
    pub fn start<T: ToneOutput>(&mut self, now: Millis, tone: &mut T) -> bool {
        let Some(&first) = self.notes.first() else {
            return false;
        };
        self.playing = true;
        self.cursor = 0;
        self.segment_start = now;
        emit(tone, self.voice, first);
        true
    }

    /// Silence the voice. Safe to call repeatedly.
    pub fn stop<T: ToneOutput>(&mut self, tone: &mut T) {
        self.playing = false;
        tone.stop_tone(self.voice);
    }

    /// Move to the next note if the current one has run its full duration.
    pub fn advance<T: ToneOutput>(&mut self, now: Millis, tone: &mut T) -> Advance {
        if !self.playing {
            return Advance::Idle;
        }
        let Some(current) = self.notes.get(self.cursor) else {
            self.stop(tone);
            return Advance::Finished;
        };
        if elapsed(now, self.segment_start) < current.duration as Millis {
            return Advance::Held;
        }

        self.cursor += 1;
        match self.notes.get(self.cursor) {
            Some(&next) => {
                self.segment_start = now;
                emit(tone, self.voice, next);
                Advance::Changed
            }
            None => {
                self.stop(tone);
                Advance::Finished
            }
        }
    }

    pub fn voice(&self) -> Voice {
        self.voice
    }

    pub fn notes(&self) -> &'a [Note] {
        self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn segment_start(&self) -> Millis {
        self.segment_start
    }

    /// The sounding note, if playing.
    pub fn current_note(&self) -> Option<Note> {
        if self.playing {
            self.notes.get(self.cursor).copied()
        } else {
            None
        }
    }

    /// Frequency being produced right now (0 when resting or stopped).
    pub fn frequency(&self) -> u16 {
        self.current_note().map_or(0, |n| n.frequency)
    }
}

/// Start the note's tone, or silence the voice for a rest.
fn emit<T: ToneOutput>(tone: &mut T, voice: Voice, note: Note) {
    if note.is_rest() {
        tone.stop_tone(voice);
    } else {
        tone.start_tone(voice, note.frequency);
    }
}
