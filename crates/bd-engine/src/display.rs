//! Lyric and idle rendering for the character display.
//!
//! Two modes share the grid. While the melody plays, the full lyric line
//! scrolls so the current word sits near the centre, with a row of animated
//! markers under it. Once playback stops, an idle screen with a scrolling
//! message and a wave runs at a fixed 300 ms cadence.

use arrayvec::ArrayString;
use bd_ir::{lyric_at, words, LyricEntry};

use crate::hal::CharDisplay;
use crate::time::{Millis, Throttle};

/// Minimum time between two idle frames.
pub const IDLE_INTERVAL_MS: Millis = 300;
/// Idle animation step wraps here.
pub const IDLE_STEP_WRAP: u16 = 2000;
/// Each marker glyph phase lasts this long.
pub const MARKER_PHASE_MS: Millis = 200;
/// Widest grid supported.
pub const MAX_COLS: usize = 40;
/// Capacity of the word lyric table.
pub const MAX_WORDS: usize = 64;

pub const DEFAULT_IDLE_MESSAGE: &str = "     Please select a new song to play!     ";

const MARKER_GLYPHS: [char; 4] = ['.', 'o', 'O', 'o'];
const WAVE_GLYPHS: [char; 16] = [
    ' ', '.', '-', '=', '#', '=', '-', '.', ' ', '.', '-', '=', '#', '=', '-', '.',
];
const WAVE_HIGHLIGHT: char = '*';

/// One display row, room for `MAX_COLS` chars of any width.
type Row = ArrayString<{ MAX_COLS * 4 }>;

/// The lyric table the sequencer shows.
#[derive(Clone, Debug, Default)]
pub enum Lyrics<'a> {
    #[default]
    None,
    /// Caller-owned table of entries
    Borrowed(&'a [LyricEntry<'a>]),
    /// Words split out of a single string, word `i` at note `i`
    Words(heapless::Vec<LyricEntry<'a>, MAX_WORDS>),
}

impl<'a> Lyrics<'a> {
    /// Split `text` on spaces. Returns the table and how many words did
    /// not fit.
    pub fn from_text(text: &'a str) -> (Self, usize) {
        let mut table = heapless::Vec::new();
        let mut dropped = 0;
        for entry in words(text) {
            if table.push(entry).is_err() {
                dropped += 1;
            }
        }
        (Lyrics::Words(table), dropped)
    }

    pub fn entries(&self) -> &[LyricEntry<'a>] {
        match self {
            Lyrics::None => &[],
            Lyrics::Borrowed(entries) => entries,
            Lyrics::Words(table) => table.as_slice(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Display-side state: which lyric is current and where the idle
/// animation is.
#[derive(Clone, Debug)]
pub struct DisplaySync<'a> {
    cols: u8,
    rows: u8,
    lyric: Option<usize>,
    idle: bool,
    idle_step: u16,
    idle_throttle: Throttle,
    idle_message: &'a str,
}

impl<'a> DisplaySync<'a> {
    /// Columns beyond [`MAX_COLS`] are ignored.
    pub fn new(cols: u8, rows: u8) -> Self {
        Self {
            cols: cols.min(MAX_COLS as u8),
            rows,
            lyric: None,
            idle: false,
            idle_step: 0,
            idle_throttle: Throttle::new(),
            idle_message: DEFAULT_IDLE_MESSAGE,
        }
    }

    pub fn set_geometry(&mut self, cols: u8, rows: u8) {
        self.cols = cols.min(MAX_COLS as u8);
        self.rows = rows;
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn set_idle_message(&mut self, message: &'a str) {
        self.idle_message = message;
    }

    pub fn idle_message(&self) -> &'a str {
        self.idle_message
    }

    pub fn lyric(&self) -> Option<usize> {
        self.lyric
    }

    pub fn reset_lyric(&mut self) {
        self.lyric = None;
    }

    pub fn is_idle(&self) -> bool {
        self.idle
    }

    pub fn idle_step(&self) -> u16 {
        self.idle_step
    }

    /// Latch idle mode and make the next idle render fire immediately.
    pub fn enter_idle(&mut self) {
        self.idle = true;
        self.idle_step = 0;
        self.idle_throttle.reset();
    }

    pub fn leave_idle(&mut self) {
        self.idle = false;
    }

    /// Pick the lyric for the melody cursor and repaint.
    pub fn sync_lyric<D: CharDisplay>(
        &mut self,
        display: &mut D,
        entries: &[LyricEntry<'_>],
        cursor: usize,
        now: Millis,
    ) {
        self.lyric = lyric_at(entries, cursor);
        self.render_lyrics(display, entries, now);
    }

    /// Clear the grid and draw the lyric line with the current word
    /// centred where possible.
    pub fn render_lyrics<D: CharDisplay>(
        &self,
        display: &mut D,
        entries: &[LyricEntry<'_>],
        now: Millis,
    ) {
        display.clear();
        let Some(current) = self.lyric.filter(|&i| i < entries.len()) else {
            return;
        };
        let cols = self.cols as usize;

        let word_start: usize = entries[..current]
            .iter()
            .map(|e| e.text.chars().count() + 1)
            .sum();
        let word_len = entries[current].text.chars().count();
        let total = entries.iter().map(|e| e.text.chars().count()).sum::<usize>()
            + entries.len().saturating_sub(1);

        let mut start = 0;
        if word_start >= cols / 2 {
            start = word_start - cols / 2 + word_len / 2;
        }
        if start + cols > total {
            start = total.saturating_sub(cols);
        }

        let top = window(entries, start, cols);

        let mut markers = [' '; MAX_COLS];
        if word_len > 0 && word_start >= start && word_start - start < cols {
            let rel = word_start - start;
            let count = word_len.min(3);
            let spacing = (word_len / count).max(1);
            let phase = (now / MARKER_PHASE_MS) as usize;
            for i in 0..count {
                let col = rel + i * spacing;
                if col < cols {
                    markers[col] = MARKER_GLYPHS[(phase + i) % MARKER_GLYPHS.len()];
                }
            }
        }
        let mut bottom = Row::new();
        for &c in &markers[..cols] {
            push_char(&mut bottom, c);
        }

        self.print_rows(display, &top, &bottom);
    }

    /// Draw one idle frame if the 300 ms window has passed. Returns true
    /// if a frame was drawn.
    pub fn render_idle<D: CharDisplay>(&mut self, display: &mut D, now: Millis) -> bool {
        if !self.idle_throttle.try_fire(now, IDLE_INTERVAL_MS) {
            return false;
        }
        let cols = self.cols as usize;
        let step = self.idle_step as usize;

        let mut top = Row::new();
        let msg_len = self.idle_message.chars().count();
        if msg_len > 0 {
            let scroll = (step / 2) % (msg_len + cols);
            for c in self.idle_message.chars().cycle().skip(scroll % msg_len).take(cols) {
                push_char(&mut top, c);
            }
        }
        pad(&mut top, cols);

        let mut bottom = Row::new();
        for col in 0..cols {
            let phase = (step / 3 + col * 3) % WAVE_GLYPHS.len();
            let glyph = if col % 6 == 0 && (phase == 4 || phase == 12) {
                WAVE_HIGHLIGHT
            } else {
                WAVE_GLYPHS[phase]
            };
            push_char(&mut bottom, glyph);
        }

        self.print_rows(display, &top, &bottom);
        self.idle_step = (self.idle_step + 1) % IDLE_STEP_WRAP;
        true
    }

    fn print_rows<D: CharDisplay>(&self, display: &mut D, top: &str, bottom: &str) {
        if self.rows == 0 {
            return;
        }
        display.set_cursor(0, 0);
        display.print(top);
        if self.rows >= 2 {
            display.set_cursor(0, 1);
            display.print(bottom);
        }
    }
}

/// `cols` characters of the space-joined lyric line starting at `start`,
/// padded with spaces.
fn window(entries: &[LyricEntry<'_>], start: usize, cols: usize) -> Row {
    let mut row = Row::new();
    let end = start + cols;
    let mut pos = 0;
    for (i, entry) in entries.iter().enumerate() {
        let sep = if i > 0 { Some(' ') } else { None };
        for c in sep.into_iter().chain(entry.text.chars()) {
            if pos >= start && pos < end {
                push_char(&mut row, c);
            }
            pos += 1;
        }
        if pos >= end {
            break;
        }
    }
    pad(&mut row, cols);
    row
}

fn push_char(row: &mut Row, c: char) {
    // Capacity covers MAX_COLS four-byte chars
    let _ = row.try_push(c);
}

fn pad(row: &mut Row, cols: usize) {
    for _ in row.chars().count()..cols {
        push_char(row, ' ');
    }
}
