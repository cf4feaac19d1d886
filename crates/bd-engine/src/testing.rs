//! Recording collaborators for unit tests.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use bd_ir::{Pin, Voice};

use crate::hal::{CharDisplay, Clock, Delay, PwmOutput, RandomSource, ToneOutput};
use crate::time::Millis;

/// Remembers every tone command and what each voice is currently doing.
#[derive(Debug, Default)]
pub struct RecordingTone {
    /// (voice, Some(freq) for start / None for stop)
    pub events: Vec<(Voice, Option<u16>)>,
    pub sounding: [Option<u16>; 2],
}

impl RecordingTone {
    pub fn sounding(&self, voice: Voice) -> Option<u16> {
        self.sounding[voice.index()]
    }

    pub fn last(&self, voice: Voice) -> Option<Option<u16>> {
        self.events.iter().rev().find(|(v, _)| *v == voice).map(|(_, f)| *f)
    }
}

impl ToneOutput for RecordingTone {
    fn start_tone(&mut self, voice: Voice, frequency: u16) {
        self.events.push((voice, Some(frequency)));
        self.sounding[voice.index()] = Some(frequency);
    }

    fn stop_tone(&mut self, voice: Voice) {
        self.events.push((voice, None));
        self.sounding[voice.index()] = None;
    }
}

/// Keeps the last level written to each pin.
#[derive(Debug, Default)]
pub struct RecordingPwm {
    pub levels: BTreeMap<Pin, u8>,
    pub writes: usize,
}

impl RecordingPwm {
    pub fn level(&self, pin: Pin) -> Option<u8> {
        self.levels.get(&pin).copied()
    }
}

impl PwmOutput for RecordingPwm {
    fn write_intensity(&mut self, pin: Pin, level: u8) {
        self.levels.insert(pin, level);
        self.writes += 1;
    }
}

/// In-memory character grid that truncates like a real LCD.
#[derive(Debug)]
pub struct TestGrid {
    pub cells: Vec<Vec<char>>,
    pub cursor: (usize, usize),
    pub clears: usize,
    pub prints: usize,
}

impl TestGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cells: vec![vec![' '; cols]; rows],
            cursor: (0, 0),
            clears: 0,
            prints: 0,
        }
    }

    pub fn row(&self, row: usize) -> String {
        self.cells[row].iter().collect()
    }
}

impl CharDisplay for TestGrid {
    fn clear(&mut self) {
        for row in self.cells.iter_mut() {
            row.iter_mut().for_each(|c| *c = ' ');
        }
        self.cursor = (0, 0);
        self.clears += 1;
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.cursor = (col as usize, row as usize);
    }

    fn print(&mut self, text: &str) {
        self.prints += 1;
        let (mut col, row) = self.cursor;
        let Some(cells) = self.cells.get_mut(row) else {
            return;
        };
        for c in text.chars() {
            if col >= cells.len() {
                break;
            }
            cells[col] = c;
            col += 1;
        }
        self.cursor = (col, row);
    }
}

/// Hand-driven clock shared between the test and the engine.
#[derive(Clone, Debug, Default)]
pub struct TestClock(Rc<Cell<Millis>>);

impl TestClock {
    pub fn at(now: Millis) -> Self {
        Self(Rc::new(Cell::new(now)))
    }

    pub fn set(&self, now: Millis) {
        self.0.set(now);
    }

    pub fn advance(&self, ms: Millis) {
        self.0.set(self.0.get().wrapping_add(ms));
    }
}

impl Clock for TestClock {
    fn now_millis(&self) -> Millis {
        self.0.get()
    }
}

/// Replays a fixed list of raw values, reduced into the requested range.
#[derive(Debug, Default)]
pub struct ScriptedRandom {
    pub values: Vec<u32>,
    pub pos: usize,
}

impl ScriptedRandom {
    pub fn new(values: &[u32]) -> Self {
        Self { values: values.to_vec(), pos: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn random_range(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let raw = if self.values.is_empty() { 0 } else { self.values[self.pos % self.values.len()] };
        self.pos += 1;
        min + raw % (max - min)
    }
}

/// Delay that only adds up how long it was asked to wait.
#[derive(Debug, Default)]
pub struct CountingDelay {
    pub total_ms: u32,
    pub calls: usize,
}

impl Delay for CountingDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms;
        self.calls += 1;
    }
}
