//! In-memory front panel: a character grid, five LED lamps and the two
//! tone outputs. The simulator and the live controller both render into
//! these and snapshot them as [`PanelFrame`]s.

use bd_audio::SquareOutput;
use bd_engine::{CharDisplay, Clock, Millis, PwmOutput, RandomSource, Sequencer, ToneOutput};
use bd_ir::{ChannelLevels, LedChannel, LedConfig, Pin, Voice};

/// Pin numbers the panel lamps answer to when no config binds any.
pub const PANEL_PINS: [i16; 5] = [0, 1, 2, 3, 4];

/// Character grid with HD44780 semantics: writes past the right edge or
/// below the last row are dropped.
#[derive(Clone, Debug)]
pub struct GridDisplay {
    cells: Vec<Vec<char>>,
    col: usize,
    row: usize,
}

impl GridDisplay {
    pub fn new(cols: u8, rows: u8) -> Self {
        Self {
            cells: vec![vec![' '; cols as usize]; rows as usize],
            col: 0,
            row: 0,
        }
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn row_text(&self, row: usize) -> String {
        self.cells.get(row).map(|r| r.iter().collect()).unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.rows()).map(|r| self.row_text(r)).collect()
    }
}

impl CharDisplay for GridDisplay {
    fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(' ');
        }
        self.col = 0;
        self.row = 0;
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.col = col as usize;
        self.row = row as usize;
    }

    fn print(&mut self, text: &str) {
        let Some(cells) = self.cells.get_mut(self.row) else {
            return;
        };
        for c in text.chars() {
            if let Some(cell) = cells.get_mut(self.col) {
                *cell = c;
            }
            self.col += 1;
        }
    }
}

/// Five lamps driven by pin number.
#[derive(Clone, Debug)]
pub struct LedPanel {
    config: LedConfig,
    levels: ChannelLevels,
}

impl LedPanel {
    pub fn new(config: LedConfig) -> Self {
        Self { config, levels: ChannelLevels::OFF }
    }

    /// The pin map the panel uses when nothing else is configured.
    pub fn default_config() -> LedConfig {
        LedConfig::from_raw(PANEL_PINS)
    }

    pub fn levels(&self) -> ChannelLevels {
        self.levels
    }
}

impl PwmOutput for LedPanel {
    fn write_intensity(&mut self, pin: Pin, level: u8) {
        for channel in LedChannel::ALL {
            if self.config.pin(channel) == Some(pin) {
                self.levels.set(channel, level);
            }
        }
    }
}

/// Remembers what each voice is sounding, optionally forwarding to a
/// speaker.
pub struct ToneLog {
    speaker: Option<SquareOutput>,
    sounding: [u16; 2],
    starts: u32,
}

impl ToneLog {
    /// Track tones without making any sound.
    pub fn silent() -> Self {
        Self { speaker: None, sounding: [0; 2], starts: 0 }
    }

    pub fn with_speaker(speaker: SquareOutput) -> Self {
        Self { speaker: Some(speaker), ..Self::silent() }
    }

    pub fn has_speaker(&self) -> bool {
        self.speaker.is_some()
    }

    /// Frequency per voice, 0 when silent.
    pub fn sounding(&self) -> [u16; 2] {
        self.sounding
    }

    /// Number of `start_tone` calls seen so far.
    pub fn starts(&self) -> u32 {
        self.starts
    }
}

impl ToneOutput for ToneLog {
    fn start_tone(&mut self, voice: Voice, frequency: u16) {
        self.sounding[voice.index()] = frequency;
        self.starts += 1;
        if let Some(speaker) = self.speaker.as_mut() {
            speaker.start_tone(voice, frequency);
        }
    }

    fn stop_tone(&mut self, voice: Voice) {
        self.sounding[voice.index()] = 0;
        if let Some(speaker) = self.speaker.as_mut() {
            speaker.stop_tone(voice);
        }
    }
}

/// A sequencer wired to the in-memory panel.
pub type PanelSequencer<'a, C, R> = Sequencer<'a, ToneLog, LedPanel, GridDisplay, C, R>;

/// What the panel shows at one instant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelFrame {
    pub time: Millis,
    pub lcd: Vec<String>,
    pub leds: ChannelLevels,
    /// Melody and harmony frequency, 0 when silent
    pub tones: [u16; 2],
}

impl PanelFrame {
    pub fn capture(time: Millis, lcd: &GridDisplay, leds: &LedPanel, tones: &ToneLog) -> Self {
        Self {
            time,
            lcd: lcd.lines(),
            leds: leds.levels(),
            tones: tones.sounding(),
        }
    }

    pub fn of<C: Clock, R: RandomSource>(sequencer: &PanelSequencer<'_, C, R>, time: Millis) -> Self {
        Self {
            time,
            lcd: sequencer.display().map(GridDisplay::lines).unwrap_or_default(),
            leds: sequencer.leds().pwm().levels(),
            tones: sequencer.tone().sounding(),
        }
    }

    /// Equal apart from the timestamp.
    pub fn same_view(&self, other: &Self) -> bool {
        self.lcd == other.lcd && self.leds == other.leds && self.tones == other.tones
    }
}
