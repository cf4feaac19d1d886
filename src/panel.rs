//! Terminal rendering of the front panel.

use std::fmt::Write as _;
use std::io::{self, Write};

use bd_host::{ChannelLevels, LedChannel, LedPattern, PanelFrame, Song};

const HOME: &str = "\x1b[H";
const CLEAR: &str = "\x1b[2J";
const RESET: &str = "\x1b[0m";

/// Live panel redrawn in place whenever it changes.
pub struct Screen {
    title: String,
    last: Option<PanelFrame>,
}

impl Screen {
    pub fn new(song: &Song) -> Self {
        print!("{CLEAR}");
        Self { title: song.title.to_string(), last: None }
    }

    pub fn draw(&mut self, frame: &PanelFrame) {
        if self.last.as_ref().is_some_and(|l| l.same_view(frame)) {
            return;
        }
        let width = frame.lcd.first().map_or(0, |r| r.chars().count());
        let mut out = String::new();
        let _ = writeln!(out, "{HOME}{}", self.title);
        let _ = writeln!(out, "+{}+", "-".repeat(width));
        for row in &frame.lcd {
            let _ = writeln!(out, "|{row}|");
        }
        let _ = writeln!(out, "+{}+", "-".repeat(width));
        let _ = writeln!(out, "{}", lamps(frame.leds));
        let _ = writeln!(out, "melody {:>5} Hz   harmony {:>5} Hz", frame.tones[0], frame.tones[1]);

        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(out.as_bytes());
        let _ = stdout.flush();
        self.last = Some(frame.clone());
    }

    pub fn finish(&self) {
        println!("{RESET}");
    }
}

fn rgb(channel: LedChannel) -> (u16, u16, u16) {
    match channel {
        LedChannel::Red => (255, 0, 0),
        LedChannel::Green => (0, 255, 0),
        LedChannel::Blue => (0, 80, 255),
        LedChannel::Yellow => (255, 220, 0),
        LedChannel::White => (255, 255, 255),
    }
}

/// One coloured block per channel, brightness following the level.
fn lamps(levels: ChannelLevels) -> String {
    let mut out = String::new();
    for channel in LedChannel::ALL {
        let level = levels.get(channel) as u16;
        let (r, g, b) = rgb(channel);
        let _ = write!(
            out,
            "\x1b[48;2;{};{};{}m {} {RESET} ",
            r * level / 255,
            g * level / 255,
            b * level / 255,
            &channel.name()[..1],
        );
    }
    out
}

/// Plain one-line rendering for simulation output.
pub fn line(frame: &PanelFrame) -> String {
    let leds: Vec<String> = frame.leds.0.iter().map(|l| format!("{l:3}")).collect();
    format!(
        "{:>7} ms | {} | leds {} | {:>4} {:>4} Hz",
        frame.time,
        frame.lcd.join(" | "),
        leds.join(" "),
        frame.tones[0],
        frame.tones[1],
    )
}

pub fn describe(pattern: LedPattern) -> &'static str {
    match pattern {
        LedPattern::FrequencyBands => "one channel per frequency band either voice is in",
        LedPattern::BeatPulse => "decaying pulse on the melody's band",
        LedPattern::RainbowChase => "colour chase that ignores the music",
        LedPattern::VuMeter => "bar graph of the average pitch",
        LedPattern::DiscoStrobe => "100 ms strobe on a slowly rotating channel",
        LedPattern::RandomNotes => "random channel per note with a sparkle on change",
        LedPattern::NoteMapping => "fixed colour per pitch",
    }
}
