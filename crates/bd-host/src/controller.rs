//! Real-time playback on the sound card.

use std::sync::atomic::{AtomicBool, Ordering};

use bd_audio::SquareOutput;
use bd_engine::{Clock, Delay, Millis, Sequencer, SequencerConfig};
use bd_ir::{Song, Voice};
use tracing::{info, warn};

use crate::clock::{SystemClock, ThreadDelay};
use crate::config::for_panel;
use crate::error::Result;
use crate::panel::{GridDisplay, LedPanel, PanelFrame, ToneLog};
use crate::random::ThreadRandom;

/// How the controller gets its tones out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AudioMode {
    /// Use the sound card if there is one, otherwise play silently
    #[default]
    Auto,
    /// Fail if the sound card cannot be opened
    Required,
    /// Never open the sound card
    Silent,
}

/// Drives a sequencer from the wall clock.
#[derive(Clone, Copy, Debug)]
pub struct Controller {
    config: SequencerConfig,
    audio: AudioMode,
    tick_ms: u32,
    idle_tail_ms: Millis,
}

impl Controller {
    pub fn new(config: SequencerConfig) -> Self {
        Self { config, audio: AudioMode::Auto, tick_ms: 5, idle_tail_ms: 3000 }
    }

    pub fn audio(mut self, mode: AudioMode) -> Self {
        self.audio = mode;
        self
    }

    /// How long the idle screen keeps running after the song ends.
    pub fn idle_tail(mut self, ms: Millis) -> Self {
        self.idle_tail_ms = ms;
        self
    }

    fn open_tone(&self) -> Result<ToneLog> {
        if self.audio == AudioMode::Silent {
            return Ok(ToneLog::silent());
        }
        match SquareOutput::new() {
            Ok(speaker) => Ok(ToneLog::with_speaker(speaker)),
            Err(err) if self.audio == AudioMode::Auto => {
                warn!(%err, "no audio output, playing silently");
                Ok(ToneLog::silent())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Play `song` until it ends (plus the idle tail) or `stop` is set.
    /// `draw` sees the panel every tick.
    pub fn run<F: FnMut(&PanelFrame)>(&self, song: &Song, stop: &AtomicBool, mut draw: F) -> Result<()> {
        let (config, geometry) = for_panel(self.config);
        let entries = song.lyric_entries();

        let mut sequencer = Sequencer::new(
            self.open_tone()?,
            LedPanel::new(config.leds),
            SystemClock::new(),
            ThreadRandom,
        )
        .with_display(GridDisplay::new(geometry.cols, geometry.rows), geometry);
        sequencer.configure(&config);
        sequencer.set_song(&song.melody, &song.harmony);
        sequencer.set_lyrics(&entries);
        sequencer.play();
        info!(title = %song.title, ms = song.duration_ms(), pattern = config.pattern.name(), "playing");

        let mut delay = ThreadDelay;
        let mut ended_at = None;
        loop {
            if stop.load(Ordering::Relaxed) {
                sequencer.stop();
                info!("stopped");
                break;
            }
            sequencer.update();
            let now = sequencer.clock().now_millis();
            draw(&PanelFrame::of(&sequencer, now));

            if sequencer.is_playing() {
                ended_at = None;
            } else if now.wrapping_sub(*ended_at.get_or_insert(now)) >= self.idle_tail_ms {
                info!("finished");
                break;
            }
            delay.delay_ms(self.tick_ms);
        }
        Ok(())
    }

    /// Play one voice with the blocking player, lighting the pitch colour
    /// for each note. Returns the panel as it was left.
    pub fn run_blocking(&self, song: &Song, voice: Voice) -> Result<PanelFrame> {
        let (config, _) = for_panel(self.config);
        let mut sequencer =
            Sequencer::new(self.open_tone()?, LedPanel::new(config.leds), SystemClock::new(), ThreadRandom);
        sequencer.configure(&config);

        let notes = match voice {
            Voice::Melody => &song.melody,
            Voice::Harmony => &song.harmony,
        };
        info!(title = %song.title, ?voice, notes = notes.len(), "playing blocking");
        sequencer.play_sequence_with_leds(notes, voice, &mut ThreadDelay);

        let now = sequencer.clock().now_millis();
        let (tone, leds, _, _, _) = sequencer.release();
        Ok(PanelFrame::capture(now, &GridDisplay::new(0, 0), &leds, &tone))
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(SequencerConfig::default())
    }
}
