//! The cooperative scheduler.
//!
//! [`Sequencer::update`] is the only thing the host loop has to call. Each
//! call samples the clock once, then in order:
//!
//! 1. advances the melody (and repaints the lyric on a note change),
//! 2. advances the harmony,
//! 3. drops into idle mode if the song just ended,
//! 4. draws an idle frame if idle and nothing is playing,
//! 5. renders an LED frame if the LED interval has passed.
//!
//! The LED step comes last so patterns always see this tick's frequencies.

use bd_ir::{ChannelLevels, LedConfig, LedPattern, LyricEntry, Note, Voice};
use tracing::{debug, trace, warn};

use crate::config::{DisplayGeometry, SequencerConfig, DEFAULT_LED_INTERVAL_MS};
use crate::display::{DisplaySync, Lyrics};
use crate::hal::{CharDisplay, Clock, Delay, NoDisplay, PwmOutput, RandomSource, ToneOutput};
use crate::leds::LedBank;
use crate::patterns::{note_color, PatternEngine, VoiceFrame};
use crate::player::play_blocking;
use crate::time::{Millis, Throttle};
use crate::voice::{Advance, VoiceTimeline};

/// Two-voice sequencer with lyric display and LED patterns.
///
/// Borrowed note and lyric data must outlive the sequencer (`'a`).
pub struct Sequencer<'a, T, P, D, C, R> {
    tone: T,
    leds: LedBank<P>,
    display: Option<D>,
    clock: C,
    rng: R,
    melody: VoiceTimeline<'a>,
    harmony: VoiceTimeline<'a>,
    lyrics: Lyrics<'a>,
    screen: DisplaySync<'a>,
    patterns: PatternEngine,
    led_interval: Millis,
    led_throttle: Throttle,
    /// Playing state as of the end of the last update
    was_playing: bool,
}

impl<'a, T, P, C, R> Sequencer<'a, T, P, NoDisplay, C, R>
where
    T: ToneOutput,
    P: PwmOutput,
    C: Clock,
    R: RandomSource,
{
    /// A sequencer with no display and LEDs disabled.
    pub fn new(tone: T, pwm: P, clock: C, rng: R) -> Self {
        let geometry = DisplayGeometry::default();
        Self {
            tone,
            leds: LedBank::new(pwm),
            display: None,
            clock,
            rng,
            melody: VoiceTimeline::new(Voice::Melody),
            harmony: VoiceTimeline::new(Voice::Harmony),
            lyrics: Lyrics::None,
            screen: DisplaySync::new(geometry.cols, geometry.rows),
            patterns: PatternEngine::default(),
            led_interval: DEFAULT_LED_INTERVAL_MS,
            led_throttle: Throttle::new(),
            was_playing: false,
        }
    }
}

impl<'a, T, P, D, C, R> Sequencer<'a, T, P, D, C, R>
where
    T: ToneOutput,
    P: PwmOutput,
    D: CharDisplay,
    C: Clock,
    R: RandomSource,
{
    /// Swap in a display of a different type.
    pub fn with_display<D2: CharDisplay>(
        self,
        display: D2,
        geometry: DisplayGeometry,
    ) -> Sequencer<'a, T, P, D2, C, R> {
        let mut screen = self.screen;
        screen.set_geometry(geometry.cols, geometry.rows);
        Sequencer {
            tone: self.tone,
            leds: self.leds,
            display: Some(display),
            clock: self.clock,
            rng: self.rng,
            melody: self.melody,
            harmony: self.harmony,
            lyrics: self.lyrics,
            screen,
            patterns: self.patterns,
            led_interval: self.led_interval,
            led_throttle: self.led_throttle,
            was_playing: self.was_playing,
        }
    }

    /// Install (or replace) the display.
    pub fn set_display(&mut self, display: D, geometry: DisplayGeometry) {
        self.screen.set_geometry(geometry.cols, geometry.rows);
        self.display = Some(display);
    }

    /// Apply interval, pattern, LED bindings and display size in one go.
    pub fn configure(&mut self, config: &SequencerConfig) {
        self.set_led_interval(config.led_interval_ms);
        self.set_led_pattern(config.pattern);
        if config.leds.bound().next().is_some() {
            self.setup_leds(config.leds);
        }
        if let Some(geometry) = config.display {
            self.screen.set_geometry(geometry.cols, geometry.rows);
        }
    }

    pub fn set_melody(&mut self, notes: &'a [Note]) {
        self.melody.configure(notes);
    }

    pub fn set_harmony(&mut self, notes: &'a [Note]) {
        self.harmony.configure(notes);
    }

    /// Stop, load both voices and restart the lyric and LED state.
    pub fn set_song(&mut self, melody: &'a [Note], harmony: &'a [Note]) {
        self.stop();
        self.melody.configure(melody);
        self.harmony.configure(harmony);
        self.screen.reset_lyric();
        self.patterns.reset();
        debug!(melody = melody.len(), harmony = harmony.len(), "song set");
    }

    pub fn set_lyrics(&mut self, entries: &'a [LyricEntry<'a>]) {
        self.lyrics = Lyrics::Borrowed(entries);
        self.screen.reset_lyric();
    }

    /// Use each space-separated word of `text` as one lyric, word `i` at
    /// melody note `i`.
    pub fn set_lyric_text(&mut self, text: &'a str) {
        let (lyrics, dropped) = Lyrics::from_text(text);
        if dropped > 0 {
            warn!(dropped, "lyric text has too many words");
        }
        self.lyrics = lyrics;
        self.screen.reset_lyric();
    }

    pub fn set_idle_message(&mut self, message: &'a str) {
        self.screen.set_idle_message(message);
    }

    /// Bind LED pins, switch them off and enable output.
    pub fn setup_leds(&mut self, config: LedConfig) {
        self.leds.setup(config);
        debug!(bound = config.bound().count(), "leds set up");
    }

    pub fn enable_leds(&mut self, enabled: bool) {
        self.leds.enable(enabled);
        debug!(enabled, "leds enabled");
    }

    pub fn set_led_pattern(&mut self, pattern: LedPattern) {
        self.patterns.set_pattern(pattern);
        debug!(pattern = pattern.name(), "led pattern");
    }

    pub fn set_led_interval(&mut self, interval_ms: Millis) {
        self.led_interval = interval_ms;
    }

    /// Start both voices from the top and show the first lyric.
    pub fn play(&mut self) {
        let now = self.clock.now_millis();
        self.start_voice(Voice::Melody, now);
        self.start_voice(Voice::Harmony, now);
        self.screen.reset_lyric();
        self.clear_lyrics();
        self.sync_lyric(now);
        debug!(
            melody = self.melody.is_playing(),
            harmony = self.harmony.is_playing(),
            "play"
        );
    }

    pub fn play_melody(&mut self) {
        let now = self.clock.now_millis();
        self.start_voice(Voice::Melody, now);
    }

    pub fn play_harmony(&mut self) {
        let now = self.clock.now_millis();
        self.start_voice(Voice::Harmony, now);
    }

    fn start_voice(&mut self, voice: Voice, now: Millis) {
        let started = match voice {
            Voice::Melody => self.melody.start(now, &mut self.tone),
            Voice::Harmony => self.harmony.start(now, &mut self.tone),
        };
        if started {
            self.screen.leave_idle();
            self.was_playing = true;
        }
    }

    /// Silence both voices, blank the display and go idle.
    pub fn stop(&mut self) {
        let now = self.clock.now_millis();
        self.stop_at(now);
        debug!("stop");
    }

    fn stop_at(&mut self, now: Millis) {
        self.melody.stop(&mut self.tone);
        self.harmony.stop(&mut self.tone);
        self.was_playing = false;
        self.clear_lyrics();
        self.start_idle_at(now);
    }

    pub fn stop_melody(&mut self) {
        self.melody.stop(&mut self.tone);
    }

    pub fn stop_harmony(&mut self) {
        self.harmony.stop(&mut self.tone);
    }

    pub fn is_playing(&self) -> bool {
        self.melody.is_playing() || self.harmony.is_playing()
    }

    /// Poll the clock and do whatever is due. Cheap when nothing is.
    pub fn update(&mut self) {
        #[cfg(feature = "alloc_check")]
        assert_no_alloc::assert_no_alloc(|| self.tick());
        #[cfg(not(feature = "alloc_check"))]
        self.tick();
    }

    fn tick(&mut self) {
        let now = self.clock.now_millis();

        if self.melody.advance(now, &mut self.tone) == Advance::Changed {
            trace!(cursor = self.melody.cursor(), freq = self.melody.frequency(), "melody");
            self.sync_lyric(now);
        }
        if self.harmony.advance(now, &mut self.tone) == Advance::Changed {
            trace!(cursor = self.harmony.cursor(), freq = self.harmony.frequency(), "harmony");
        }

        let playing = self.is_playing();
        if self.was_playing && !playing {
            debug!("song finished");
            self.stop_at(now);
        }
        self.was_playing = playing;

        if self.screen.is_idle() && !playing {
            if let Some(display) = self.display.as_mut() {
                self.screen.render_idle(display, now);
            }
        }

        if self.leds.is_enabled() && self.led_throttle.try_fire(now, self.led_interval) {
            let frame = self.voice_frame();
            let levels = self.patterns.render(now, frame, &mut self.rng);
            self.leds.write(levels);
        }
    }

    /// What both voices are sounding right now.
    pub fn voice_frame(&self) -> VoiceFrame {
        VoiceFrame {
            melody: self.melody.frequency(),
            harmony: self.harmony.frequency(),
            playing: self.is_playing(),
        }
    }

    /// Repaint the lyric for the melody's position.
    pub fn update_lyrics(&mut self) {
        let now = self.clock.now_millis();
        self.sync_lyric(now);
    }

    fn sync_lyric(&mut self, now: Millis) {
        if !self.melody.is_playing() {
            return;
        }
        if let Some(display) = self.display.as_mut() {
            self.screen
                .sync_lyric(display, self.lyrics.entries(), self.melody.cursor(), now);
        }
    }

    pub fn clear_lyrics(&mut self) {
        if let Some(display) = self.display.as_mut() {
            display.clear();
        }
    }

    /// LEDs off, idle latched and the first idle frame drawn now.
    pub fn start_idle_mode(&mut self) {
        let now = self.clock.now_millis();
        self.start_idle_at(now);
    }

    fn start_idle_at(&mut self, now: Millis) {
        self.leds.write(ChannelLevels::OFF);
        self.screen.enter_idle();
        if let Some(display) = self.display.as_mut() {
            self.screen.render_idle(display, now);
        }
    }

    pub fn stop_idle_mode(&mut self) {
        self.screen.leave_idle();
    }

    /// Write raw channel levels. Ignored while LEDs are disabled.
    pub fn set_led_color(&mut self, levels: ChannelLevels) {
        self.leds.write(levels);
    }

    /// Show the fixed colour for one pitch.
    pub fn light_led_for_note(&mut self, frequency: u16) {
        self.leds.write(note_color(frequency, self.patterns.step()));
    }

    /// Play `notes` on one voice and block until done. Do not mix with
    /// [`update`](Self::update) while a song is running.
    pub fn play_sequence_with_leds<W: Delay>(&mut self, notes: &[Note], voice: Voice, delay: &mut W) {
        play_blocking(notes, voice, &mut self.tone, &mut self.leds, delay);
    }

    pub fn melody(&self) -> &VoiceTimeline<'a> {
        &self.melody
    }

    pub fn harmony(&self) -> &VoiceTimeline<'a> {
        &self.harmony
    }

    pub fn lyrics(&self) -> &[LyricEntry<'a>] {
        self.lyrics.entries()
    }

    pub fn screen(&self) -> &DisplaySync<'a> {
        &self.screen
    }

    pub fn patterns(&self) -> &PatternEngine {
        &self.patterns
    }

    pub fn leds(&self) -> &LedBank<P> {
        &self.leds
    }

    pub fn led_interval(&self) -> Millis {
        self.led_interval
    }

    pub fn tone(&self) -> &T {
        &self.tone
    }

    pub fn display(&self) -> Option<&D> {
        self.display.as_ref()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Hand the collaborators back.
    pub fn release(self) -> (T, P, Option<D>, C, R) {
        (self.tone, self.leds.into_inner(), self.display, self.clock, self.rng)
    }
}
