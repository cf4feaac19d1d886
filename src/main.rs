//! buzzduet - dual-buzzer tone sequencer with lyric display and LED show.
//!
//! Usage:
//!   buzzduet play [song.bdz|song.bdt] [--pattern vu-meter]
//!   buzzduet simulate [song] --limit 5000
//!   buzzduet convert song.bdt song.bdz
//!   buzzduet patterns

mod panel;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use bd_host::{
    AudioMode, Controller, HostError, LedPattern, SequencerConfig, Simulator, Song, Voice,
};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

fn main() -> bd_host::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play { song, settings, silent, blocking, seconds } => {
            run_play(song.as_deref(), &settings, silent, blocking, seconds)
        }
        Commands::Simulate { song, settings, step, limit, seed } => {
            run_simulate(song.as_deref(), &settings, step, limit, seed)
        }
        Commands::Convert { input, output } => run_convert(&input, &output),
        Commands::Patterns => {
            for pattern in LedPattern::ALL {
                println!("{:<16} {}", pattern.name(), panel::describe(pattern));
            }
            Ok(())
        }
    }
}

fn init_tracing() {
    // Logs go to stderr so they don't tear the panel on stdout.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn load(song: Option<&Path>) -> bd_host::Result<Song> {
    match song {
        Some(path) => Ok(bd_host::load_song(path)?),
        None => Ok(bd_host::ode_to_joy()),
    }
}

fn run_play(
    song: Option<&Path>,
    settings: &Settings,
    silent: bool,
    blocking: Option<BlockingVoice>,
    seconds: Option<u64>,
) -> bd_host::Result<()> {
    let song = load(song)?;
    let mode = if silent { AudioMode::Silent } else { AudioMode::Auto };
    let controller = Controller::new(settings.resolve()?).audio(mode);

    if let Some(voice) = blocking {
        let frame = controller.run_blocking(&song, voice.into())?;
        tracing::debug!(?frame, "blocking playback done");
        return Ok(());
    }

    let stop = Arc::new(AtomicBool::new(false));
    if let Some(seconds) = seconds {
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(seconds));
            stop.store(true, Ordering::Relaxed);
        });
    }

    let mut screen = panel::Screen::new(&song);
    controller.run(&song, &stop, |frame| screen.draw(frame))?;
    screen.finish();
    Ok(())
}

fn run_simulate(
    song: Option<&Path>,
    settings: &Settings,
    step: u32,
    limit: u32,
    seed: u64,
) -> bd_host::Result<()> {
    let song = load(song)?;
    let simulator = Simulator::new(settings.resolve()?).step(step).limit(limit).seed(seed);
    simulator.run_with(&song, |frame| println!("{}", panel::line(frame)));
    Ok(())
}

fn run_convert(input: &Path, output: &Path) -> bd_host::Result<()> {
    let song = bd_host::load_song(input)?;
    bd_host::save_song(&song, output)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        notes = song.melody.len() + song.harmony.len(),
        lyrics = song.lyrics.len(),
        "converted"
    );
    Ok(())
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Dual-buzzer tone sequencer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a song in real time with the terminal front panel.
    Play {
        /// Song file (.bdz or .bdt). Plays the built-in demo if omitted.
        song: Option<PathBuf>,
        #[command(flatten)]
        settings: Settings,
        /// Don't open the sound card.
        #[arg(long)]
        silent: bool,
        /// Play one voice with the blocking player instead.
        #[arg(long, value_enum)]
        blocking: Option<BlockingVoice>,
        /// Stop after this many seconds.
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Run a song against a simulated clock and print every panel change.
    Simulate {
        song: Option<PathBuf>,
        #[command(flatten)]
        settings: Settings,
        /// Clock step per update, in milliseconds.
        #[arg(long, default_value_t = 5)]
        step: u32,
        /// Stop after this many simulated milliseconds.
        #[arg(long, default_value_t = 600_000)]
        limit: u32,
        /// Seed for the random LED pattern.
        #[arg(long, default_value_t = 0x5eed)]
        seed: u64,
    },
    /// Convert between .bdt and .bdz, picked by extension.
    Convert { input: PathBuf, output: PathBuf },
    /// List the LED patterns.
    Patterns,
}

#[derive(Args, Debug)]
struct Settings {
    /// JSON sequencer config.
    #[arg(long)]
    config: Option<PathBuf>,
    /// LED pattern name, overrides the config.
    #[arg(long)]
    pattern: Option<String>,
    /// LED frame interval in milliseconds, overrides the config.
    #[arg(long)]
    interval: Option<u32>,
}

impl Settings {
    fn resolve(&self) -> bd_host::Result<SequencerConfig> {
        let mut config = match &self.config {
            Some(path) => bd_host::load_config(path)?,
            None => SequencerConfig::default(),
        };
        if let Some(name) = &self.pattern {
            config.pattern =
                LedPattern::from_name(name).ok_or_else(|| HostError::UnknownPattern(name.clone()))?;
        }
        if let Some(interval) = self.interval {
            config.led_interval_ms = interval;
        }
        Ok(config)
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum BlockingVoice {
    Melody,
    Harmony,
}

impl From<BlockingVoice> for Voice {
    fn from(voice: BlockingVoice) -> Self {
        match voice {
            BlockingVoice::Melody => Voice::Melody,
            BlockingVoice::Harmony => Voice::Harmony,
        }
    }
}
