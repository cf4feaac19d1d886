//! Two-voice square-wave synthesis on a cpal stream.

use bd_engine::ToneOutput;
use bd_ir::Voice;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Stream, StreamConfig};
use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};
use tracing::{debug, error, warn};

use crate::error::AudioError;

/// Peak level of one voice. Two voices at full swing stay below clipping.
pub const AMPLITUDE: f32 = 0.2;

/// Control-thread to audio-callback messages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToneCommand {
    Start(Voice, u16),
    Stop(Voice),
}

const COMMAND_QUEUE: usize = 64;

#[derive(Clone, Copy, Debug, Default)]
struct SquareOsc {
    phase: f32,
    /// Phase increment per sample; 0 when silent
    step: f32,
}

impl SquareOsc {
    fn next(&mut self) -> f32 {
        if self.step == 0.0 {
            return 0.0;
        }
        let out = if self.phase < 0.5 { AMPLITUDE } else { -AMPLITUDE };
        self.phase += self.step;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        out
    }
}

/// Sample generator for both voices. Runs inside the audio callback.
#[derive(Clone, Debug)]
pub struct SquareSynth {
    sample_rate: f32,
    voices: [SquareOsc; 2],
}

impl SquareSynth {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate as f32,
            voices: [SquareOsc::default(); 2],
        }
    }

    pub fn apply(&mut self, command: ToneCommand) {
        match command {
            ToneCommand::Start(voice, frequency) => {
                let osc = &mut self.voices[voice.index()];
                // Retuning keeps the phase so the wave does not click.
                osc.step = frequency as f32 / self.sample_rate;
            }
            ToneCommand::Stop(voice) => {
                self.voices[voice.index()] = SquareOsc::default();
            }
        }
    }

    pub fn is_sounding(&self, voice: Voice) -> bool {
        self.voices[voice.index()].step > 0.0
    }

    /// Next mono sample, both voices summed.
    pub fn next_sample(&mut self) -> f32 {
        self.voices.iter_mut().map(SquareOsc::next).sum()
    }
}

/// `ToneOutput` backed by the default sound card.
pub struct SquareOutput {
    producer: HeapProd<ToneCommand>,
    sample_rate: u32,
    _stream: Stream,
}

impl SquareOutput {
    /// Open the default output device and start a silent stream.
    pub fn new() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
        let config: StreamConfig = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceInit(e.to_string()))?
            .into();
        let channels = config.channels as usize;
        let sample_rate = config.sample_rate.0;

        let (producer, consumer) = HeapRb::<ToneCommand>::new(COMMAND_QUEUE).split();
        let mut consumer: HeapCons<ToneCommand> = consumer;
        let mut synth = SquareSynth::new(sample_rate);

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    while let Some(command) = consumer.try_pop() {
                        synth.apply(command);
                    }
                    for frame in data.chunks_mut(channels) {
                        let sample = synth.next_sample();
                        frame.iter_mut().for_each(|s| *s = sample);
                    }
                },
                |err| error!(%err, "audio stream error"),
                None,
            )
            .map_err(|e| AudioError::StreamCreate(e.to_string()))?;
        stream.play().map_err(|e| AudioError::Playback(e.to_string()))?;
        debug!(sample_rate, channels, "square output started");

        Ok(Self { producer, sample_rate, _stream: stream })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn send(&mut self, command: ToneCommand) {
        if self.producer.try_push(command).is_err() {
            warn!(?command, "tone command queue full");
        }
    }
}

impl ToneOutput for SquareOutput {
    fn start_tone(&mut self, voice: Voice, frequency: u16) {
        self.send(ToneCommand::Start(voice, frequency));
    }

    fn stop_tone(&mut self, voice: Voice) {
        self.send(ToneCommand::Stop(voice));
    }
}
