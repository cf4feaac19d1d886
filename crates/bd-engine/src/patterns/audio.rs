//! Patterns driven by the sounding frequencies.

use bd_ir::{map_intensity, Band, ChannelLevels, LedChannel};
use libm::sinf;

use super::VoiceFrame;

const VU_THRESHOLDS: [u8; 5] = [50, 100, 150, 200, 240];

/// Light the band channel of each sounding voice, pulsing together.
pub fn frequency_bands(frame: VoiceFrame, step: u8) -> ChannelLevels {
    let pulse = ((sinf(step as f32 * 0.1) + 1.0) * 127.0) as u8;
    let mut levels = ChannelLevels::OFF;
    for freq in [frame.melody, frame.harmony] {
        if freq > 0 {
            levels.set(Band::of(freq).channel(), pulse);
        }
    }
    levels
}

/// Sawtooth decay on the melody's band channel.
pub fn beat_pulse(frame: VoiceFrame, step: u8) -> ChannelLevels {
    if frame.melody == 0 {
        return ChannelLevels::OFF;
    }
    let base = map_intensity(frame.melody) as u16;
    let decay = 255 - (step as u16 * 8) % 256;
    ChannelLevels::single(Band::of(frame.melody).channel(), (base * decay / 255) as u8)
}

/// Bar graph of the average voice intensity, warm colours first.
pub fn vu_meter(frame: VoiceFrame) -> ChannelLevels {
    let avg = (map_intensity(frame.melody) as u16 + map_intensity(frame.harmony) as u16) / 2;
    let mut levels = ChannelLevels::OFF;
    for (channel, threshold) in LedChannel::SPECTRUM.into_iter().zip(VU_THRESHOLDS) {
        if avg >= threshold as u16 {
            levels.set(channel, 255);
        }
    }
    levels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(melody: u16, harmony: u16) -> VoiceFrame {
        VoiceFrame { melody, harmony, playing: true }
    }

    #[test]
    fn bands_light_one_channel_per_voice() {
        // step 16: sin(1.6) is close to 1, so the pulse is near full.
        let levels = frequency_bands(frame(200, 1500), 16);
        assert!(levels.get(LedChannel::Red) > 250);
        assert_eq!(levels.get(LedChannel::Red), levels.get(LedChannel::Blue));
        assert_eq!(levels.lit_count(), 2);
    }

    #[test]
    fn bands_share_channel_when_voices_agree() {
        let levels = frequency_bands(frame(440, 500), 16);
        assert_eq!(levels.lit_count(), 1);
        assert!(levels.get(LedChannel::Yellow) > 0);
    }

    #[test]
    fn bands_dark_when_silent() {
        assert!(frequency_bands(frame(0, 0), 16).is_off());
    }

    #[test]
    fn beat_pulse_decays() {
        let first = beat_pulse(frame(2093, 0), 0);
        assert_eq!(first.get(LedChannel::White), 255);
        let later = beat_pulse(frame(2093, 0), 16);
        // 255 - 128 = 127
        assert_eq!(later.get(LedChannel::White), 127);
        assert_eq!(later.lit_count(), 1);
        // Sawtooth restarts every 32 steps
        assert_eq!(beat_pulse(frame(2093, 0), 32), first);
    }

    #[test]
    fn beat_pulse_ignores_harmony() {
        assert!(beat_pulse(frame(0, 440), 0).is_off());
    }

    #[test]
    fn vu_meter_fills_in_order() {
        assert!(vu_meter(frame(0, 0)).is_off());
        // avg of 100 and 0 is 50: red only.
        let one = vu_meter(frame(130, 0));
        assert_eq!(one, ChannelLevels::single(LedChannel::Red, 255));
        // Both at 255: all five.
        assert_eq!(vu_meter(frame(2093, 2093)), ChannelLevels::splat(255));
        // Both at 100: red and yellow.
        let two = vu_meter(frame(130, 130));
        assert_eq!(two.lit_count(), 2);
        assert_eq!(two.get(LedChannel::Yellow), 255);
    }
}
