//! LED channels, pin bindings and pattern identifiers.

/// A hardware pin number.
pub type Pin = u8;

/// One of the five indicator LEDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LedChannel {
    Red,
    Green,
    Blue,
    Yellow,
    White,
}

impl LedChannel {
    /// All channels in storage order.
    pub const ALL: [LedChannel; 5] = [
        LedChannel::Red,
        LedChannel::Green,
        LedChannel::Blue,
        LedChannel::Yellow,
        LedChannel::White,
    ];

    /// Warm-to-cool order used by the chase and VU meter.
    pub const SPECTRUM: [LedChannel; 5] = [
        LedChannel::Red,
        LedChannel::Yellow,
        LedChannel::Green,
        LedChannel::Blue,
        LedChannel::White,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Channel at `index` in storage order, wrapping past the end.
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 5]
    }

    pub const fn name(self) -> &'static str {
        match self {
            LedChannel::Red => "red",
            LedChannel::Green => "green",
            LedChannel::Blue => "blue",
            LedChannel::Yellow => "yellow",
            LedChannel::White => "white",
        }
    }
}

/// An intensity (0-255) for every channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChannelLevels(pub [u8; 5]);

impl ChannelLevels {
    /// Every channel dark.
    pub const OFF: Self = Self([0; 5]);

    /// Same intensity on every channel.
    pub const fn splat(level: u8) -> Self {
        Self([level; 5])
    }

    /// One channel lit, the rest dark.
    pub fn single(channel: LedChannel, level: u8) -> Self {
        let mut levels = Self::OFF;
        levels.set(channel, level);
        levels
    }

    /// Build from per-channel values given as (red, green, blue, yellow, white).
    pub const fn rgbyw(red: u8, green: u8, blue: u8, yellow: u8, white: u8) -> Self {
        Self([red, green, blue, yellow, white])
    }

    pub fn get(&self, channel: LedChannel) -> u8 {
        self.0[channel.index()]
    }

    pub fn set(&mut self, channel: LedChannel, level: u8) {
        self.0[channel.index()] = level;
    }

    /// Per-channel maximum of two level sets.
    pub fn max(self, other: Self) -> Self {
        let mut out = self;
        for (a, b) in out.0.iter_mut().zip(other.0) {
            *a = (*a).max(b);
        }
        out
    }

    /// Scale every channel by `factor / 255`.
    pub fn scale(self, factor: u8) -> Self {
        let mut out = self;
        for level in out.0.iter_mut() {
            *level = (*level as u16 * factor as u16 / 255) as u8;
        }
        out
    }

    /// Returns true if every channel is dark.
    pub fn is_off(&self) -> bool {
        self.0.iter().all(|&l| l == 0)
    }

    /// Number of channels with a non-zero level.
    pub fn lit_count(&self) -> usize {
        self.0.iter().filter(|&&l| l > 0).count()
    }
}

/// Pin bindings for the five LED channels. `None` disables a channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LedConfig {
    pub red: Option<Pin>,
    pub green: Option<Pin>,
    pub blue: Option<Pin>,
    pub yellow: Option<Pin>,
    pub white: Option<Pin>,
}

impl LedConfig {
    /// All channels disabled.
    pub const fn none() -> Self {
        Self { red: None, green: None, blue: None, yellow: None, white: None }
    }

    /// Build from raw pin numbers in (red, green, blue, yellow, white) order.
    /// Negative numbers, or anything above 255, disable the channel.
    pub fn from_raw(pins: [i16; 5]) -> Self {
        let mut config = Self::none();
        for (channel, raw) in LedChannel::ALL.into_iter().zip(pins) {
            config = config.with(channel, Pin::try_from(raw).ok());
        }
        config
    }

    /// Bind (or unbind) a channel.
    pub fn with(mut self, channel: LedChannel, pin: Option<Pin>) -> Self {
        *self.slot_mut(channel) = pin;
        self
    }

    pub fn pin(&self, channel: LedChannel) -> Option<Pin> {
        match channel {
            LedChannel::Red => self.red,
            LedChannel::Green => self.green,
            LedChannel::Blue => self.blue,
            LedChannel::Yellow => self.yellow,
            LedChannel::White => self.white,
        }
    }

    fn slot_mut(&mut self, channel: LedChannel) -> &mut Option<Pin> {
        match channel {
            LedChannel::Red => &mut self.red,
            LedChannel::Green => &mut self.green,
            LedChannel::Blue => &mut self.blue,
            LedChannel::Yellow => &mut self.yellow,
            LedChannel::White => &mut self.white,
        }
    }

    /// Iterate the bound channels with their pins.
    pub fn bound(&self) -> impl Iterator<Item = (LedChannel, Pin)> + '_ {
        LedChannel::ALL
            .into_iter()
            .filter_map(|channel| self.pin(channel).map(|pin| (channel, pin)))
    }
}

/// Selectable LED rendering algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LedPattern {
    /// Light the channel of every band either voice is sounding in
    FrequencyBands,
    /// Sawtooth-decay pulse on the melody's band channel
    BeatPulse,
    /// Round-robin chase that ignores the audio
    RainbowChase,
    /// Cumulative bar graph of the average voice intensity
    VuMeter,
    /// 100 ms strobe on a slowly rotating channel
    DiscoStrobe,
    /// Random channel per note, with a sparkle on each change
    #[default]
    RandomNotes,
    /// Fixed colour per pitch class
    NoteMapping,
}

impl LedPattern {
    pub const ALL: [LedPattern; 7] = [
        LedPattern::FrequencyBands,
        LedPattern::BeatPulse,
        LedPattern::RainbowChase,
        LedPattern::VuMeter,
        LedPattern::DiscoStrobe,
        LedPattern::RandomNotes,
        LedPattern::NoteMapping,
    ];

    /// Kebab-case name, as accepted by [`LedPattern::from_name`].
    pub const fn name(self) -> &'static str {
        match self {
            LedPattern::FrequencyBands => "frequency-bands",
            LedPattern::BeatPulse => "beat-pulse",
            LedPattern::RainbowChase => "rainbow-chase",
            LedPattern::VuMeter => "vu-meter",
            LedPattern::DiscoStrobe => "disco-strobe",
            LedPattern::RandomNotes => "random-notes",
            LedPattern::NoteMapping => "note-mapping",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_treats_negative_as_disabled() {
        let config = LedConfig::from_raw([9, -1, 10, 11, -1]);
        assert_eq!(config.red, Some(9));
        assert_eq!(config.green, None);
        assert_eq!(config.blue, Some(10));
        assert_eq!(config.yellow, Some(11));
        assert_eq!(config.white, None);
        assert_eq!(config.bound().count(), 3);
    }

    #[test]
    fn from_raw_rejects_out_of_range_pins() {
        let config = LedConfig::from_raw([300, 0, 255, -5, 1]);
        assert_eq!(config.red, None);
        assert_eq!(config.green, Some(0));
        assert_eq!(config.blue, Some(255));
        assert_eq!(config.yellow, None);
    }

    #[test]
    fn levels_max_and_scale() {
        let a = ChannelLevels::single(LedChannel::Red, 255);
        let b = ChannelLevels::splat(100);
        let m = a.max(b);
        assert_eq!(m, ChannelLevels::rgbyw(255, 100, 100, 100, 100));
        assert_eq!(m.scale(127).get(LedChannel::Red), 127);
        assert_eq!(ChannelLevels::splat(200).scale(0), ChannelLevels::OFF);
        assert_eq!(ChannelLevels::splat(200).scale(255), ChannelLevels::splat(200));
    }

    #[test]
    fn lit_count() {
        assert_eq!(ChannelLevels::OFF.lit_count(), 0);
        assert!(ChannelLevels::OFF.is_off());
        assert_eq!(ChannelLevels::rgbyw(1, 0, 3, 0, 0).lit_count(), 2);
    }

    #[test]
    fn pattern_names_round_trip() {
        for pattern in LedPattern::ALL {
            assert_eq!(LedPattern::from_name(pattern.name()), Some(pattern));
        }
        assert_eq!(LedPattern::from_name("VU-METER"), Some(LedPattern::VuMeter));
        assert_eq!(LedPattern::from_name("laser"), None);
    }

    #[test]
    fn spectrum_covers_every_channel() {
        for channel in LedChannel::ALL {
            assert!(LedChannel::SPECTRUM.contains(&channel));
        }
    }
}
