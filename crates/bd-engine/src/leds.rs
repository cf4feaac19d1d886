//! PWM writer for the five indicator LEDs.

use bd_ir::{ChannelLevels, LedChannel, LedConfig, Pin};

use crate::hal::PwmOutput;

/// Owns the PWM output and the channel-to-pin bindings.
///
/// Unbound channels are skipped on every write, so a board can wire any
/// subset of the five LEDs.
#[derive(Debug)]
pub struct LedBank<P> {
    pwm: P,
    config: LedConfig,
    enabled: bool,
    /// Last levels written (or requested while disabled)
    levels: ChannelLevels,
}

impl<P: PwmOutput> LedBank<P> {
    pub fn new(pwm: P) -> Self {
        Self {
            pwm,
            config: LedConfig::none(),
            enabled: false,
            levels: ChannelLevels::OFF,
        }
    }

    /// Bind pins, switch every bound channel off and enable output.
    pub fn setup(&mut self, config: LedConfig) {
        self.config = config;
        self.enabled = true;
        self.write(ChannelLevels::OFF);
    }

    /// Turning output off darkens every bound channel.
    pub fn enable(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.force(ChannelLevels::OFF);
        }
    }

    /// Write levels to the bound pins. Does nothing while disabled.
    pub fn write(&mut self, levels: ChannelLevels) {
        if self.enabled {
            self.force(levels);
        }
    }

    fn force(&mut self, levels: ChannelLevels) {
        for (channel, pin) in self.config.bound() {
            self.pwm.write_intensity(pin, levels.get(channel));
        }
        self.levels = levels;
    }

    pub fn pin(&self, channel: LedChannel) -> Option<Pin> {
        self.config.pin(channel)
    }

    pub fn config(&self) -> &LedConfig {
        &self.config
    }

    pub fn levels(&self) -> ChannelLevels {
        self.levels
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn pwm(&self) -> &P {
        &self.pwm
    }

    pub fn into_inner(self) -> P {
        self.pwm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingPwm;

    fn bank() -> LedBank<RecordingPwm> {
        let mut bank = LedBank::new(RecordingPwm::default());
        bank.setup(LedConfig::from_raw([9, 10, 11, 6, -1]));
        bank
    }

    #[test]
    fn setup_turns_bound_pins_off() {
        let bank = bank();
        assert!(bank.is_enabled());
        assert_eq!(bank.pwm().writes, 4);
        for pin in [9, 10, 11, 6] {
            assert_eq!(bank.pwm().level(pin), Some(0));
        }
    }

    #[test]
    fn unbound_channels_are_skipped() {
        let mut bank = bank();
        bank.write(ChannelLevels::splat(200));
        assert_eq!(bank.pwm().levels.len(), 4);
        assert_eq!(bank.pwm().level(6), Some(200));
    }

    #[test]
    fn disabled_bank_ignores_writes() {
        let mut bank = bank();
        bank.write(ChannelLevels::single(LedChannel::Red, 255));
        bank.enable(false);
        assert_eq!(bank.pwm().level(9), Some(0));

        let writes = bank.pwm().writes;
        bank.write(ChannelLevels::splat(255));
        assert_eq!(bank.pwm().writes, writes);
        assert!(bank.levels().is_off());
    }

    #[test]
    fn new_bank_is_disabled() {
        let mut bank = LedBank::new(RecordingPwm::default());
        bank.write(ChannelLevels::splat(255));
        assert_eq!(bank.pwm().writes, 0);
    }
}
