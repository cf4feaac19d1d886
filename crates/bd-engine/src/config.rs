//! Sequencer settings.

use bd_ir::{LedConfig, LedPattern};

use crate::time::Millis;

/// Default LED frame interval (20 Hz).
pub const DEFAULT_LED_INTERVAL_MS: Millis = 50;

/// Character grid size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayGeometry {
    pub cols: u8,
    pub rows: u8,
}

impl Default for DisplayGeometry {
    /// A 16x2 HD44780.
    fn default() -> Self {
        Self { cols: 16, rows: 2 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SequencerConfig {
    /// Minimum time between LED frames
    pub led_interval_ms: Millis,
    pub pattern: LedPattern,
    pub leds: LedConfig,
    /// `None` for boards without a display
    pub display: Option<DisplayGeometry>,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            led_interval_ms: DEFAULT_LED_INTERVAL_MS,
            pattern: LedPattern::default(),
            leds: LedConfig::none(),
            display: Some(DisplayGeometry::default()),
        }
    }
}
