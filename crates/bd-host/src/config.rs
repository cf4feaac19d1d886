//! JSON sequencer settings.
//!
//! Every field is optional; missing ones take the defaults from
//! [`SequencerConfig::default`].
//!
//! ```json
//! {
//!   "led_interval_ms": 40,
//!   "pattern": "vu-meter",
//!   "leds": { "red": 9, "green": 10, "blue": 11, "yellow": 6, "white": 5 },
//!   "display": { "cols": 20, "rows": 4 }
//! }
//! ```

use std::fs;
use std::path::Path;

use bd_engine::{DisplayGeometry, SequencerConfig};
use tracing::debug;

use crate::error::Result;
use crate::panel::LedPanel;

pub fn parse_config(text: &str) -> Result<SequencerConfig> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_config(path: impl AsRef<Path>) -> Result<SequencerConfig> {
    let path = path.as_ref();
    let config = parse_config(&fs::read_to_string(path)?)?;
    debug!(path = %path.display(), ?config, "config loaded");
    Ok(config)
}

/// Adapt a config to the host panel, which always has a grid and lamps.
/// Unbound LEDs get the panel's own pins and a missing display becomes
/// the default 16x2.
pub fn for_panel(mut config: SequencerConfig) -> (SequencerConfig, DisplayGeometry) {
    if config.leds.bound().next().is_none() {
        config.leds = LedPanel::default_config();
    }
    let geometry = *config.display.get_or_insert_with(DisplayGeometry::default);
    (config, geometry)
}
