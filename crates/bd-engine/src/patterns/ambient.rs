//! Patterns that only follow the step counter.

use bd_ir::{ChannelLevels, LedChannel};
use libm::sinf;

/// One channel at a time, moving every 20 steps, with a gentle shimmer.
pub fn rainbow_chase(step: u8) -> ChannelLevels {
    let channel = LedChannel::SPECTRUM[(step as usize / 20) % 5];
    let level = (200.0 + sinf(step as f32 * 0.2) * 55.0) as u8;
    ChannelLevels::single(channel, level)
}

/// Full-brightness flash on a channel that rotates every 10 steps.
pub fn strobe(on: bool, step: u8) -> ChannelLevels {
    if on {
        ChannelLevels::single(LedChannel::from_index(step as usize / 10), 255)
    } else {
        ChannelLevels::OFF
    }
}
