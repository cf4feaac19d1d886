//! Frequency helpers shared by the LED patterns.
//!
//! Two mappings: frequency to one of five [`Band`]s, and frequency to an
//! LED intensity. Both are total over `u16`, so callers never have to
//! validate a frequency before asking.

use crate::led::LedChannel;

/// Lowest frequency of the intensity domain (C3).
pub const INTENSITY_MIN_HZ: u16 = 130;
/// Highest frequency of the intensity domain (C7).
pub const INTENSITY_MAX_HZ: u16 = 2093;

const INTENSITY_FLOOR: u32 = 100;
const INTENSITY_CEIL: u32 = 255;

/// Upper (inclusive) edge of each band except the last.
const BAND_EDGES: [u16; 4] = [260, 520, 1040, 2080];

/// One of five disjoint frequency ranges.
///
/// Boundary values belong to the lower band: 260 Hz is `Bass`, 261 Hz is
/// `MidLow`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Band {
    /// 0..=260 Hz
    Bass,
    /// 261..=520 Hz
    MidLow,
    /// 521..=1040 Hz
    Mid,
    /// 1041..=2080 Hz
    High,
    /// Above 2080 Hz
    VeryHigh,
}

impl Band {
    pub const ALL: [Band; 5] = [Band::Bass, Band::MidLow, Band::Mid, Band::High, Band::VeryHigh];

    /// Classify a frequency. Anything at or below 260 Hz, including
    /// sub-audible values, is `Bass`.
    pub fn of(frequency: u16) -> Self {
        match BAND_EDGES.iter().position(|&edge| frequency <= edge) {
            Some(0) => Band::Bass,
            Some(1) => Band::MidLow,
            Some(2) => Band::Mid,
            Some(3) => Band::High,
            _ => Band::VeryHigh,
        }
    }

    /// Band number, 0 (bass) to 4 (very high).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The LED channel this band lights.
    pub const fn channel(self) -> LedChannel {
        match self {
            Band::Bass => LedChannel::Red,
            Band::MidLow => LedChannel::Yellow,
            Band::Mid => LedChannel::Green,
            Band::High => LedChannel::Blue,
            Band::VeryHigh => LedChannel::White,
        }
    }
}

/// Map a frequency to an LED intensity.
///
/// Linear from [130, 2093] Hz onto [100, 255], clamped at both ends. A rest
/// (0 Hz) maps to exactly 0 so silence never lights anything.
pub fn map_intensity(frequency: u16) -> u8 {
    if frequency == 0 {
        return 0;
    }
    let f = frequency.clamp(INTENSITY_MIN_HZ, INTENSITY_MAX_HZ) as u32;
    let span_in = (INTENSITY_MAX_HZ - INTENSITY_MIN_HZ) as u32;
    let span_out = INTENSITY_CEIL - INTENSITY_FLOOR;
    let value = (f - INTENSITY_MIN_HZ as u32) * span_out / span_in + INTENSITY_FLOOR;
    value as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_endpoints() {
        assert_eq!(map_intensity(130), 100);
        assert_eq!(map_intensity(2093), 255);
        assert_eq!(map_intensity(0), 0);
    }

    #[test]
    fn intensity_clamps_outside_domain() {
        assert_eq!(map_intensity(1), 100);
        assert_eq!(map_intensity(129), 100);
        assert_eq!(map_intensity(5000), 255);
        assert_eq!(map_intensity(u16::MAX), 255);
    }

    #[test]
    fn intensity_is_monotonic() {
        let mut prev = map_intensity(1);
        for f in 2..=2093u16 {
            let cur = map_intensity(f);
            assert!(cur >= prev, "intensity dropped at {} Hz: {} < {}", f, cur, prev);
            prev = cur;
        }
    }

    #[test]
    fn band_edges_resolve_to_lower_band() {
        assert_eq!(Band::of(260), Band::Bass);
        assert_eq!(Band::of(261), Band::MidLow);
        assert_eq!(Band::of(520), Band::MidLow);
        assert_eq!(Band::of(521), Band::Mid);
        assert_eq!(Band::of(1040), Band::Mid);
        assert_eq!(Band::of(1041), Band::High);
        assert_eq!(Band::of(2080), Band::High);
        assert_eq!(Band::of(2081), Band::VeryHigh);
    }

    #[test]
    fn low_frequencies_default_to_bass() {
        assert_eq!(Band::of(0), Band::Bass);
        assert_eq!(Band::of(50), Band::Bass);
        assert_eq!(Band::of(129), Band::Bass);
    }

    #[test]
    fn bands_cover_every_frequency() {
        let mut prev = Band::Bass;
        for f in 0..=u16::MAX {
            let band = Band::of(f);
            assert!(band >= prev, "band went backwards at {} Hz", f);
            assert!(band.index() - prev.index() <= 1, "band skipped at {} Hz", f);
            prev = band;
        }
        assert_eq!(prev, Band::VeryHigh);
    }

    #[test]
    fn each_band_has_its_own_channel() {
        for (i, a) in Band::ALL.iter().enumerate() {
            for b in &Band::ALL[i + 1..] {
                assert_ne!(a.channel(), b.channel());
            }
        }
    }
}
