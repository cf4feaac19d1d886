//! Wraparound-safe millisecond arithmetic.
//!
//! The clock is a free-running `u32` that wraps after ~49.7 days. Every
//! elapsed-time check in the engine goes through [`elapsed`] so a wrap
//! between two samples still yields the true distance.

/// Milliseconds from the host's monotonic clock.
pub type Millis = u32;

/// Time from `since` to `now`, correct across one counter wrap.
#[inline]
pub const fn elapsed(now: Millis, since: Millis) -> Millis {
    now.wrapping_sub(since)
}

/// Rate limiter for work that must run at most once per interval.
///
/// A fresh (or [`reset`](Throttle::reset)) throttle fires on the next check
/// no matter what the clock reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Throttle {
    last: Option<Millis>,
}

impl Throttle {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Returns true if `interval` has passed since the last firing.
    pub fn is_due(&self, now: Millis, interval: Millis) -> bool {
        match self.last {
            None => true,
            Some(last) => elapsed(now, last) >= interval,
        }
    }

    /// Fire if due, stamping `now` as the new reference point.
    pub fn try_fire(&mut self, now: Millis, interval: Millis) -> bool {
        if self.is_due(now, interval) {
            self.last = Some(now);
            true
        } else {
            false
        }
    }

    /// Forget the last firing so the next check fires immediately.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn last(&self) -> Option<Millis> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_across_wrap() {
        assert_eq!(elapsed(10, u32::MAX - 9), 20);
        assert_eq!(elapsed(0, u32::MAX), 1);
        assert_eq!(elapsed(500, 100), 400);
    }

    #[test]
    fn fresh_throttle_fires_immediately() {
        let mut t = Throttle::new();
        assert!(t.try_fire(0, 300));
        assert!(!t.try_fire(299, 300));
        assert!(t.try_fire(300, 300));
        assert_eq!(t.last(), Some(300));
    }

    #[test]
    fn reset_forces_next_fire() {
        let mut t = Throttle::new();
        assert!(t.try_fire(1000, 300));
        assert!(!t.is_due(1100, 300));
        t.reset();
        assert!(t.try_fire(1100, 300));
    }

    #[test]
    fn throttle_survives_clock_wrap() {
        let mut t = Throttle::new();
        assert!(t.try_fire(u32::MAX - 100, 300));
        assert!(!t.try_fire(50, 300));
        assert!(t.try_fire(199, 300));
    }
}
