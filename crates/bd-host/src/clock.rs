//! Wall and manual clocks, plus a sleeping delay.

use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use bd_engine::{Clock, Delay, Millis};

/// Milliseconds since construction, wrapping like a board's tick counter.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> Millis {
        // Truncation is the wrap.
        self.start.elapsed().as_millis() as Millis
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock(Rc<Cell<Millis>>);

impl ManualClock {
    pub fn at(now: Millis) -> Self {
        Self(Rc::new(Cell::new(now)))
    }

    pub fn set(&self, now: Millis) {
        self.0.set(now);
    }

    pub fn advance(&self, ms: Millis) {
        self.0.set(self.0.get().wrapping_add(ms));
    }

    pub fn get(&self) -> Millis {
        self.0.get()
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> Millis {
        self.0.get()
    }
}

/// `Delay` that parks the current thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(ms as u64));
    }
}
