//! Time sources for the input model

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

/// Milliseconds elapsed since some fixed starting point.
///
/// Implementations should never go backwards; the input model clamps the
/// value if one does.
pub trait Clock: fmt::Debug {
    fn elapsed_ms(&self) -> u64;
}

/// Wall-clock time since the clock was started.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for SystemClock {
    fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock for tests and replays.
///
/// Clones share the same time, so a test can keep one handle while the
/// model owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock that starts at `ms`.
    pub fn at(ms: u64) -> Self {
        let clock = Self::new();
        clock.set(ms);
        clock
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    /// Moves the clock forward and returns the new time.
    pub fn advance(&self, ms: u64) -> u64 {
        let now = self.now.get().saturating_add(ms);
        self.now.set(now);
        now
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }
}

impl Clock for ManualClock {
    fn elapsed_ms(&self) -> u64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_handles_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        assert_eq!(clock.elapsed_ms(), 0);
        handle.advance(150);
        assert_eq!(clock.elapsed_ms(), 150);
        handle.set(40);
        assert_eq!(clock.now(), 40);
    }

    #[test]
    fn manual_clock_starting_point() {
        assert_eq!(ManualClock::at(1000).advance(5), 1005);
    }

    #[test]
    fn system_clock_starts_near_zero() {
        let clock = SystemClock::start();
        assert!(clock.elapsed_ms() < 1000);
    }
}
