//! Monotonic clock and blink phases
//!
//! Blink rendering is a pure function of a clock reading, so the clock is
//! injected: production code shares one [`SystemClock`], tests drive a
//! [`ManualClock`] to pin the phase.

use std::cell::Cell;
use std::time::Instant;

/// Character blink cycle length in milliseconds.
pub const CHAR_BLINK_MS: u64 = 600;

/// Cursor blink cycle length in milliseconds (twice as fast as text).
pub const CURSOR_BLINK_MS: u64 = 300;

/// Source of monotonic milliseconds.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock anchored at construction.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock for tests and deterministic rendering.
#[derive(Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now: Cell::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: u64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Whether blinking text currently shows its foreground.
/// The first half of the 600 ms cycle is the "on" phase.
pub fn char_blink_on(now_ms: u64) -> bool {
    now_ms % CHAR_BLINK_MS < CHAR_BLINK_MS / 2
}

/// Whether the cursor overlay is currently visible.
/// The first half of the 300 ms cycle is the "on" phase.
pub fn cursor_blink_on(now_ms: u64) -> bool {
    now_ms % CURSOR_BLINK_MS < CURSOR_BLINK_MS / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_blink_phase_boundaries() {
        assert!(char_blink_on(0));
        assert!(char_blink_on(299));
        assert!(!char_blink_on(300));
        assert!(!char_blink_on(599));
        assert!(char_blink_on(600));
    }

    #[test]
    fn test_cursor_blinks_twice_as_fast() {
        assert!(cursor_blink_on(0));
        assert!(cursor_blink_on(149));
        assert!(!cursor_blink_on(150));
        assert!(!cursor_blink_on(299));
        assert!(cursor_blink_on(300));
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.now_ms(), 100);
        clock.advance(50);
        assert_eq!(clock.now_ms(), 150);
        clock.set(0);
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
