use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

// `std::time::Instant::now()` can panic on `wasm32-unknown-unknown` depending on
// how the runtime is configured. `web-time` provides a browser-backed monotonic
// clock via `performance.now()`.
#[cfg(target_arch = "wasm32")]
pub use web_time::{Instant, SystemTime, UNIX_EPOCH};

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Local wall-clock time of day, as shown next to chat messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
        }
    }

    /// Adds whole minutes, wrapping at midnight.
    pub fn plus_minutes(self, minutes: u64) -> Self {
        let total = (self.hour as u64 * 60 + self.minute as u64 + minutes) % (24 * 60);
        Self::new((total / 60) as u8, (total % 60) as u8)
    }
}

// en-US, 2-digit hour and minute: "09:05 AM", "12:30 AM", "01:05 PM".
impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.hour < 12 { "AM" } else { "PM" };
        let h12 = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        write!(f, "{h12:02}:{:02} {suffix}", self.minute)
    }
}

/// Time source for the controller: a monotonic millisecond counter for the
/// scheduler and a local time of day for message stamps.
pub trait Clock {
    fn now_ms(&self) -> u64;
    fn local_time(&self) -> ClockTime;
}

/// Hand-advanced clock. Clones share the same counter, so a test can keep one
/// handle while the controller owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
    start: ClockTime,
}

impl ManualClock {
    pub fn new(start: ClockTime) -> Self {
        Self {
            now: Rc::new(Cell::new(0)),
            start,
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn local_time(&self) -> ClockTime {
        self.start.plus_minutes(self.now.get() / 60_000)
    }
}

pub(crate) fn entropy_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_formats_like_en_us() {
        assert_eq!(ClockTime::new(0, 30).to_string(), "12:30 AM");
        assert_eq!(ClockTime::new(9, 5).to_string(), "09:05 AM");
        assert_eq!(ClockTime::new(12, 0).to_string(), "12:00 PM");
        assert_eq!(ClockTime::new(13, 5).to_string(), "01:05 PM");
        assert_eq!(ClockTime::new(23, 59).to_string(), "11:59 PM");
    }

    #[test]
    fn plus_minutes_wraps_midnight() {
        assert_eq!(ClockTime::new(23, 50).plus_minutes(15), ClockTime::new(0, 5));
    }

    #[test]
    fn manual_clock_handles_share_time() {
        let clock = ManualClock::new(ClockTime::new(9, 0));
        let other = clock.clone();
        clock.advance(61_000);
        assert_eq!(other.now_ms(), 61_000);
        assert_eq!(other.local_time(), ClockTime::new(9, 1));
    }
}
