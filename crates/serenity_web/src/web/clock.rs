use serenity::time::{Clock, ClockTime, Instant};

/// `performance.now()` for the scheduler, the browser's local time zone for
/// message stamps.
pub(super) struct BrowserClock {
    origin: Instant,
}

impl BrowserClock {
    pub(super) fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for BrowserClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn local_time(&self) -> ClockTime {
        let now = js_sys::Date::new_0();
        ClockTime::new(now.get_hours() as u8, now.get_minutes() as u8)
    }
}
