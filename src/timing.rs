//! Timing source: process-relative milliseconds and sleep.
//!
//! The simulation paces itself with these; the bridge never sleeps on its
//! own.

use std::thread;
use std::time::{Duration, Instant};

/// Monotonic clock anchored at bridge start.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    /// Epoch captured at init.
    start: Instant,
}

impl Clock {
    /// Capture the current instant as the epoch.
    pub fn start() -> Self {
        Self::with_epoch(Instant::now())
    }

    /// Use an explicit epoch.
    pub const fn with_epoch(start: Instant) -> Self {
        Self { start }
    }

    /// The captured epoch.
    pub const fn epoch(&self) -> Instant {
        self.start
    }

    /// Time since the epoch.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Milliseconds since the epoch, wrapping at 2^32 (about 49.7 days).
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed().as_millis() as u32
    }

    /// Sleep the calling thread for roughly `ms` milliseconds.
    pub fn sleep_ms(&self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::start()
    }
}
