//! Minimum-interval throttle for pointer-driven redraws.
//!
//! Pointer movement can fire far more often than a redraw is useful. The
//! throttle lets one redraw through per interval and drops the rest; edits
//! always redraw and bypass it.

use std::time::{Duration, Instant};

/// Default minimum time between pointer-driven redraws (~60 Hz).
pub const DEFAULT_REDRAW_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone)]
pub struct RedrawThrottle {
    min_interval: Duration,
    last: Option<Instant>,
    suppressed: u64,
}

impl RedrawThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
            suppressed: 0,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Returns `true` and records `now` if at least the minimum interval has
    /// passed since the last accepted redraw.
    pub fn should_redraw(&mut self, now: Instant) -> bool {
        let due = self
            .last
            .is_none_or(|last| now.saturating_duration_since(last) >= self.min_interval);
        if due {
            self.last = Some(now);
        } else {
            self.suppressed += 1;
        }
        due
    }

    /// Forgets the last redraw so the next request passes.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Number of requests dropped so far.
    pub fn suppressed_count(&self) -> u64 {
        self.suppressed
    }
}

impl Default for RedrawThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_REDRAW_INTERVAL)
    }
}
