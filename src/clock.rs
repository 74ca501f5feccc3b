//! Monotonic-capable wall clock for order and trade timestamps.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Hands out strictly increasing, microsecond-precision UTC timestamps.
///
/// Wall-clock time can repeat (or, on some platforms, briefly go backwards)
/// between two calls that land in the same microsecond. `Clock` pins each
/// tick to `max(now, last + 1µs)` so arrival order within a single process
/// is always recoverable from the timestamp alone, which the matching loop
/// relies on for FIFO tie-breaks.
#[derive(Debug)]
pub struct Clock {
    last_micros: AtomicI64,
}

impl Clock {
    /// Creates a new clock with no prior ticks recorded.
    pub fn new() -> Self {
        Self {
            last_micros: AtomicI64::new(i64::MIN),
        }
    }

    /// Returns the next timestamp, guaranteed strictly greater than any
    /// timestamp previously returned by this clock.
    pub fn next(&self) -> DateTime<Utc> {
        let now = Utc::now().timestamp_micros();
        let mut prev = self.last_micros.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev.saturating_add(1));
            match self.last_micros.compare_exchange_weak(
                prev,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return micros_to_datetime(candidate),
                Err(actual) => prev = actual,
            }
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

fn micros_to_datetime(micros: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_micros(micros).unwrap_or_else(Utc::now)
}
