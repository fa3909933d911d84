//! # Clock
//!
//! Time is an injected capability. Operations read the clock exactly once
//! and carry that reading through every check they make, so a tick landing
//! mid-operation can never split a decision in two.
//!
//! [`SystemClock`] reads wall time through `chrono`. [`ManualClock`] is set
//! and advanced by hand, which lets tests cross an unlock boundary without
//! sleeping.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// A source of the current unix timestamp in seconds.
///
/// Readings must be monotonically non-decreasing.
pub trait Clock: Send + Sync {
    /// Current unix timestamp, seconds.
    fn unix_timestamp(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Creates a clock frozen at `now`.
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    /// Creates a clock frozen at the current wall time.
    pub fn starting_now() -> Self {
        Self::new(Utc::now().timestamp())
    }

    /// Moves the clock forward by `secs` and returns the new reading.
    /// Negative values are ignored so the clock never runs backwards, and the
    /// reading saturates at `i64::MAX`.
    pub fn advance(&self, secs: i64) -> i64 {
        let step = secs.max(0);
        let previous = self
            .now
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| {
                Some(now.saturating_add(step))
            })
            .unwrap_or_else(|now| now);
        previous.saturating_add(step)
    }

    /// Jumps to `timestamp` if that is not in the past of the current reading.
    pub fn set(&self, timestamp: i64) {
        self.now.fetch_max(timestamp, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn unix_timestamp(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
