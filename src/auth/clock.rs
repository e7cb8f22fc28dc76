//! Wall-clock source for the `X-Unixtime` header.
//!
//! The server rejects requests whose timestamp drifts too far from its own
//! clock, so the default provider reads the system time on every call.

use time::OffsetDateTime;

/// Trait for providing the Unix timestamp stamped on each request.
pub trait UnixClock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn unix_time(&self) -> i64;
}

/// Clock backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock.
    pub fn new() -> Self {
        Self
    }
}

impl UnixClock for SystemClock {
    fn unix_time(&self) -> i64 {
        OffsetDateTime::now_utc().unix_timestamp()
    }
}

/// Clock that always reports the same instant.
///
/// Useful for reproducing a signature exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl UnixClock for FixedClock {
    fn unix_time(&self) -> i64 {
        self.0
    }
}
