//! Time abstraction for testability.
//!
//! This module provides a [`Clock`] trait that allows injecting mock clocks
//! in tests while using the real system clock in production. Webhook
//! timestamps are milliseconds since the Unix epoch, so the trait also
//! exposes the current time in that unit.

use std::time::{SystemTime, UNIX_EPOCH};

/// Abstraction over system time for testability.
///
/// Implementations provide the current time, allowing tests to inject
/// controlled time values instead of relying on actual system time.
///
/// # Example
///
/// ```
/// use usesend_webhooks::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// assert!(now >= std::time::SystemTime::UNIX_EPOCH);
/// assert!(clock.now_millis() > 0);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;

    /// Returns the current time as milliseconds since the Unix epoch.
    ///
    /// Times before the epoch yield negative values; values beyond the
    /// `i64` range saturate.
    fn now_millis(&self) -> i64 {
        match self.now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX),
            Err(e) => i64::try_from(e.duration().as_millis()).map_or(i64::MIN, |ms| -ms),
        }
    }
}

/// Production clock using actual system time.
///
/// This is the default clock implementation that delegates to
/// [`SystemTime::now()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A mock clock for testing that returns controlled time values.
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct MockClock {
    /// Milliseconds since `UNIX_EPOCH`, atomically updated.
    millis: std::sync::atomic::AtomicU64,
}

#[cfg(test)]
impl MockClock {
    pub(crate) const fn new(initial_millis: u64) -> Self {
        Self {
            millis: std::sync::atomic::AtomicU64::new(initial_millis),
        }
    }

    pub(crate) fn advance(&self, millis: u64) {
        self.millis
            .fetch_add(millis, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
impl Clock for MockClock {
    fn now(&self) -> SystemTime {
        UNIX_EPOCH
            + std::time::Duration::from_millis(
                self.millis.load(std::sync::atomic::Ordering::SeqCst),
            )
    }
}
