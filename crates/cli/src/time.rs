// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Time abstraction for deterministic readiness polling.
//!
//! The sandbox controller waits on the nested context by polling, with an
//! interval and a timeout. A `Clock` trait with a controllable test
//! implementation keeps those waits deterministic under test.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Clock trait for time abstraction
pub trait Clock: Send + Sync {
    /// Get current time as milliseconds since epoch
    fn now_millis(&self) -> u64;

    /// Sleep for a duration
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Real clock using system time
#[derive(Clone, Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Test clock with controllable time progression.
///
/// Sleeping advances the clock by the requested duration and yields to the
/// runtime without any wall-clock delay, so concurrent pollers interleave
/// the way they would under the real clock.
#[derive(Clone, Debug)]
pub struct TestClock {
    /// Current time in milliseconds
    current_millis: Arc<AtomicU64>,
}

impl TestClock {
    /// Create a test clock starting at a given time
    pub fn new(start_millis: u64) -> Self {
        Self {
            current_millis: Arc::new(AtomicU64::new(start_millis)),
        }
    }

    /// Create a test clock starting at Unix epoch
    pub fn at_epoch() -> Self {
        Self::new(0)
    }

    /// Advance time by a duration
    pub fn advance(&self, duration: Duration) {
        self.advance_ms(duration.as_millis() as u64);
    }

    /// Advance time by milliseconds
    pub fn advance_ms(&self, ms: u64) {
        self.current_millis.fetch_add(ms, Ordering::SeqCst);
    }

    /// Set absolute time
    pub fn set(&self, millis: u64) {
        self.current_millis.store(millis, Ordering::SeqCst);
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::at_epoch()
    }
}

impl Clock for TestClock {
    fn now_millis(&self) -> u64 {
        self.current_millis.load(Ordering::SeqCst)
    }

    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        self.advance(duration);
        // No wall-clock wait, but still a scheduling point for other tasks.
        Box::pin(tokio::task::yield_now())
    }
}

/// Clock handle that can be either real or test
#[derive(Clone)]
pub enum ClockHandle {
    System(SystemClock),
    Test(TestClock),
}

impl ClockHandle {
    /// Create a system clock handle
    pub fn system() -> Self {
        Self::System(SystemClock)
    }

    /// Create a test clock handle at epoch
    pub fn test() -> Self {
        Self::Test(TestClock::at_epoch())
    }

    /// Create a test clock handle at a specific time
    pub fn test_at(millis: u64) -> Self {
        Self::Test(TestClock::new(millis))
    }

    /// Get as test clock for manipulation (returns None for system clock)
    pub fn as_test(&self) -> Option<&TestClock> {
        match self {
            Self::Test(c) => Some(c),
            Self::System(_) => None,
        }
    }

    /// Check if this is a test clock
    pub fn is_test(&self) -> bool {
        matches!(self, Self::Test(_))
    }
}

impl Clock for ClockHandle {
    fn now_millis(&self) -> u64 {
        match self {
            Self::System(c) => c.now_millis(),
            Self::Test(c) => c.now_millis(),
        }
    }

    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        match self {
            Self::System(c) => c.sleep(duration),
            Self::Test(c) => c.sleep(duration),
        }
    }
}

impl Default for ClockHandle {
    fn default() -> Self {
        Self::system()
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod tests;
