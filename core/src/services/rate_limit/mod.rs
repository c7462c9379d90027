//! Sliding-window rate limiting
//!
//! A limiter admits at most `rate` events per key in any trailing window of
//! length `interval`. Admission and recording happen as one atomic step so
//! concurrent callers can never over-admit.

mod memory;

#[cfg(test)]
mod tests;

pub use memory::MemoryRateLimiter;

use async_trait::async_trait;
use bb_shared::config::SlidingWindowConfig;
use std::time::Duration;

use crate::errors::StoreError;

/// Admission control keyed by resource name
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Records an event for `key` unless the window is full
    ///
    /// Returns `Ok(true)` when the event was rejected (limited) and
    /// `Ok(false)` when it was admitted and recorded. Store failures are
    /// returned as errors; the caller decides whether to fail open or closed.
    async fn limit(&self, key: &str) -> Result<bool, StoreError>;
}

/// Window length and capacity of a sliding-window limiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidingWindow {
    pub interval: Duration,
    pub rate: u32,
}

impl SlidingWindow {
    pub fn new(interval: Duration, rate: u32) -> Self {
        Self { interval, rate }
    }
}

impl From<&SlidingWindowConfig> for SlidingWindow {
    fn from(config: &SlidingWindowConfig) -> Self {
        Self::new(config.interval(), config.rate)
    }
}
