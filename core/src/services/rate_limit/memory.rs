use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::StoreError;
use crate::services::clock::{Clock, SystemClock};

use super::{RateLimiter, SlidingWindow};

/// In-process sliding-window limiter
///
/// Keeps the admitted timestamps of every key in arrival order. Entries with
/// `ts <= now - interval` are dropped before counting, the same trimming rule
/// the Redis script applies.
pub struct MemoryRateLimiter {
    window: SlidingWindow,
    events: Mutex<HashMap<String, VecDeque<i64>>>,
    clock: Arc<dyn Clock>,
}

impl MemoryRateLimiter {
    pub fn new(window: SlidingWindow) -> Self {
        Self::with_clock(window, Arc::new(SystemClock))
    }

    pub fn with_clock(window: SlidingWindow, clock: Arc<dyn Clock>) -> Self {
        Self {
            window,
            events: Mutex::new(HashMap::new()),
            clock,
        }
    }

    pub fn window(&self) -> SlidingWindow {
        self.window
    }

    /// Keys with at least one entry still in the map
    pub(crate) async fn tracked_keys(&self) -> usize {
        self.events.lock().await.len()
    }
}

#[async_trait]
impl RateLimiter for MemoryRateLimiter {
    async fn limit(&self, key: &str) -> Result<bool, StoreError> {
        let now = self.clock.now_millis();
        let window_start = now - self.window.interval.as_millis() as i64;

        let mut events = self.events.lock().await;
        // Keys whose newest entry left the window hold nothing countable
        events.retain(|_, entries| entries.back().is_some_and(|ts| *ts > window_start));
        let entries = events.entry(key.to_string()).or_default();
        while entries.front().is_some_and(|ts| *ts <= window_start) {
            entries.pop_front();
        }

        if entries.len() >= self.window.rate as usize {
            return Ok(true);
        }
        entries.push_back(now);
        Ok(false)
    }
}
