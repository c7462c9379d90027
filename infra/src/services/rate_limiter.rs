//! Redis-backed sliding-window rate limiter
//!
//! Admitted events live in a sorted set scored by their timestamp. Trimming,
//! counting and recording run in a single Lua script, so concurrent callers
//! on any number of instances can never over-admit.

use async_trait::async_trait;
use redis::Script;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use bb_core::errors::StoreError;
use bb_core::services::clock::{Clock, SystemClock};
use bb_core::services::rate_limit::{RateLimiter, SlidingWindow};

use crate::cache::RedisClient;

const KEY_PREFIX: &str = "rate_limit:";

/// Sliding-window limiter shared by every instance using the same Redis
pub struct RedisRateLimiter {
    client: Arc<RedisClient>,
    window: SlidingWindow,
    clock: Arc<dyn Clock>,
    script: Script,
}

impl RedisRateLimiter {
    pub fn new(client: Arc<RedisClient>, window: SlidingWindow) -> Self {
        Self::with_clock(client, window, Arc::new(SystemClock))
    }

    pub fn with_clock(client: Arc<RedisClient>, window: SlidingWindow, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            window,
            clock,
            script: Script::new(include_str!("lua/sliding_window.lua")),
        }
    }

    /// Full Redis key of the window for `key`
    pub fn window_key(&self, key: &str) -> String {
        self.client.make_key(&format!("{}{}", KEY_PREFIX, key))
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn limit(&self, key: &str) -> Result<bool, StoreError> {
        let now = self.clock.now_millis();
        // Two events in the same millisecond must stay distinct members
        let member = format!("{}-{}", now, Uuid::new_v4());

        let mut invocation = self.script.prepare_invoke();
        invocation
            .key(self.window_key(key))
            .arg(now)
            .arg(self.window.interval.as_millis() as u64)
            .arg(self.window.rate)
            .arg(member);

        let limited = match self.client.eval_status(&invocation).await? {
            0 => false,
            1 => true,
            other => return Err(StoreError::UnexpectedResult(other)),
        };

        if limited {
            warn!(key = key, rate = self.window.rate, "Rate limit triggered");
        } else {
            debug!(key = key, "Rate limit check passed");
        }
        Ok(limited)
    }
}
