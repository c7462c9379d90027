//! Redis cache client implementation
//!
//! This module provides a Redis client with connection retry logic and the
//! few operations the Redis-backed stores need: script invocation, health
//! checks and key inspection. Every command is bounded by the configured
//! response timeout so an unresponsive server surfaces as
//! `StoreError::Unavailable` instead of hanging a request.

use redis::{
    aio::MultiplexedConnection, AsyncCommands, Client, FromRedisValue, RedisError,
    ScriptInvocation,
};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use bb_core::errors::StoreError;
use bb_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Base delay between connection attempts
const CONNECT_RETRY_DELAY_MS: u64 = 100;

/// Redis cache client with connection retry logic
///
/// Cloning is cheap; clones share the multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// Connection attempts are retried `connect_retries` times with
    /// exponential backoff. Commands issued later are never retried.
    ///
    /// # Example
    /// ```no_run
    /// use bb_infra::cache::{CacheConfig, RedisClient};
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let client = RedisClient::new(CacheConfig::new("redis://localhost:6379")).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!("Creating Redis client with URL: {}", mask_url(&config.url));

        // Parse Redis URL and create client
        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(&client, &config).await?;

        info!("Redis client created successfully");

        Ok(Self { connection, config })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: &Client,
        config: &CacheConfig,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let max_attempts = config.connect_retries.max(1);
        let mut attempts = 0;
        let mut delay = CONNECT_RETRY_DELAY_MS;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let result = match timeout(
                config.connection_timeout(),
                client.get_multiplexed_async_connection(),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(RedisError::from((
                    redis::ErrorKind::IoError,
                    "connection timed out",
                ))),
            };

            match result {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_attempts => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_attempts, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Apply the configured key prefix
    pub fn make_key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Run a prepared script invocation and return its integer status
    ///
    /// The script is sent with EVALSHA and loaded on a NOSCRIPT miss; it is
    /// not retried on failure.
    pub async fn eval_status(&self, invocation: &ScriptInvocation<'_>) -> Result<i64, StoreError> {
        let mut conn = self.connection.clone();
        self.bounded(invocation.invoke_async::<_, i64>(&mut conn)).await
    }

    /// Milliseconds to live of a key; `-2` when absent, `-1` without expiry
    pub async fn pttl(&self, key: &str) -> Result<i64, StoreError> {
        let mut conn = self.connection.clone();
        self.bounded(conn.pttl::<_, i64>(key)).await
    }

    /// Delete a key; returns whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let mut conn = self.connection.clone();
        let removed: i64 = self.bounded(conn.del(key)).await?;
        Ok(removed > 0)
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a PING command to verify connectivity.
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        debug!("Performing Redis health check");
        let mut conn = self.connection.clone();
        let pong: String = self
            .bounded(redis::cmd("PING").query_async(&mut conn))
            .await?;
        Ok(pong == "PONG")
    }

    async fn bounded<T, F>(&self, operation: F) -> Result<T, StoreError>
    where
        T: FromRedisValue,
        F: Future<Output = Result<T, RedisError>>,
    {
        match timeout(self.config.response_timeout(), operation).await {
            Ok(result) => result.map_err(store_error),
            Err(_) => {
                warn!(
                    timeout_ms = self.config.response_timeout_ms,
                    "Redis command timed out"
                );
                Err(StoreError::Unavailable(format!(
                    "no response within {}ms",
                    self.config.response_timeout_ms
                )))
            }
        }
    }
}

/// Classify a Redis error as an outage or a rejected command
pub fn store_error(error: RedisError) -> StoreError {
    if error.is_io_error()
        || error.is_connection_refusal()
        || error.is_connection_dropped()
        || error.is_timeout()
    {
        StoreError::Unavailable(error.to_string())
    } else {
        StoreError::Command(error.to_string())
    }
}

/// Mask credentials in Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
