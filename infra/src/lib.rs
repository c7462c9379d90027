//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Bluebook server.
//! It provides concrete implementations of the capability traits defined in
//! `bb_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis client and the script-backed `RedisCodeStore`
//! - **Services**: the script-backed sliding-window `RedisRateLimiter`
//! - **SMS**: providers (log, Twilio) and the failover, timeout and
//!   rate-limit decorators assembled by `build_sms_sender`

use std::sync::Arc;

use bb_core::repositories::{CodeStore, CodeStorePolicy, MemoryCodeStore};
use bb_core::services::{MemoryRateLimiter, RateLimiter, SlidingWindow, SmsSender};
use bb_shared::AppConfig;

/// Cache module - Redis client and code storage
pub mod cache;

/// Services module - Infrastructure service implementations
pub mod services;

/// SMS service module - providers and delivery decorators
pub mod sms;

use cache::{RedisClient, RedisCodeStore};
use services::RedisRateLimiter;

/// Infrastructure service container
///
/// Everything the API layer needs, behind the core traits so the backing
/// implementation can be swapped without touching handlers.
#[derive(Clone)]
pub struct InfrastructureServices {
    pub code_store: Arc<dyn CodeStore>,
    pub sms_limiter: Arc<dyn RateLimiter>,
    pub sms_sender: Arc<dyn SmsSender>,
    /// Present when backed by Redis; used for health checks
    pub redis: Option<Arc<RedisClient>>,
}

impl InfrastructureServices {
    /// Build services that keep all state in process
    ///
    /// Intended for tests and local development without Redis.
    pub fn in_memory(config: &AppConfig) -> Result<Self, InfrastructureError> {
        let code_store = Arc::new(MemoryCodeStore::new(CodeStorePolicy::from(
            &config.verification,
        )));
        let sms_limiter: Arc<dyn RateLimiter> = Arc::new(MemoryRateLimiter::new(
            SlidingWindow::from(&config.rate_limit.sms),
        ));
        let sms_sender =
            sms::build_sms_sender(&config.sms, &config.rate_limit, sms_limiter.clone())?;

        Ok(Self {
            code_store,
            sms_limiter,
            sms_sender,
            redis: None,
        })
    }

    /// Report whether backing stores are reachable
    pub async fn health_check(&self) -> bool {
        match &self.redis {
            Some(redis) => redis.health_check().await.unwrap_or(false),
            None => true,
        }
    }
}

/// Initialize infrastructure services backed by Redis
///
/// This function sets up:
/// - the Redis connection (with connect retries)
/// - the script-backed code store and SMS rate limiter
/// - the SMS provider chain
pub async fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let redis = Arc::new(RedisClient::new(config.cache.clone()).await?);

    let code_store = Arc::new(RedisCodeStore::new(
        redis.clone(),
        CodeStorePolicy::from(&config.verification),
    ));
    let sms_limiter: Arc<dyn RateLimiter> = Arc::new(RedisRateLimiter::new(
        redis.clone(),
        SlidingWindow::from(&config.rate_limit.sms),
    ));
    let sms_sender =
        sms::build_sms_sender(&config.sms, &config.rate_limit, sms_limiter.clone())?;

    tracing::info!(
        sms_provider = sms_sender.provider_name(),
        "Infrastructure services initialized successfully"
    );

    Ok(InfrastructureServices {
        code_store,
        sms_limiter,
        sms_sender,
        redis: Some(redis),
    })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
