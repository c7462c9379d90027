//! Rate-limited SMS sender

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use bb_core::errors::SmsError;
use bb_core::services::{RateLimiter, SmsSender};

/// Rejects sends once the limiter's window for `key` is full
pub struct RateLimitedSmsSender {
    inner: Arc<dyn SmsSender>,
    limiter: Arc<dyn RateLimiter>,
    key: String,
}

impl RateLimitedSmsSender {
    pub fn new(inner: Arc<dyn SmsSender>, limiter: Arc<dyn RateLimiter>, key: impl Into<String>) -> Self {
        Self {
            inner,
            limiter,
            key: key.into(),
        }
    }
}

#[async_trait]
impl SmsSender for RateLimitedSmsSender {
    async fn send(
        &self,
        template_id: &str,
        args: &[String],
        recipients: &[String],
    ) -> Result<(), SmsError> {
        let limited = self
            .limiter
            .limit(&self.key)
            .await
            .map_err(SmsError::Limiter)?;
        if limited {
            warn!(key = %self.key, "SMS rate limit triggered, message dropped");
            return Err(SmsError::RateLimited);
        }
        self.inner.send(template_id, args, recipients).await
    }

    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}
