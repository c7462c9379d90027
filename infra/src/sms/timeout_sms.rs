//! Per-provider delivery deadline

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use bb_core::errors::SmsError;
use bb_core::services::SmsSender;

/// Fails with `ProviderTimeout` when the wrapped sender takes too long
///
/// The pending send is dropped, which aborts its in-flight request.
pub struct TimeoutSmsSender {
    inner: Arc<dyn SmsSender>,
    timeout: Duration,
}

impl TimeoutSmsSender {
    pub fn new(inner: Arc<dyn SmsSender>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl SmsSender for TimeoutSmsSender {
    async fn send(
        &self,
        template_id: &str,
        args: &[String],
        recipients: &[String],
    ) -> Result<(), SmsError> {
        match tokio::time::timeout(self.timeout, self.inner.send(template_id, args, recipients)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    provider = self.inner.provider_name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "SMS provider timed out"
                );
                Err(SmsError::ProviderTimeout {
                    provider: self.inner.provider_name().to_string(),
                })
            }
        }
    }

    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}
