//! Failover SMS sender
//!
//! Tries every provider once per send, starting from a rotating index so
//! load spreads across providers. Cancellation and deadline errors end the
//! attempt immediately; any other provider error falls through to the next
//! provider.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

use bb_core::errors::SmsError;
use bb_core::services::SmsSender;

/// SMS sender rotating across several providers
pub struct FailoverSmsSender {
    providers: Vec<Arc<dyn SmsSender>>,
    next: AtomicUsize,
}

impl FailoverSmsSender {
    pub fn new(providers: Vec<Arc<dyn SmsSender>>) -> Self {
        info!(
            providers = providers.len(),
            "Initializing failover SMS sender"
        );
        Self {
            providers,
            next: AtomicUsize::new(0),
        }
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }
}

#[async_trait]
impl SmsSender for FailoverSmsSender {
    async fn send(
        &self,
        template_id: &str,
        args: &[String],
        recipients: &[String],
    ) -> Result<(), SmsError> {
        let len = self.providers.len();
        if len == 0 {
            return Err(SmsError::AllProvidersFailed { attempted: 0 });
        }

        let start = self.next.fetch_add(1, Ordering::Relaxed);
        for offset in 0..len {
            let provider = &self.providers[(start + offset) % len];
            match provider.send(template_id, args, recipients).await {
                Ok(()) => {
                    if offset > 0 {
                        info!(
                            provider = provider.provider_name(),
                            attempt = offset + 1,
                            "SMS delivered after failover"
                        );
                    }
                    return Ok(());
                }
                Err(err) if err.is_fatal() => {
                    warn!(
                        provider = provider.provider_name(),
                        error = %err,
                        "SMS delivery aborted, not failing over"
                    );
                    return Err(err);
                }
                Err(err) => {
                    warn!(
                        provider = provider.provider_name(),
                        error = %err,
                        "SMS provider failed, trying next"
                    );
                }
            }
        }

        error!(attempted = len, "All SMS providers failed");
        Err(SmsError::AllProvidersFailed { attempted: len })
    }

    fn provider_name(&self) -> &str {
        "failover"
    }
}
