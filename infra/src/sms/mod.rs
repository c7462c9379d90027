//! SMS delivery
//!
//! Providers implement `bb_core::services::SmsSender` directly; decorators
//! wrap any sender and implement the same trait, so a deployment is a chain
//! assembled from configuration by [`build_sms_sender`]:
//!
//! ```text
//! RateLimitedSmsSender -> FailoverSmsSender -> [TimeoutSmsSender -> provider]...
//! ```

pub mod failover_sms;
pub mod log_sms;
pub mod rate_limited_sms;
pub mod templates;
pub mod timeout_sms;
pub mod twilio;

#[cfg(test)]
mod tests;

pub use failover_sms::FailoverSmsSender;
pub use log_sms::{LogSmsSender, SentSms};
pub use rate_limited_sms::RateLimitedSmsSender;
pub use templates::SmsTemplates;
pub use timeout_sms::TimeoutSmsSender;
pub use twilio::TwilioSmsSender;

use std::sync::Arc;
use tracing::info;

use bb_core::services::{RateLimiter, SmsSender};
use bb_shared::config::{RateLimitConfig, SmsConfig, SmsProviderConfig};

use crate::InfrastructureError;

/// Assemble the SMS sender chain described by `config`
///
/// Every provider gets its own deadline; more than one provider enables
/// failover; the rate limiter guards the whole chain when enabled.
pub fn build_sms_sender(
    config: &SmsConfig,
    rate_limit: &RateLimitConfig,
    limiter: Arc<dyn RateLimiter>,
) -> Result<Arc<dyn SmsSender>, InfrastructureError> {
    if config.providers.is_empty() {
        return Err(InfrastructureError::Config(
            "at least one SMS provider must be configured".to_string(),
        ));
    }

    let templates = SmsTemplates::new(config.templates.clone());
    let mut providers: Vec<Arc<dyn SmsSender>> = Vec::with_capacity(config.providers.len());
    for provider in &config.providers {
        let sender: Arc<dyn SmsSender> = match provider {
            SmsProviderConfig::Log { name } => {
                Arc::new(LogSmsSender::new(name.clone(), templates.clone()))
            }
            SmsProviderConfig::Twilio(twilio) => Arc::new(TwilioSmsSender::new(
                twilio.clone(),
                templates.clone(),
                config.provider_timeout(),
            )?),
        };
        info!(provider = sender.provider_name(), "SMS provider configured");
        providers.push(Arc::new(TimeoutSmsSender::new(sender, config.provider_timeout())));
    }

    let mut sender: Arc<dyn SmsSender> = if providers.len() == 1 {
        providers.remove(0)
    } else {
        Arc::new(FailoverSmsSender::new(providers))
    };

    if rate_limit.enabled {
        sender = Arc::new(RateLimitedSmsSender::new(
            sender,
            limiter,
            rate_limit.sms.key.clone(),
        ));
    }

    Ok(sender)
}
