//! SMS delivery contract consumed by the code service

use async_trait::async_trait;

use crate::errors::SmsError;

/// Gateway that delivers a templated message to one or more recipients
///
/// Implementations must return `SmsError::Cancelled` or
/// `SmsError::DeadlineExceeded` only when the caller aborted the delivery.
/// A provider that is merely slow reports `SmsError::ProviderTimeout`, so
/// decorators can tell a dead caller from a failing provider.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send template `template_id` rendered with `args` to every recipient
    async fn send(
        &self,
        template_id: &str,
        args: &[String],
        recipients: &[String],
    ) -> Result<(), SmsError>;

    /// Name used in logs and provider errors
    fn provider_name(&self) -> &str;
}
