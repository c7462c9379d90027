//! Main code service implementation

use chrono::{TimeZone, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use bb_shared::phone::mask_phone_number;

use crate::domain::entities::verification_code::{CodeSlot, VerificationCode};
use crate::errors::{CodeError, DomainResult, SmsError};
use crate::repositories::code::CodeStore;
use crate::services::clock::{Clock, SystemClock};

use super::config::CodeServiceConfig;
use super::traits::SmsSender;
use super::types::SendReceipt;

/// Issues verification codes and checks them
pub struct CodeService<C: CodeStore + ?Sized, S: SmsSender + ?Sized> {
    store: Arc<C>,
    sms: Arc<S>,
    config: CodeServiceConfig,
    clock: Arc<dyn Clock>,
}

impl<C: CodeStore + ?Sized, S: SmsSender + ?Sized> CodeService<C, S> {
    /// Create a new code service
    ///
    /// # Arguments
    ///
    /// * `store` - Code store enforcing resend and attempt rules
    /// * `sms` - SMS sender, usually a decorated provider chain
    /// * `config` - Service configuration
    pub fn new(store: Arc<C>, sms: Arc<S>, config: CodeServiceConfig) -> Self {
        Self::with_clock(store, sms, config, Arc::new(SystemClock))
    }

    /// Create a code service whose receipts are timed by `clock`
    ///
    /// Pass the same clock the store uses so `next_resend_at` agrees with
    /// the store's resend check.
    pub fn with_clock(
        store: Arc<C>,
        sms: Arc<S>,
        config: CodeServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            sms,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &CodeServiceConfig {
        &self.config
    }

    /// Issue a fresh code for `(business, phone)` and deliver it by SMS
    ///
    /// This method:
    /// 1. Validates the slot
    /// 2. Generates a new code
    /// 3. Stores it, failing with `SendTooFrequent` inside the resend interval
    /// 4. Sends it within `delivery_timeout`
    ///
    /// A failed delivery is returned to the caller but the stored code stays
    /// valid until it expires or is replaced.
    pub async fn send(&self, business: &str, phone: &str) -> DomainResult<SendReceipt> {
        let slot = CodeSlot::new(business, phone)?;
        let issued = VerificationCode::generate(slot, self.config.code_length);

        if let Err(err) = self.store.set(&issued.slot, &issued.code).await {
            if matches!(err, CodeError::SendTooFrequent) {
                info!(
                    slot = %issued.slot,
                    event = "code_resend_too_soon",
                    "Verification code requested inside resend interval"
                );
            }
            return Err(err.into());
        }

        let args = [issued.code.clone()];
        let recipients = [phone.to_string()];
        let delivery = self
            .sms
            .send(&self.config.template_id, &args, &recipients);

        let result = match tokio::time::timeout(self.config.delivery_timeout, delivery).await {
            Ok(result) => result,
            Err(_) => Err(SmsError::DeadlineExceeded),
        };

        if let Err(err) = result {
            warn!(
                slot = %issued.slot,
                provider = self.sms.provider_name(),
                error = %err,
                event = "code_delivery_failed",
                "Verification code stored but SMS delivery failed"
            );
            return Err(err.into());
        }

        info!(
            business = business,
            phone = %mask_phone_number(phone),
            event = "code_sent",
            "Verification code sent"
        );

        let resend_after = self.config.resend_interval;
        let next_resend_millis = self.clock.now_millis() + resend_after.as_millis() as i64;
        let next_resend_at = Utc
            .timestamp_millis_opt(next_resend_millis)
            .single()
            .unwrap_or_else(Utc::now);
        Ok(SendReceipt {
            resend_after,
            expires_in: self.config.expiration,
            next_resend_at,
        })
    }

    /// Check `input` against the outstanding code for `(business, phone)`
    ///
    /// Returns `Ok(false)` without distinguishing a wrong, expired, consumed or
    /// never issued code. Every input goes to the store and spends an attempt,
    /// so once the attempts are used up any input fails with
    /// `VerifyTooManyAttempts`.
    pub async fn verify(&self, business: &str, phone: &str, input: &str) -> DomainResult<bool> {
        let slot = CodeSlot::new(business, phone)?;

        match self.store.verify(&slot, input).await {
            Ok(matched) => {
                if matched {
                    info!(slot = %slot, event = "code_verified", "Verification code accepted");
                }
                Ok(matched)
            }
            Err(CodeError::VerifyTooManyAttempts) => {
                warn!(
                    slot = %slot,
                    event = "code_attempts_exhausted",
                    "Verification attempted after attempt limit, possible brute force"
                );
                Err(CodeError::VerifyTooManyAttempts.into())
            }
            Err(err) => Err(err.into()),
        }
    }
}
