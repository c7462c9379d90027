//! Code store trait defining atomic issuance and validation of verification codes.

use std::time::Duration;

use async_trait::async_trait;
use bb_shared::VerificationConfig;

use crate::domain::entities::verification_code::{
    CodeSlot, DEFAULT_EXPIRATION_SECONDS, DEFAULT_RESEND_INTERVAL_SECONDS, MAX_ATTEMPTS,
};
use crate::errors::CodeError;

/// Timing and attempt rules every code store enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeStorePolicy {
    /// Lifetime of an issued code
    pub expiration: Duration,
    /// Minimum time between two successful `set` calls on one slot
    pub resend_interval: Duration,
    /// Verification attempts allowed per issued code
    pub max_attempts: u32,
}

impl CodeStorePolicy {
    /// Remaining lifetime above which a slot counts as recently issued
    pub fn resend_threshold(&self) -> Duration {
        self.expiration.saturating_sub(self.resend_interval)
    }
}

impl Default for CodeStorePolicy {
    fn default() -> Self {
        Self {
            expiration: Duration::from_secs(DEFAULT_EXPIRATION_SECONDS),
            resend_interval: Duration::from_secs(DEFAULT_RESEND_INTERVAL_SECONDS),
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

impl From<&VerificationConfig> for CodeStorePolicy {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            expiration: config.expiration(),
            resend_interval: config.resend_interval(),
            max_attempts: config.max_attempts,
        }
    }
}

/// Store for outstanding verification codes, one per `CodeSlot`
///
/// Both operations must run as a single atomic unit against the backing
/// store. Implementations persist only `digest_code(code)`, never the
/// plaintext.
///
/// # Returns
/// * `set`: `Err(CodeError::SendTooFrequent)` when the slot was written less
///   than `resend_interval` ago; the existing code is left untouched.
/// * `verify`: `Ok(true)` on match (the slot is consumed), `Ok(false)` when the
///   code is absent, expired, consumed or different, and
///   `Err(CodeError::VerifyTooManyAttempts)` once `max_attempts` is used up.
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Stores `code` for `slot`, resetting the attempt counter and expiry
    async fn set(&self, slot: &CodeSlot, code: &str) -> Result<(), CodeError>;

    /// Checks `input` against the code stored for `slot`, counting the attempt
    async fn verify(&self, slot: &CodeSlot, input: &str) -> Result<bool, CodeError>;

    /// Rules this store was built with
    fn policy(&self) -> CodeStorePolicy;
}
