//! Configuration for the code service

use bb_shared::VerificationConfig;
use std::time::Duration;

use crate::domain::entities::verification_code::{
    CODE_LENGTH, DEFAULT_EXPIRATION_SECONDS, DEFAULT_RESEND_INTERVAL_SECONDS,
};

/// Template used for login codes unless configured otherwise
pub const DEFAULT_TEMPLATE_ID: &str = "1877556";

/// Configuration for the code service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeServiceConfig {
    /// Digits per generated code
    pub code_length: usize,
    /// SMS template the code is rendered into
    pub template_id: String,
    /// Upper bound on one delivery, failover included
    pub delivery_timeout: Duration,
    /// Reported back to callers in `SendReceipt`
    pub expiration: Duration,
    pub resend_interval: Duration,
}

impl Default for CodeServiceConfig {
    fn default() -> Self {
        Self {
            code_length: CODE_LENGTH,
            template_id: DEFAULT_TEMPLATE_ID.to_string(),
            delivery_timeout: Duration::from_secs(10),
            expiration: Duration::from_secs(DEFAULT_EXPIRATION_SECONDS),
            resend_interval: Duration::from_secs(DEFAULT_RESEND_INTERVAL_SECONDS),
        }
    }
}

impl From<&VerificationConfig> for CodeServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            code_length: config.code_length,
            template_id: config.template_id.clone(),
            delivery_timeout: config.delivery_timeout(),
            expiration: config.expiration(),
            resend_interval: config.resend_interval(),
        }
    }
}
