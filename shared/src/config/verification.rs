//! Verification code configuration module

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Verification code issuance and validation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Number of digits in a generated code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Seconds a code stays valid after it is issued
    #[serde(default = "default_expiration_seconds")]
    pub expiration_seconds: u64,

    /// Minimum seconds between two codes for the same business and phone
    #[serde(default = "default_resend_interval_seconds")]
    pub resend_interval_seconds: u64,

    /// Verification attempts allowed against one code
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// SMS template used to deliver the code
    #[serde(default = "default_template_id")]
    pub template_id: String,

    /// Upper bound on the whole delivery step, across all providers
    #[serde(default = "default_delivery_timeout_ms")]
    pub delivery_timeout_ms: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            expiration_seconds: default_expiration_seconds(),
            resend_interval_seconds: default_resend_interval_seconds(),
            max_attempts: default_max_attempts(),
            template_id: default_template_id(),
            delivery_timeout_ms: default_delivery_timeout_ms(),
        }
    }
}

impl VerificationConfig {
    pub fn expiration(&self) -> Duration {
        Duration::from_secs(self.expiration_seconds)
    }

    pub fn resend_interval(&self) -> Duration {
        Duration::from_secs(self.resend_interval_seconds)
    }

    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_millis(self.delivery_timeout_ms)
    }
}

fn default_code_length() -> usize {
    6
}

fn default_expiration_seconds() -> u64 {
    600 // 10 minutes
}

fn default_resend_interval_seconds() -> u64 {
    60
}

fn default_max_attempts() -> u32 {
    3
}

fn default_template_id() -> String {
    String::from("1877556")
}

fn default_delivery_timeout_ms() -> u64 {
    10_000
}
