//! SMS provider configuration module

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// SMS delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Providers in failover order; more than one enables failover
    pub providers: Vec<SmsProviderConfig>,

    /// Deadline applied to each individual provider call, in milliseconds
    #[serde(default = "default_provider_timeout_ms")]
    pub provider_timeout_ms: u64,

    /// Template id -> message body with `{0}`, `{1}`... placeholders
    #[serde(default = "default_templates")]
    pub templates: HashMap<String, String>,
}

/// A single SMS provider
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SmsProviderConfig {
    /// Writes messages to the log instead of sending them (development)
    Log {
        #[serde(default = "default_log_name")]
        name: String,
    },
    /// Twilio Messages API
    Twilio(TwilioConfig),
}

/// Twilio credentials and endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,

    /// Twilio Auth Token
    pub auth_token: String,

    /// From phone number (must be a Twilio phone number)
    pub from_number: String,

    /// API base URL, overridable for tests and proxies
    #[serde(default = "default_twilio_base_url")]
    pub base_url: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            providers: vec![SmsProviderConfig::Log {
                name: default_log_name(),
            }],
            provider_timeout_ms: default_provider_timeout_ms(),
            templates: default_templates(),
        }
    }
}

impl SmsConfig {
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }
}

fn default_provider_timeout_ms() -> u64 {
    5_000
}

fn default_log_name() -> String {
    String::from("log")
}

fn default_twilio_base_url() -> String {
    String::from("https://api.twilio.com")
}

fn default_templates() -> HashMap<String, String> {
    HashMap::from([(
        String::from("1877556"),
        String::from("Your Bluebook verification code is {0}. It expires in 10 minutes."),
    )])
}
