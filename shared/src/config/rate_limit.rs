//! Rate limiting configuration module

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting of outbound SMS
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Sliding window applied in front of the SMS providers
    #[serde(default)]
    pub sms: SlidingWindowConfig,
}

/// A sliding window: at most `rate` events in any trailing `interval_ms`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SlidingWindowConfig {
    /// Resource name the window is keyed by
    pub key: String,

    /// Window length in milliseconds
    pub interval_ms: u64,

    /// Maximum events admitted per window
    pub rate: u32,
}

impl Default for SlidingWindowConfig {
    fn default() -> Self {
        Self {
            key: String::from("sms"),
            interval_ms: 10 * 60 * 1000,
            rate: 10,
        }
    }
}

impl SlidingWindowConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            sms: SlidingWindowConfig::default(),
        }
    }
}

impl RateLimitConfig {
    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            enabled: true,
            sms: SlidingWindowConfig {
                rate: 100,
                ..Default::default()
            },
        }
    }

    /// Create a production configuration (stricter limits)
    pub fn production() -> Self {
        Self::default()
    }
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sms_window() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.sms.key, "sms");
        assert_eq!(config.sms.rate, 10);
        assert_eq!(config.sms.interval(), Duration::from_secs(600));
    }

    #[test]
    fn test_development_is_more_lenient() {
        assert!(RateLimitConfig::development().sms.rate > RateLimitConfig::production().sms.rate);
    }
}
