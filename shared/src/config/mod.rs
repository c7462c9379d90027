//! Configuration module with business-specific sub-modules
//!
//! - `cache` - Redis connection configuration
//! - `environment` - Environment detection and logging configuration
//! - `rate_limit` - Sliding-window limits for outbound SMS
//! - `server` - HTTP server configuration
//! - `sms` - SMS providers and message templates
//! - `verification` - Verification code lifetime, resend and attempt policy

pub mod cache;
pub mod environment;
pub mod rate_limit;
pub mod server;
pub mod sms;
pub mod verification;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub use cache::CacheConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use rate_limit::{RateLimitConfig, SlidingWindowConfig};
pub use server::ServerConfig;
pub use sms::{SmsConfig, SmsProviderConfig, TwilioConfig};
pub use verification::VerificationConfig;

/// Prefix for environment variable overrides, e.g. `APP__VERIFICATION__MAX_ATTEMPTS=5`
pub const ENV_PREFIX: &str = "APP";

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Redis configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Verification code policy
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// SMS providers
    #[serde(default)]
    pub sms: SmsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
            verification: VerificationConfig::default(),
            rate_limit: RateLimitConfig::development(),
            sms: SmsConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            cache: CacheConfig::default().with_prefix("bluebook"),
            verification: VerificationConfig::default(),
            rate_limit: RateLimitConfig::production(),
            sms: SmsConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Preset for an environment, before files and variables are applied
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        }
    }

    /// Load configuration for the environment named by `ENVIRONMENT`
    ///
    /// Sources, lowest precedence first: the environment preset, `.env`,
    /// `config/{environment}.toml` when present, then `APP__*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_from(Environment::from_env(), Path::new("config"))
    }

    /// Load configuration using an explicit environment and config directory
    pub fn load_from(env: Environment, config_dir: &Path) -> Result<Self, ConfigError> {
        let preset = Self::for_environment(env);
        let file = config_dir.join(env.config_file());

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&preset)?)
            .add_source(config::File::from(file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject combinations the verification and rate limiting logic cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        let v = &self.verification;
        if v.code_length == 0 || v.code_length > 9 {
            return Err(ConfigError::Invalid(format!(
                "verification.code_length must be between 1 and 9, got {}",
                v.code_length
            )));
        }
        if v.resend_interval_seconds >= v.expiration_seconds {
            return Err(ConfigError::Invalid(format!(
                "verification.resend_interval_seconds ({}) must be less than expiration_seconds ({})",
                v.resend_interval_seconds, v.expiration_seconds
            )));
        }
        if v.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "verification.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.rate_limit.enabled && self.rate_limit.sms.rate == 0 {
            return Err(ConfigError::Invalid(
                "rate_limit.sms.rate must be at least 1".to_string(),
            ));
        }
        if self.sms.providers.is_empty() {
            return Err(ConfigError::Invalid(
                "sms.providers must name at least one provider".to_string(),
            ));
        }
        if !self.sms.templates.contains_key(&v.template_id) {
            return Err(ConfigError::Invalid(format!(
                "sms.templates has no entry for verification.template_id {}",
                v.template_id
            )));
        }
        Ok(())
    }
}
