//! Shared utilities and common types for the Bluebook server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and loading
//! - The API error envelope and error codes
//! - Phone number utilities

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, ConfigError, Environment, LoggingConfig, RateLimitConfig,
    ServerConfig, SmsConfig, VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::phone;
