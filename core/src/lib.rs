//! # Bluebook Core
//!
//! Core business logic for verification codes sent by SMS.
//! This crate contains the domain model, the error taxonomy, the capability
//! traits that infrastructure implements (`CodeStore`, `RateLimiter`,
//! `SmsSender`, `Clock`), in-memory implementations of them, and the
//! `CodeService` that orchestrates issuance and validation.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
