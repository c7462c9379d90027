//! Error types for code storage, code lifecycle and SMS delivery
//!
//! Each layer gets its own enum so callers can match on exactly the
//! failures an operation can produce. `DomainError` in the parent module
//! bridges them for the service layer.

use thiserror::Error;

/// Failures of the shared key-value store backing codes and rate limits
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or did not answer in time
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with an error
    #[error("Store command failed: {0}")]
    Command(String),

    /// A script returned a status outside its documented set
    #[error("Unexpected store result: {0}")]
    UnexpectedResult(i64),
}

/// Code lifecycle errors with a caller-visible meaning
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    /// A code for the slot was issued less than the resend interval ago
    #[error("Verification code sent too frequently")]
    SendTooFrequent,

    /// The issued code has used up its attempts
    #[error("Too many verification attempts")]
    VerifyTooManyAttempts,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// SMS delivery errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SmsError {
    /// The global sending budget is exhausted
    #[error("SMS rate limit exceeded")]
    RateLimited,

    #[error("All {attempted} SMS providers failed")]
    AllProvidersFailed { attempted: usize },

    #[error("SMS delivery cancelled")]
    Cancelled,

    #[error("SMS delivery deadline exceeded")]
    DeadlineExceeded,

    /// A single provider did not answer within its own deadline
    #[error("SMS provider {provider} timed out")]
    ProviderTimeout { provider: String },

    #[error("SMS provider {provider} failed: {message}")]
    Provider { provider: String, message: String },

    /// The limiter guarding delivery could not decide
    #[error("SMS rate limiter failed: {0}")]
    Limiter(StoreError),

    #[error("Unknown SMS template: {0}")]
    UnknownTemplate(String),
}

impl SmsError {
    /// Errors that must stop failover instead of moving to the next provider
    ///
    /// Only the caller's own deadline or cancellation is fatal; a provider
    /// that times out on its own is skipped like any other failure.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SmsError::Cancelled | SmsError::DeadlineExceeded)
    }
}
