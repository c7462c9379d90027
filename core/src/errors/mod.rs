//! Domain-specific error types and error handling.

mod types;

pub use types::{CodeError, SmsError, StoreError};

use bb_shared::error_codes;
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Code(#[from] CodeError),

    #[error(transparent)]
    Sms(#[from] SmsError),
}

impl DomainError {
    /// Stable machine readable code for the API error envelope
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::Code(CodeError::SendTooFrequent) => error_codes::SEND_TOO_FREQUENT,
            DomainError::Code(CodeError::VerifyTooManyAttempts) => {
                error_codes::VERIFY_TOO_MANY_ATTEMPTS
            }
            DomainError::Code(CodeError::Store(_)) => error_codes::CACHE_ERROR,
            DomainError::Sms(SmsError::RateLimited) => error_codes::RATE_LIMITED,
            DomainError::Sms(_) => error_codes::SMS_ERROR,
        }
    }

    /// Whether the caller should back off and retry later
    pub fn is_throttled(&self) -> bool {
        matches!(
            self,
            DomainError::Code(CodeError::SendTooFrequent)
                | DomainError::Code(CodeError::VerifyTooManyAttempts)
                | DomainError::Sms(SmsError::RateLimited)
        )
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::Code(CodeError::Store(err))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
