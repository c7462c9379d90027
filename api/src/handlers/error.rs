//! Mapping from domain errors to HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;
use tracing::error;

use bb_core::errors::{CodeError, DomainError, SmsError};
use bb_shared::{error_codes, ErrorResponse};

/// Error returned by handlers, rendered as the shared `ErrorResponse` envelope
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse::new(code, message),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, message)
    }

    /// The submitted code did not match an outstanding code
    pub fn invalid_code() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            error_codes::VERIFICATION_CODE_INVALID,
            "Invalid or expired verification code",
        )
    }

    pub fn code(&self) -> &str {
        &self.body.error
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.body.error, self.body.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let code = err.error_code();
        match &err {
            DomainError::Validation { message } => ApiError::validation(message.clone()),
            DomainError::Code(CodeError::SendTooFrequent) => ApiError::new(
                StatusCode::TOO_MANY_REQUESTS,
                code,
                "Please wait before requesting another code",
            ),
            DomainError::Code(CodeError::VerifyTooManyAttempts) => ApiError::new(
                StatusCode::TOO_MANY_REQUESTS,
                code,
                "Too many attempts, please request a new code",
            ),
            DomainError::Sms(SmsError::RateLimited) => ApiError::new(
                StatusCode::TOO_MANY_REQUESTS,
                code,
                "Too many requests, please try again later",
            ),
            _ => {
                error!(error = %err, code = code, "Request failed");
                ApiError::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    code,
                    "Service temporarily unavailable, please try again later",
                )
            }
        }
    }
}
