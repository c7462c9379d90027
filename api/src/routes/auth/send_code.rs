use actix_web::{web, HttpResponse};
use tracing::info;
use validator::Validate;

use bb_core::domain::entities::verification_code::LOGIN_BUSINESS;
use bb_shared::phone::{mask_phone_number, normalize_phone_number};

use crate::app::AppState;
use crate::dto::auth::{SendCodeRequest, SendCodeResponse};
use crate::handlers::error::ApiError;

/// Handler for POST /api/v1/auth/send-code
///
/// Sends a login verification code to the specified phone number.
///
/// # Request Body
///
/// ```json
/// { "phone": "13812345678" }
/// ```
///
/// # Responses
/// - 200 `{ "message": "...", "resend_after": 60, "expires_in": 600 }`
/// - 400 `VALIDATION_ERROR`
/// - 429 `SEND_TOO_FREQUENT` or `RATE_LIMITED`
/// - 503 when the store or every SMS provider is unavailable
pub async fn send_code(
    state: web::Data<AppState>,
    request: web::Json<SendCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    request
        .validate()
        .map_err(|errors| ApiError::validation(super::describe(&errors)))?;

    let phone = normalize_phone_number(&request.phone);
    info!(phone = %mask_phone_number(&phone), "Processing send_code request");

    let receipt = state.code_service.send(LOGIN_BUSINESS, &phone).await?;

    Ok(HttpResponse::Ok().json(SendCodeResponse {
        message: "Verification code sent".to_string(),
        resend_after: receipt.resend_after.as_secs(),
        expires_in: receipt.expires_in.as_secs(),
    }))
}
