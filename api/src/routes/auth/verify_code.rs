use actix_web::{web, HttpResponse};
use validator::Validate;

use bb_core::domain::entities::verification_code::LOGIN_BUSINESS;
use bb_shared::phone::normalize_phone_number;

use crate::app::AppState;
use crate::dto::auth::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::error::ApiError;

/// Handler for POST /api/v1/auth/verify-code
///
/// # Request Body
///
/// ```json
/// { "phone": "13812345678", "code": "042617" }
/// ```
///
/// # Responses
/// - 200 `{ "verified": true }`; the code is consumed
/// - 400 `VERIFICATION_CODE_INVALID` for a wrong, expired or used code
/// - 429 `VERIFY_TOO_MANY_ATTEMPTS`
/// - 503 when the store is unavailable
pub async fn verify_code(
    state: web::Data<AppState>,
    request: web::Json<VerifyCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    request
        .validate()
        .map_err(|errors| ApiError::validation(super::describe(&errors)))?;

    let phone = normalize_phone_number(&request.phone);
    let verified = state
        .code_service
        .verify(LOGIN_BUSINESS, &phone, request.code.trim())
        .await?;

    if !verified {
        return Err(ApiError::invalid_code());
    }
    Ok(HttpResponse::Ok().json(VerifyCodeResponse { verified }))
}
