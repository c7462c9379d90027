use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use bb_shared::phone::{is_valid_phone, normalize_phone_number};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Chinese mobile number or E.164 number; spaces and dashes are ignored
    /// Examples: "13812345678", "+14155552671", "138 1234 5678"
    #[validate(length(min = 7, max = 24), custom = "validate_phone")]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(length(min = 7, max = 24), custom = "validate_phone")]
    pub phone: String,

    /// Code received by SMS
    #[validate(length(max = 16))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    pub message: String,
    pub resend_after: u64, // seconds until can resend
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub verified: bool,
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if is_valid_phone(&normalize_phone_number(phone)) {
        Ok(())
    } else {
        Err(ValidationError::new("phone_format"))
    }
}
