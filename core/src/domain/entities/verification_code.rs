//! Verification code entity for SMS-based authentication.

use rand::{rngs::OsRng, Rng};
use sha2::{Digest, Sha256};
use std::fmt;

use bb_shared::phone::is_valid_phone;

use crate::errors::{DomainError, DomainResult};

/// Maximum number of verification attempts allowed per issued code
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (10 minutes)
pub const DEFAULT_EXPIRATION_SECONDS: u64 = 600;

/// Default minimum interval between two codes for the same slot
pub const DEFAULT_RESEND_INTERVAL_SECONDS: u64 = 60;

/// Business tag used by the SMS login flow
pub const LOGIN_BUSINESS: &str = "login";

/// Longest business tag accepted
const MAX_BUSINESS_LEN: usize = 32;

/// The (business, phone) pair a code is issued for
///
/// At most one code is outstanding per slot. Both parts are validated on
/// construction so that `key()` is collision free: a business tag can never
/// contain the `:` separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeSlot {
    business: String,
    phone: String,
}

impl CodeSlot {
    /// Creates a slot after validating the business tag and phone number
    ///
    /// # Arguments
    ///
    /// * `business` - lowercase tag such as `login` or `reset-password`
    /// * `phone` - Chinese mobile number or E.164 number, without formatting
    pub fn new(business: &str, phone: &str) -> DomainResult<Self> {
        let valid_business = !business.is_empty()
            && business.len() <= MAX_BUSINESS_LEN
            && business
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
        if !valid_business {
            return Err(DomainError::Validation {
                message: format!("Invalid business tag: {:?}", business),
            });
        }

        if !is_valid_phone(phone) {
            return Err(DomainError::Validation {
                message: "Invalid phone number format".to_string(),
            });
        }

        Ok(Self {
            business: business.to_string(),
            phone: phone.to_string(),
        })
    }

    pub fn business(&self) -> &str {
        &self.business
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Storage key of the slot: `phone_code:{business}:{phone}`
    pub fn key(&self) -> String {
        format!("phone_code:{}:{}", self.business, self.phone)
    }
}

impl fmt::Display for CodeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.business,
            bb_shared::phone::mask_phone_number(&self.phone)
        )
    }
}

/// A freshly issued code together with the slot it belongs to
///
/// Only the issuing side ever holds the plaintext; stores keep `digest()`.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationCode {
    pub slot: CodeSlot,
    pub code: String,
}

impl VerificationCode {
    /// Issues a new random code of `length` digits for `slot`
    pub fn generate(slot: CodeSlot, length: usize) -> Self {
        Self {
            slot,
            code: generate_code(length),
        }
    }

    pub fn digest(&self) -> String {
        digest_code(&self.code)
    }
}

impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationCode")
            .field("slot", &self.slot)
            .field("code", &"******")
            .finish()
    }
}

/// Generates a uniformly random numeric code of `length` digits
///
/// Uses OsRng so codes are not predictable from earlier ones. The whole range
/// including leading zeros is reachable, e.g. `000000`..=`999999` for six digits.
pub fn generate_code(length: usize) -> String {
    let upper = 10u64.pow(length as u32);
    let code: u64 = OsRng.gen_range(0..upper);
    format!("{:0width$}", code, width = length)
}

/// Hex encoded SHA-256 of a code, the form in which codes are stored
pub fn digest_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    format!("{:x}", hasher.finalize())
}
