//! Domain entities representing core business objects.

pub mod verification_code;

pub use verification_code::{
    digest_code, generate_code, CodeSlot, VerificationCode, CODE_LENGTH,
    DEFAULT_EXPIRATION_SECONDS, DEFAULT_RESEND_INTERVAL_SECONDS, LOGIN_BUSINESS, MAX_ATTEMPTS,
};
