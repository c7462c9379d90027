//! Authentication route handlers
//!
//! Phone verification for login: sending and verifying codes.

pub mod send_code;
pub mod verify_code;

use validator::ValidationErrors;

/// Flatten validator output into one message
pub(crate) fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    fields.sort_unstable();
    format!("Invalid request field(s): {}", fields.join(", "))
}
