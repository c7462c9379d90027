//! Verification code workflow
//!
//! `CodeService` issues codes into a `CodeStore` and hands them to an
//! `SmsSender`; validation goes straight to the store. Resend throttling and
//! attempt limiting are enforced atomically by the store itself.

mod config;
mod service;
mod traits;
mod types;


pub use config::CodeServiceConfig;
pub use service::CodeService;
pub use traits::SmsSender;
pub use types::SendReceipt;
