//! HTTP surface for the login verification code flow
//!
//! Library exports for the binary and for tests.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod logging;
pub mod routes;

pub use app::{configure, AppState, LoginCodeService};
