//! Types for code service results

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Outcome of a successful `CodeService::send`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    /// Time before another code can be requested for the same slot
    pub resend_after: Duration,
    /// Lifetime of the code just sent
    pub expires_in: Duration,
    /// When the user can request another code
    pub next_resend_at: DateTime<Utc>,
}
