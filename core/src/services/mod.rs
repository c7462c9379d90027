//! Business services containing domain logic and use cases.

pub mod clock;
pub mod rate_limit;
pub mod verification;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use rate_limit::{MemoryRateLimiter, RateLimiter, SlidingWindow};
pub use verification::{CodeService, CodeServiceConfig, SendReceipt, SmsSender};
