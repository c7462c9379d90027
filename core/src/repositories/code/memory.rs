//! In-process code store

use async_trait::async_trait;
use constant_time_eq::constant_time_eq;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::entities::verification_code::{digest_code, CodeSlot};
use crate::errors::CodeError;
use crate::services::clock::{Clock, SystemClock};

use super::r#trait::{CodeStore, CodeStorePolicy};

#[derive(Debug, Clone)]
struct StoredCode {
    digest: String,
    attempts: u32,
    expires_at: i64,
}

/// Code store holding every slot in one mutex-guarded map
///
/// Suitable for tests and single-instance deployments. Each operation holds
/// the lock for its whole check-and-write, which gives the same atomicity
/// the Redis scripts get from the server.
pub struct MemoryCodeStore {
    slots: Mutex<HashMap<String, StoredCode>>,
    policy: CodeStorePolicy,
    clock: Arc<dyn Clock>,
}

impl MemoryCodeStore {
    pub fn new(policy: CodeStorePolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    pub fn with_clock(policy: CodeStorePolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            policy,
            clock,
        }
    }

    /// Attempts recorded against the live code of `slot`, if any
    pub async fn attempts(&self, slot: &CodeSlot) -> Option<u32> {
        let now = self.clock.now_millis();
        let slots = self.slots.lock().await;
        slots
            .get(&slot.key())
            .filter(|stored| stored.expires_at > now)
            .map(|stored| stored.attempts)
    }

    /// Number of unexpired slots
    pub async fn len(&self) -> usize {
        let now = self.clock.now_millis();
        let slots = self.slots.lock().await;
        slots.values().filter(|stored| stored.expires_at > now).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Entries held in the map, expired ones included
    pub(crate) async fn stored_entries(&self) -> usize {
        self.slots.lock().await.len()
    }
}

impl Default for MemoryCodeStore {
    fn default() -> Self {
        Self::new(CodeStorePolicy::default())
    }
}

#[async_trait]
impl CodeStore for MemoryCodeStore {
    async fn set(&self, slot: &CodeSlot, code: &str) -> Result<(), CodeError> {
        let now = self.clock.now_millis();
        let expiration_ms = self.policy.expiration.as_millis() as i64;
        let threshold_ms = self.policy.resend_threshold().as_millis() as i64;

        let mut slots = self.slots.lock().await;
        slots.retain(|_, stored| stored.expires_at > now);
        if let Some(stored) = slots.get(&slot.key()) {
            let remaining = stored.expires_at - now;
            if remaining > threshold_ms {
                return Err(CodeError::SendTooFrequent);
            }
        }

        slots.insert(
            slot.key(),
            StoredCode {
                digest: digest_code(code),
                attempts: 0,
                expires_at: now + expiration_ms,
            },
        );
        Ok(())
    }

    async fn verify(&self, slot: &CodeSlot, input: &str) -> Result<bool, CodeError> {
        let now = self.clock.now_millis();
        let key = slot.key();

        let mut slots = self.slots.lock().await;
        let stored = match slots.get_mut(&key) {
            Some(stored) if stored.expires_at > now => stored,
            Some(_) => {
                slots.remove(&key);
                return Ok(false);
            }
            None => return Ok(false),
        };

        if stored.attempts >= self.policy.max_attempts {
            return Err(CodeError::VerifyTooManyAttempts);
        }
        stored.attempts += 1;

        let input_digest = digest_code(input);
        if constant_time_eq(stored.digest.as_bytes(), input_digest.as_bytes()) {
            slots.remove(&key);
            return Ok(true);
        }
        Ok(false)
    }

    fn policy(&self) -> CodeStorePolicy {
        self.policy
    }
}
