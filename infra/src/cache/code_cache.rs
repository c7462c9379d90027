//! Redis-backed verification code store
//!
//! Each slot is a hash `{code, attempts}` under `phone_code:{business}:{phone}`
//! with a TTL equal to the code lifetime. Both operations run as Lua scripts,
//! so the TTL check, write and attempt counting happen in one atomic step on
//! the server.

use async_trait::async_trait;
use redis::Script;
use std::sync::Arc;
use tracing::{debug, error};

use bb_core::domain::entities::verification_code::{digest_code, CodeSlot};
use bb_core::errors::{CodeError, StoreError};
use bb_core::repositories::code::{CodeStore, CodeStorePolicy};

use super::redis_client::RedisClient;

const SET_STORED: i64 = 0;
const SET_TOO_FREQUENT: i64 = -1;

const VERIFY_MATCHED: i64 = 0;
const VERIFY_TOO_MANY_ATTEMPTS: i64 = -1;
const VERIFY_MISMATCH: i64 = -2;
const VERIFY_ABSENT: i64 = -3;

/// Verification code store backed by Redis scripts
pub struct RedisCodeStore {
    client: Arc<RedisClient>,
    policy: CodeStorePolicy,
    set_script: Script,
    verify_script: Script,
}

impl RedisCodeStore {
    pub fn new(client: Arc<RedisClient>, policy: CodeStorePolicy) -> Self {
        Self {
            client,
            policy,
            set_script: Script::new(include_str!("lua/set_code.lua")),
            verify_script: Script::new(include_str!("lua/verify_code.lua")),
        }
    }

    fn key(&self, slot: &CodeSlot) -> String {
        self.client.make_key(&slot.key())
    }
}

#[async_trait]
impl CodeStore for RedisCodeStore {
    async fn set(&self, slot: &CodeSlot, code: &str) -> Result<(), CodeError> {
        let mut invocation = self.set_script.prepare_invoke();
        invocation
            .key(self.key(slot))
            .arg(digest_code(code))
            .arg(self.policy.expiration.as_millis() as u64)
            .arg(self.policy.resend_interval.as_millis() as u64);

        let status = self.client.eval_status(&invocation).await?;
        debug!(slot = %slot, status, "set_code script finished");

        match status {
            SET_STORED => Ok(()),
            SET_TOO_FREQUENT => Err(CodeError::SendTooFrequent),
            other => {
                // -2: the slot exists without an expiry, which only a foreign writer can cause
                error!(slot = %slot, status = other, "Unexpected set_code result");
                Err(StoreError::UnexpectedResult(other).into())
            }
        }
    }

    async fn verify(&self, slot: &CodeSlot, input: &str) -> Result<bool, CodeError> {
        let mut invocation = self.verify_script.prepare_invoke();
        invocation
            .key(self.key(slot))
            .arg(digest_code(input))
            .arg(self.policy.max_attempts);

        let status = self.client.eval_status(&invocation).await?;
        debug!(slot = %slot, status, "verify_code script finished");

        match status {
            VERIFY_MATCHED => Ok(true),
            VERIFY_TOO_MANY_ATTEMPTS => Err(CodeError::VerifyTooManyAttempts),
            VERIFY_MISMATCH | VERIFY_ABSENT => Ok(false),
            other => {
                error!(slot = %slot, status = other, "Unexpected verify_code result");
                Err(StoreError::UnexpectedResult(other).into())
            }
        }
    }

    fn policy(&self) -> CodeStorePolicy {
        self.policy
    }
}
