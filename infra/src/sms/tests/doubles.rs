//! Scripted SMS senders and limiters for decorator tests

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bb_core::errors::{SmsError, StoreError};
use bb_core::services::{RateLimiter, SmsSender};

/// Shared record of which provider was called, in order
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub struct ScriptedSender {
    name: String,
    outcome: Result<(), SmsError>,
    delay: Option<Duration>,
    calls: CallLog,
}

impl ScriptedSender {
    pub fn ok(name: &str, calls: &CallLog) -> Arc<dyn SmsSender> {
        Self::with_outcome(name, Ok(()), calls)
    }

    pub fn failing(name: &str, error: SmsError, calls: &CallLog) -> Arc<dyn SmsSender> {
        Self::with_outcome(name, Err(error), calls)
    }

    pub fn slow(name: &str, delay: Duration, calls: &CallLog) -> Arc<dyn SmsSender> {
        Arc::new(Self {
            name: name.to_string(),
            outcome: Ok(()),
            delay: Some(delay),
            calls: calls.clone(),
        })
    }

    fn with_outcome(name: &str, outcome: Result<(), SmsError>, calls: &CallLog) -> Arc<dyn SmsSender> {
        Arc::new(Self {
            name: name.to_string(),
            outcome,
            delay: None,
            calls: calls.clone(),
        })
    }
}

pub fn provider_error(name: &str) -> SmsError {
    SmsError::Provider {
        provider: name.to_string(),
        message: "gateway returned 500".to_string(),
    }
}

#[async_trait]
impl SmsSender for ScriptedSender {
    async fn send(
        &self,
        _template_id: &str,
        _args: &[String],
        _recipients: &[String],
    ) -> Result<(), SmsError> {
        self.calls.lock().unwrap().push(self.name.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone()
    }

    fn provider_name(&self) -> &str {
        &self.name
    }
}

/// Limiter whose store is unreachable
pub struct BrokenLimiter;

#[async_trait]
impl RateLimiter for BrokenLimiter {
    async fn limit(&self, _key: &str) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

pub fn args(code: &str) -> Vec<String> {
    vec![code.to_string()]
}

pub fn to(phone: &str) -> Vec<String> {
    vec![phone.to_string()]
}
