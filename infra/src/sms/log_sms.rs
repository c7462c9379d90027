//! Development SMS provider that writes messages to the log
//!
//! Nothing leaves the process. Deliveries are kept in memory so tests and
//! local tooling can read back the last code sent to a phone.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::info;

use bb_core::errors::SmsError;
use bb_core::services::SmsSender;
use bb_shared::phone::mask_phone_number;

use super::templates::SmsTemplates;

/// One message handed to the log provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub recipient: String,
    pub template_id: String,
    pub args: Vec<String>,
    pub body: String,
}

/// SMS provider that logs instead of sending
pub struct LogSmsSender {
    name: String,
    templates: SmsTemplates,
    sent: Mutex<Vec<SentSms>>,
    failing: AtomicBool,
}

impl LogSmsSender {
    pub fn new(name: impl Into<String>, templates: SmsTemplates) -> Self {
        Self {
            name: name.into(),
            templates,
            sent: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every following send fail with a provider error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every message sent so far, oldest first
    pub fn sent(&self) -> Vec<SentSms> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }

    /// First template argument of the latest message to `phone`
    pub fn last_code_for(&self, phone: &str) -> Option<String> {
        self.sent()
            .into_iter()
            .rev()
            .find(|sms| sms.recipient == phone)
            .and_then(|sms| sms.args.into_iter().next())
    }
}

#[async_trait]
impl SmsSender for LogSmsSender {
    async fn send(
        &self,
        template_id: &str,
        args: &[String],
        recipients: &[String],
    ) -> Result<(), SmsError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SmsError::Provider {
                provider: self.name.clone(),
                message: "simulated failure".to_string(),
            });
        }

        let body = self.templates.render(template_id, args)?;
        let mut sent = self.sent.lock().map_err(|_| SmsError::Provider {
            provider: self.name.clone(),
            message: "delivery log poisoned".to_string(),
        })?;

        for recipient in recipients {
            info!(
                provider = %self.name,
                to = %mask_phone_number(recipient),
                template_id = template_id,
                body = %body,
                "SMS (not sent, log provider)"
            );
            sent.push(SentSms {
                recipient: recipient.clone(),
                template_id: template_id.to_string(),
                args: args.to_vec(),
                body: body.clone(),
            });
        }
        Ok(())
    }

    fn provider_name(&self) -> &str {
        &self.name
    }
}
