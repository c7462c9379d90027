//! Twilio SMS Service Implementation
//!
//! Sends messages through the Twilio Messages REST API with HTTP basic
//! auth. Request timeouts surface as `SmsError::ProviderTimeout`, which the
//! failover decorator treats like any other provider failure.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

use bb_core::errors::SmsError;
use bb_core::services::SmsSender;
use bb_shared::config::TwilioConfig;
use bb_shared::phone::mask_phone_number;

use super::templates::SmsTemplates;
use crate::InfrastructureError;

const PROVIDER_NAME: &str = "twilio";

#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    code: Option<i64>,
    message: String,
}

/// SMS provider backed by Twilio
pub struct TwilioSmsSender {
    client: reqwest::Client,
    config: TwilioConfig,
    templates: SmsTemplates,
}

impl TwilioSmsSender {
    /// Create a Twilio sender whose HTTP requests give up after `timeout`
    pub fn new(
        config: TwilioConfig,
        templates: SmsTemplates,
        timeout: Duration,
    ) -> Result<Self, InfrastructureError> {
        if config.account_sid.is_empty() || config.auth_token.is_empty() {
            return Err(InfrastructureError::Config(
                "Twilio account_sid and auth_token are required".to_string(),
            ));
        }
        // Validate from number format
        if !config.from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "Twilio from_number must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            config,
            templates,
        })
    }

    /// Messages endpoint of the configured account
    pub fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    async fn send_one(&self, to: &str, body: &str) -> Result<String, SmsError> {
        let params = [
            ("To", to),
            ("From", self.config.from_number.as_str()),
            ("Body", body),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status.is_success() {
            let message: MessageResponse = response.json().await.map_err(request_error)?;
            return Ok(message.sid);
        }

        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(ErrorResponse {
                code: Some(code),
                message,
            }) => format!("HTTP {} (code {}): {}", status.as_u16(), code, message),
            Ok(ErrorResponse { message, .. }) => format!("HTTP {}: {}", status.as_u16(), message),
            Err(_) => format!("HTTP {}", status.as_u16()),
        };
        error!(to = %mask_phone_number(to), error = %message, "Twilio rejected SMS");
        Err(SmsError::Provider {
            provider: PROVIDER_NAME.to_string(),
            message,
        })
    }
}

fn request_error(err: reqwest::Error) -> SmsError {
    if err.is_timeout() {
        SmsError::ProviderTimeout {
            provider: PROVIDER_NAME.to_string(),
        }
    } else {
        SmsError::Provider {
            provider: PROVIDER_NAME.to_string(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl SmsSender for TwilioSmsSender {
    async fn send(
        &self,
        template_id: &str,
        args: &[String],
        recipients: &[String],
    ) -> Result<(), SmsError> {
        let body = self.templates.render(template_id, args)?;

        for recipient in recipients {
            debug!(to = %mask_phone_number(recipient), "Sending SMS via Twilio");
            let sid = self.send_one(recipient, &body).await?;
            info!(
                to = %mask_phone_number(recipient),
                message_sid = %sid,
                "SMS sent via Twilio"
            );
        }
        Ok(())
    }

    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }
}
