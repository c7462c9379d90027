//! Shared setup for API tests

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};

use bb_api::{app, AppState};
use bb_core::repositories::{CodeStorePolicy, MemoryCodeStore};
use bb_core::services::{MemoryRateLimiter, RateLimiter, SlidingWindow, SmsSender};
use bb_infra::sms::{LogSmsSender, RateLimitedSmsSender, SmsTemplates};
use bb_infra::InfrastructureServices;
use bb_shared::VerificationConfig;

pub const PHONE: &str = "13800000000";

/// In-memory services plus handles for inspecting them
pub struct TestHarness {
    pub state: web::Data<AppState>,
    pub sms: Arc<LogSmsSender>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_sms_rate(100)
    }

    /// Harness whose SMS budget is `rate` messages per ten minutes
    pub fn with_sms_rate(rate: u32) -> Self {
        let verification = VerificationConfig::default();
        let sms = Arc::new(LogSmsSender::new(
            "log",
            SmsTemplates::new(HashMap::from([(
                verification.template_id.clone(),
                "Your code is {0}".to_string(),
            )])),
        ));
        let limiter: Arc<dyn RateLimiter> = Arc::new(MemoryRateLimiter::new(SlidingWindow::new(
            Duration::from_secs(600),
            rate,
        )));
        let sender: Arc<dyn SmsSender> =
            Arc::new(RateLimitedSmsSender::new(sms.clone(), limiter.clone(), "sms"));

        let infrastructure = InfrastructureServices {
            code_store: Arc::new(MemoryCodeStore::new(CodeStorePolicy::from(&verification))),
            sms_limiter: limiter,
            sms_sender: sender,
            redis: None,
        };

        Self {
            state: web::Data::new(AppState::new(infrastructure, &verification)),
            sms,
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.state.clone())
            .configure(app::configure)
    }

    /// Code most recently delivered to `phone`
    pub fn last_code(&self, phone: &str) -> String {
        self.sms
            .last_code_for(phone)
            .expect("a code should have been sent")
    }
}
