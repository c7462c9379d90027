//! Application state and route table

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use bb_core::repositories::CodeStore;
use bb_core::services::{CodeService, CodeServiceConfig, SmsSender};
use bb_infra::InfrastructureServices;
use bb_shared::{error_codes, ErrorResponse, VerificationConfig};

use crate::handlers::error::ApiError;
use crate::routes::auth::{send_code::send_code, verify_code::verify_code};

/// Code service over whatever store and sender the infrastructure provides
pub type LoginCodeService = CodeService<dyn CodeStore, dyn SmsSender>;

/// Application state that holds shared services
pub struct AppState {
    pub code_service: Arc<LoginCodeService>,
    pub infrastructure: InfrastructureServices,
}

impl AppState {
    pub fn new(infrastructure: InfrastructureServices, verification: &VerificationConfig) -> Self {
        let code_service = Arc::new(CodeService::new(
            infrastructure.code_store.clone(),
            infrastructure.sms_sender.clone(),
            CodeServiceConfig::from(verification),
        ));
        Self {
            code_service,
            infrastructure,
        }
    }
}

/// Register every route; the caller adds `AppState` and middleware
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::validation(err.to_string()).into()),
    )
    // Health check endpoint
    .route("/health", web::get().to(health_check))
    // API v1 routes
    .service(
        web::scope("/api/v1").service(
            web::scope("/auth")
                .route("/send-code", web::post().to(send_code))
                .route("/verify-code", web::post().to(verify_code)),
        ),
    )
    // Default 404 handler
    .default_service(web::route().to(not_found));
}

/// Health check endpoint handler
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let healthy = state.infrastructure.health_check().await;
    let body = serde_json::json!({
        "status": if healthy { "healthy" } else { "degraded" },
        "service": "bluebook-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
