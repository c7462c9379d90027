use actix_web::{http::StatusCode, test};
use serde_json::json;

use bb_api::dto::auth::SendCodeResponse;

use crate::common::{TestHarness, PHONE};

#[actix_web::test]
async fn test_send_code_success_chinese_phone() {
    let harness = TestHarness::new();
    let app = test::init_service(harness.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "phone": PHONE }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: SendCodeResponse = test::read_body_json(resp).await;
    assert_eq!(body.resend_after, 60);
    assert_eq!(body.expires_in, 600);
    assert_eq!(harness.last_code(PHONE).len(), 6);
}

#[actix_web::test]
async fn test_send_code_normalizes_formatting() {
    let harness = TestHarness::new();
    let app = test::init_service(harness.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "phone": "+1 415-555-2671" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(harness.sms.last_code_for("+14155552671").is_some());
}

#[actix_web::test]
async fn test_send_code_invalid_phone() {
    let harness = TestHarness::new();
    let app = test::init_service(harness.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "phone": "12345678" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(harness.sms.sent().is_empty());
}

#[actix_web::test]
async fn test_send_code_malformed_json() {
    let harness = TestHarness::new();
    let app = test::init_service(harness.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"phone\":")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_send_code_too_frequent() {
    let harness = TestHarness::new();
    let app = test::init_service(harness.app()).await;

    for expected in [StatusCode::OK, StatusCode::TOO_MANY_REQUESTS] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/send-code")
            .set_json(json!({ "phone": PHONE }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);

        if expected == StatusCode::TOO_MANY_REQUESTS {
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "SEND_TOO_FREQUENT");
        }
    }
    assert_eq!(harness.sms.sent().len(), 1);
}

#[actix_web::test]
async fn test_send_code_global_sms_budget() {
    let harness = TestHarness::with_sms_rate(1);
    let app = test::init_service(harness.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "phone": PHONE }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "phone": "13900000000" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "RATE_LIMITED");
}

#[actix_web::test]
async fn test_send_code_provider_failure_is_unavailable() {
    let harness = TestHarness::new();
    harness.sms.set_failing(true);
    let app = test::init_service(harness.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "phone": PHONE }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "SMS_ERROR");
}
