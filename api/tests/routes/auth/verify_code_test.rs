use actix_web::{http::StatusCode, test};
use serde_json::json;

use crate::common::{TestHarness, PHONE};

macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {
        test::call_service(
            &$app,
            test::TestRequest::post()
                .uri($uri)
                .set_json($body)
                .to_request(),
        )
        .await
    };
}

#[actix_web::test]
async fn test_verify_code_success_consumes_code() {
    let harness = TestHarness::new();
    let app = test::init_service(harness.app()).await;

    let resp = post_json!(app, "/api/v1/auth/send-code", json!({ "phone": PHONE }));
    assert_eq!(resp.status(), StatusCode::OK);
    let code = harness.last_code(PHONE);

    let resp = post_json!(
        app,
        "/api/v1/auth/verify-code",
        json!({ "phone": PHONE, "code": code })
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["verified"], true);

    let resp = post_json!(
        app,
        "/api/v1/auth/verify-code",
        json!({ "phone": PHONE, "code": code })
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VERIFICATION_CODE_INVALID");
}

#[actix_web::test]
async fn test_verify_code_without_send() {
    let harness = TestHarness::new();
    let app = test::init_service(harness.app()).await;

    let resp = post_json!(
        app,
        "/api/v1/auth/verify-code",
        json!({ "phone": PHONE, "code": "042617" })
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VERIFICATION_CODE_INVALID");
}

#[actix_web::test]
async fn test_verify_code_too_many_attempts() {
    let harness = TestHarness::new();
    let app = test::init_service(harness.app()).await;

    post_json!(app, "/api/v1/auth/send-code", json!({ "phone": PHONE }));
    let code = harness.last_code(PHONE);
    let wrong = if code == "000000" { "111111" } else { "000000" };

    for _ in 0..3 {
        let resp = post_json!(
            app,
            "/api/v1/auth/verify-code",
            json!({ "phone": PHONE, "code": wrong })
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    let resp = post_json!(
        app,
        "/api/v1/auth/verify-code",
        json!({ "phone": PHONE, "code": code })
    );
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VERIFY_TOO_MANY_ATTEMPTS");
}

#[actix_web::test]
async fn test_verify_code_malformed_code_counts_as_attempt() {
    let harness = TestHarness::new();
    let app = test::init_service(harness.app()).await;

    post_json!(app, "/api/v1/auth/send-code", json!({ "phone": PHONE }));
    let code = harness.last_code(PHONE);

    for input in ["abc", "12345", ""] {
        let resp = post_json!(
            app,
            "/api/v1/auth/verify-code",
            json!({ "phone": PHONE, "code": input })
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "VERIFICATION_CODE_INVALID");
    }

    for input in ["12345", code.as_str()] {
        let resp = post_json!(
            app,
            "/api/v1/auth/verify-code",
            json!({ "phone": PHONE, "code": input })
        );
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "VERIFY_TOO_MANY_ATTEMPTS");
    }
}

#[actix_web::test]
async fn test_verify_code_invalid_phone() {
    let harness = TestHarness::new();
    let app = test::init_service(harness.app()).await;

    let resp = post_json!(
        app,
        "/api/v1/auth/verify-code",
        json!({ "phone": "not-a-phone", "code": "042617" })
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}
