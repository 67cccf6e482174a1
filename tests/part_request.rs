//! Part-request form handling against a mock email provider.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use minipcb_relay::config::{RelayConfig, Secret};
use serde_json::{json, Value};

mod common;

use common::{config_for, router, send, MockUpstream, Reply};

fn mail_config(mail_url: &str) -> RelayConfig {
    // The AI upstream is irrelevant here; point it somewhere harmless.
    let mut config = config_for("http://127.0.0.1:9");
    config.mail.base_url = mail_url.to_string();
    config.mail.api_key = Secret::non_empty("re_test_key");
    config.mail.to_address = Some("sales@minipcb.com".into());
    config.mail.from_address = Some("requests@minipcb.com".into());
    config
}

fn submit(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/part-request")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn valid_payload() -> Value {
    json!({
        "name": "Grace Hopper",
        "email": "grace@example.com",
        "organization": "",
        "family": "Voltage regulators",
        "partNumber": "LM317",
        "details": "Adjustable output,\r\nTO-220 footprint."
    })
}

fn json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn empty_name_is_400() {
    let mail = MockUpstream::start(Reply::json(200, r#"{"id":"email_1"}"#)).await;
    let app = router(&mail_config(&mail.url()));

    let (status, _, body) = send(
        &app,
        submit(json!({
            "name": "",
            "email": "a@b.com",
            "family": "x",
            "partNumber": "y",
            "details": "z"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(&body),
        json!({"ok": false, "error": "Name is required."})
    );
    assert_eq!(mail.hits(), 0);
}

#[tokio::test]
async fn bad_email_is_400() {
    let mail = MockUpstream::start(Reply::json(200, "{}")).await;
    let app = router(&mail_config(&mail.url()));

    let mut payload = valid_payload();
    payload["email"] = json!("grace at example dot com");
    let (status, _, body) = send(&app, submit(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["error"], "A valid email is required.");
    assert_eq!(mail.hits(), 0);
}

#[tokio::test]
async fn valid_submission_is_emailed() {
    let mail = MockUpstream::start(Reply::json(200, r#"{"id":"email_1"}"#)).await;
    let app = router(&mail_config(&mail.url()));

    let (status, _, body) = send(&app, submit(valid_payload())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({"ok": true}));
    assert_eq!(mail.hits(), 1);

    let seen = mail.last();
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.path, "/emails");
    assert_eq!(seen.header("authorization"), Some("Bearer re_test_key"));

    let email: Value = serde_json::from_slice(&seen.body).unwrap();
    assert_eq!(email["from"], "requests@minipcb.com");
    assert_eq!(email["to"], json!(["sales@minipcb.com"]));
    assert_eq!(email["reply_to"], "grace@example.com");
    assert_eq!(email["subject"], "Part Request: LM317");

    let text = email["text"].as_str().unwrap();
    assert!(text.contains("Name: Grace Hopper\n"));
    assert!(text.contains("Organization: (not provided)\n"));
    assert!(text.contains("Requested Part/Pattern: LM317\n"));
    assert!(text.ends_with("Details:\nAdjustable output,\nTO-220 footprint."));
}

#[tokio::test]
async fn provider_failure_is_500_with_detail() {
    let mail = MockUpstream::start(Reply::json(422, r#"{"message":"invalid from"}"#)).await;
    let app = router(&mail_config(&mail.url()));

    let (status, _, body) = send(&app, submit(valid_payload())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(&body);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "Failed to send part request.");
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Resend error (422)"), "{}", detail);
    assert!(detail.contains("invalid from"));
}

#[tokio::test]
async fn missing_mail_settings_are_500() {
    let mail = MockUpstream::start(Reply::json(200, "{}")).await;
    let mut config = mail_config(&mail.url());
    config.mail.from_address = None;
    let app = router(&config);

    let (status, _, body) = send(&app, submit(valid_payload())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(&body)["detail"], "REQUEST_FROM_EMAIL is not set.");
    assert_eq!(mail.hits(), 0);
}

#[tokio::test]
async fn shared_secret_applies() {
    let mail = MockUpstream::start(Reply::json(200, "{}")).await;
    let mut config = mail_config(&mail.url());
    config.auth.proxy_key = Secret::non_empty("s3cret");
    let app = router(&config);

    let (status, _, _) = send(&app, submit(valid_payload())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(mail.hits(), 0);

    let mut request = submit(valid_payload());
    request
        .headers_mut()
        .insert("x-proxy-key", header::HeaderValue::from_static("s3cret"));
    let (status, _, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mail.hits(), 1);
}

#[tokio::test]
async fn get_is_method_not_allowed() {
    let mail = MockUpstream::start(Reply::json(200, "{}")).await;
    let app = router(&mail_config(&mail.url()));

    let request = Request::builder()
        .uri("/api/part-request")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        json_body(&body),
        json!({"ok": false, "error": "Method not allowed."})
    );
    assert_eq!(mail.hits(), 0);
}
