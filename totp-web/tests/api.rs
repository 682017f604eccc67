#![allow(missing_docs)]
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = totp_web::app()
        .oneshot(request)
        .await
        .expect("Router should not fail");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).expect("Body should be JSON");
    (status, body)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

#[tokio::test]
async fn test_generate_reproduces_rfc_vector() {
    let (status, body) = send(post_json(
        "/api/generate",
        &json!({ "secret": SECRET, "digits": 8, "timestamp": 59 }),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "otp": "94287082",
            "time_remaining": 1,
            "counter": 1,
            "timestamp": 59,
            "parameters": { "time_step": 30, "t0": 0, "digits": 8, "algorithm": "sha1" }
        })
    );
}

#[tokio::test]
async fn test_generate_normalizes_algorithm_and_honours_t0() {
    let (status, body) = send(post_json(
        "/api/generate",
        &json!({
            "secret": SECRET,
            "algorithm": "SHA256",
            "time_step": 60,
            "t0": 100,
            "timestamp": 130
        }),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["parameters"]["algorithm"], "sha256");
    assert_eq!(body["parameters"]["time_step"], 60);
    assert_eq!(body["parameters"]["t0"], 100);
    assert_eq!(body["counter"], 0);
    assert_eq!(body["time_remaining"], 30);
    assert_eq!(body["otp"].as_str().map(str::len), Some(6));
}

#[tokio::test]
async fn test_generate_uses_wall_clock_without_timestamp() {
    let (status, body) = send(post_json("/api/generate", &json!({ "secret": SECRET }))).await;
    assert_eq!(status, StatusCode::OK);

    let timestamp = body["timestamp"].as_i64().expect("timestamp should be a number");
    assert!((timestamp - totp_core::unix_now()).abs() <= 5);
    let remaining = body["time_remaining"].as_u64().expect("time_remaining should be a number");
    assert!((1..=30).contains(&remaining));
}

#[tokio::test]
async fn test_generate_requires_secret() {
    let (status, body) = send(post_json("/api/generate", &json!({ "digits": 6 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Secret key is required" }));
}

#[tokio::test]
async fn test_generate_rejects_invalid_parameters() {
    let cases = [
        json!({ "secret": SECRET, "digits": 5 }),
        json!({ "secret": SECRET, "digits": 11 }),
        json!({ "secret": SECRET, "time_step": 0 }),
        json!({ "secret": SECRET, "time_step": -30 }),
        json!({ "secret": SECRET, "algorithm": "md5" }),
        json!({ "secret": "not base32!" }),
        json!({ "secret": "" }),
        json!({ "secret": SECRET, "t0": 100, "timestamp": 50 }),
        json!({ "secret": SECRET, "digits": "six" }),
    ];
    for case in cases {
        let (status, body) = send(post_json("/api/generate", &case)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{case}");
        assert!(body["error"].is_string(), "{case}");
    }
}

#[tokio::test]
async fn test_generate_rejects_malformed_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("Failed to build request");
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_verify_round_trip_with_drift() {
    // Counter 0 code, checked at counter 1 with the default window of 1.
    let (status, body) = send(post_json(
        "/api/verify",
        &json!({ "secret": SECRET, "otp": "755224", "timestamp": 45 }),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "valid": true }));

    let (status, body) = send(post_json(
        "/api/verify",
        &json!({ "secret": SECRET, "otp": "755224", "timestamp": 45, "window": 0 }),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "valid": false }));
}

#[tokio::test]
async fn test_verify_treats_malformed_codes_as_invalid() {
    for otp in ["75522", "7552240", "75522a", ""] {
        let (status, body) = send(post_json(
            "/api/verify",
            &json!({ "secret": SECRET, "otp": otp, "timestamp": 45 }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK, "{otp:?}");
        assert_eq!(body["valid"], false, "{otp:?}");
    }
}

#[tokio::test]
async fn test_verify_requires_secret_and_otp() {
    for payload in [json!({ "secret": SECRET }), json!({ "otp": "123456" })] {
        let (status, body) = send(post_json("/api/verify", &payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Secret key and OTP are required" }));
    }
}

#[tokio::test]
async fn test_verify_rejects_out_of_range_windows() {
    for window in [-1, 11, 2_000_000, i64::MAX] {
        let (status, body) = send(post_json(
            "/api/verify",
            &json!({
                "secret": SECRET,
                "otp": "000000",
                "timestamp": 1_700_000_000,
                "window": window
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "window={window}");
        assert_eq!(
            body,
            json!({ "error": "Window must be between 0 and 10" }),
            "window={window}"
        );
    }
}

#[tokio::test]
async fn test_verify_accepts_the_widest_allowed_window() {
    // Counter 0 code, checked ten steps later.
    let (status, body) = send(post_json(
        "/api/verify",
        &json!({ "secret": SECRET, "otp": "755224", "timestamp": 300, "window": 10 }),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "valid": true }));
}

#[tokio::test]
async fn test_generate_secret_default_and_bounds() {
    let (status, body) = send(get("/api/generate-secret")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let secret = body["secret"].as_str().expect("secret should be a string");
    assert_eq!(totp_core::decode_secret(secret).map(|b| b.len()), Ok(32));

    let (status, body) = send(get("/api/generate-secret?length=16")).await;
    assert_eq!(status, StatusCode::OK);
    let secret = body["secret"].as_str().expect("secret should be a string");
    assert_eq!(totp_core::decode_secret(secret).map(|b| b.len()), Ok(16));

    for uri in [
        "/api/generate-secret?length=15",
        "/api/generate-secret?length=65",
        "/api/generate-secret?length=-1",
        "/api/generate-secret?length=abc",
    ] {
        let (status, body) = send(get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = send(get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].as_i64().is_some());
}

#[tokio::test]
async fn test_cors_is_permissive() {
    let request = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .expect("Failed to build request");
    let response = totp_web::app()
        .oneshot(request)
        .await
        .expect("Router should not fail");
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&header::HeaderValue::from_static("*"))
    );
}
