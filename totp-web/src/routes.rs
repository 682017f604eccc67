//! JSON handlers wrapping the TOTP engine.
//!
//! Every failure is answered with `400 Bad Request` and a body of the form
//! `{"error": "..."}`; successful calls carry `"success": true`.

use axum::{
    Json, Router,
    extract::{
        Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, post},
};
use log::{debug, info};
use serde::Deserialize;
use serde_json::{Value, json};
use std::ops::RangeInclusive;
use totp_core::{
    Algorithm, DEFAULT_DIGITS, DEFAULT_SECRET_LENGTH, DEFAULT_T0, DEFAULT_TIME_STEP,
    DEFAULT_WINDOW, OtpParameters, WINDOW_RANGE, generate, generate_secret, unix_now, verify,
};
use tower_http::cors::CorsLayer;

/// Secret lengths, in bytes, the API is willing to generate.
pub const SECRET_LENGTH_RANGE: RangeInclusive<usize> = 16..=64;

type ApiResponse = (StatusCode, Json<Value>);

/// Builds the application router with permissive CORS.
#[must_use]
pub fn app() -> Router {
    Router::new()
        .route("/api/generate", post(generate_handler))
        .route("/api/verify", post(verify_handler))
        .route("/api/generate-secret", get(generate_secret_handler))
        .route("/api/health", get(health_handler))
        .layer(CorsLayer::permissive())
}

/// Optional settings shared by the generate and verify bodies.
#[derive(Deserialize)]
struct OtpFields {
    time_step: Option<i64>,
    t0: Option<i64>,
    digits: Option<i64>,
    algorithm: Option<String>,
    /// Injected time; defaults to the wall clock.
    timestamp: Option<i64>,
}

impl OtpFields {
    fn parameters(&self, secret: &str) -> totp_core::Result<OtpParameters> {
        OtpParameters::new(
            secret,
            self.algorithm
                .as_deref()
                .unwrap_or(Algorithm::default().as_str()),
            self.digits.unwrap_or_else(|| i64::from(DEFAULT_DIGITS)),
            self.time_step.unwrap_or(DEFAULT_TIME_STEP),
            self.t0.unwrap_or(DEFAULT_T0),
        )
    }

    fn now(&self) -> i64 {
        self.timestamp.unwrap_or_else(unix_now)
    }
}

#[derive(Deserialize)]
struct GenerateRequest {
    secret: Option<String>,
    #[serde(flatten)]
    fields: OtpFields,
}

#[derive(Deserialize)]
struct VerifyRequest {
    secret: Option<String>,
    otp: Option<String>,
    window: Option<i64>,
    #[serde(flatten)]
    fields: OtpFields,
}

#[derive(Deserialize)]
struct SecretQuery {
    length: Option<i64>,
}

fn bad_request(message: impl Into<String>) -> ApiResponse {
    let message = message.into();
    debug!("Rejecting request: {message}");
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

/// Generates the code for the requested (or current) time.
async fn generate_handler(payload: Result<Json<GenerateRequest>, JsonRejection>) -> ApiResponse {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    let Some(secret) = payload.secret.as_deref() else {
        return bad_request("Secret key is required");
    };

    let params = match payload.fields.parameters(secret) {
        Ok(params) => params,
        Err(e) => return bad_request(e.to_string()),
    };

    match generate(&params, payload.fields.now()) {
        Ok(result) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "otp": result.otp,
                "time_remaining": result.time_remaining,
                "counter": result.counter,
                "timestamp": result.timestamp,
                "parameters": {
                    "time_step": params.time_step(),
                    "t0": params.t0(),
                    "digits": params.digits(),
                    "algorithm": params.algorithm()
                }
            })),
        ),
        Err(e) => bad_request(e.to_string()),
    }
}

/// Checks a submitted code against the window around the requested (or current) time.
async fn verify_handler(payload: Result<Json<VerifyRequest>, JsonRejection>) -> ApiResponse {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    let (Some(secret), Some(otp)) = (payload.secret.as_deref(), payload.otp.as_deref()) else {
        return bad_request("Secret key and OTP are required");
    };
    let window = payload.window.unwrap_or(DEFAULT_WINDOW);
    if !WINDOW_RANGE.contains(&window) {
        return bad_request(format!(
            "Window must be between {} and {}",
            WINDOW_RANGE.start(),
            WINDOW_RANGE.end()
        ));
    }

    let outcome = payload
        .fields
        .parameters(secret)
        .and_then(|params| verify(&params, otp, window, payload.fields.now()));

    match outcome {
        Ok(valid) => {
            if !valid {
                info!("Rejected an OTP that did not match any step in the window.");
            }
            (StatusCode::OK, Json(json!({ "success": true, "valid": valid })))
        }
        Err(e) => bad_request(e.to_string()),
    }
}

/// Returns a fresh random base32 secret.
async fn generate_secret_handler(query: Result<Query<SecretQuery>, QueryRejection>) -> ApiResponse {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let length = match query.length.map(usize::try_from) {
        None => DEFAULT_SECRET_LENGTH,
        Some(Ok(length)) if SECRET_LENGTH_RANGE.contains(&length) => length,
        Some(_) => return bad_request("Length must be between 16 and 64"),
    };

    match generate_secret(length) {
        Ok(secret) => (StatusCode::OK, Json(json!({ "success": true, "secret": secret }))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        ),
    }
}

async fn health_handler() -> ApiResponse {
    (
        StatusCode::OK,
        Json(json!({ "status": "healthy", "timestamp": unix_now() })),
    )
}
