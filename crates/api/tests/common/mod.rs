#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use fundify_api::auth::jwt::JwtConfig;
use fundify_api::config::{PaymentConfig, ServerConfig, UploadConfig};
use fundify_api::router::build_app_router;
use fundify_api::state::AppState;

pub const TEST_PASSWORD: &str = "test_password_123!";
pub const TEST_PAYMENT_SECRET: &str = "test_razorpay_secret";

const BOUNDARY: &str = "fundify-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uploads go to a fresh directory under the system temp dir. Payments
/// have a secret for signature checks but point at an unroutable gateway.
pub fn test_config() -> ServerConfig {
    let upload_dir: PathBuf =
        std::env::temp_dir().join(format!("fundify-api-test-{}", uuid::Uuid::new_v4()));
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-jwt-secret".to_string(),
            expiry_hours: 1,
        },
        uploads: UploadConfig {
            upload_dir,
            public_base_url: "http://localhost:5001".to_string(),
        },
        payments: PaymentConfig {
            key_id: Some("rzp_test_key".to_string()),
            key_secret: Some(TEST_PAYMENT_SECRET.to_string()),
            api_base: "http://127.0.0.1:9".to_string(),
            currency: "INR".to_string(),
        },
    }
}

/// Build the full application router, the same one `main.rs` serves.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, json_request("GET", uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, json_request("GET", uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("POST", uri, None, Some(body))).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request("POST", uri, Some(token), Some(body))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request("PUT", uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, json_request("DELETE", uri, Some(token), None)).await
}

/// A file part for [`multipart_auth`].
pub struct FilePart<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

/// Send a `multipart/form-data` request with text fields and files.
pub async fn multipart_auth(
    app: Router,
    method: &str,
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
    files: &[FilePart<'_>],
) -> Response<Body> {
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for file in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; \
                 filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.field, file.file_name, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Register a creator through the API and return `(id, token)`.
pub async fn register_creator(pool: &PgPool, page_name: &str) -> (i64, String) {
    let body = serde_json::json!({
        "firstName": "Casey",
        "lastName": "Maker",
        "email": format!("{page_name}@creators.test"),
        "password": TEST_PASSWORD,
        "pageName": page_name,
        "category": "Art",
    });
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/auth/register/creator",
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    (
        json["user"]["id"].as_i64().unwrap(),
        json["token"].as_str().unwrap().to_string(),
    )
}

/// Register an audience member through the API and return `(id, token)`.
pub async fn register_audience(pool: &PgPool, name: &str) -> (i64, String) {
    let body = serde_json::json!({
        "firstName": name,
        "lastName": "Backer",
        "email": format!("{name}@audience.test"),
        "password": TEST_PASSWORD,
    });
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/auth/register/audience",
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    (
        json["user"]["id"].as_i64().unwrap(),
        json["token"].as_str().unwrap().to_string(),
    )
}

/// Create a campaign through the multipart endpoint and return its id.
pub async fn create_campaign(pool: &PgPool, token: &str, title: &str, launch: bool) -> i64 {
    let launch = if launch { "true" } else { "false" };
    let response = multipart_auth(
        build_test_app(pool.clone()),
        "POST",
        "/api/campaigns",
        token,
        &[
            ("title", title),
            ("description", "A campaign used in tests"),
            ("amount", "1000"),
            ("category", "Art"),
            ("launchImmediately", launch),
            ("tags", "art, zines"),
        ],
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["campaign"]["id"].as_i64().unwrap()
}
