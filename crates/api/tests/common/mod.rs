//! Shared harness for HTTP-level integration tests.
//!
//! Builds the production router via `build_app_router` so tests exercise the
//! same route tree and middleware stack (CORS, request ID, timeout, panic
//! recovery) that the binary uses.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use folio_api::auth::jwt::JwtConfig;
use folio_api::auth::password::hash_password;
use folio_api::config::ServerConfig;
use folio_api::media::MediaStore;
use folio_api::ratelimit::LoginRateLimiter;
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_core::roles::ROLE_ADMIN;
use folio_db::models::principal::{CreatePrincipal, Principal};
use folio_db::repositories::PrincipalRepo;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults and a known JWT secret.
pub fn test_config(upload_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        upload_dir,
        max_upload_bytes: 5 * 1024 * 1024,
        login_rate_limit: 20,
        login_rate_window_secs: 900,
        production: false,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            token_expiry_secs: 3600,
        },
    }
}

/// Build the full application router with a throwaway upload directory.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let upload_dir = std::env::temp_dir().join(format!("folio-test-{}", uuid::Uuid::new_v4()));
    build_test_app_in(pool, &upload_dir)
}

/// Build the full application router writing uploads into `upload_dir`.
///
/// Use this when a test needs to inspect the files the media store leaves
/// behind.
pub fn build_test_app_in(pool: SqlitePool, upload_dir: &Path) -> Router {
    std::fs::create_dir_all(upload_dir).expect("upload dir should be creatable");
    let config = test_config(upload_dir.to_path_buf());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        login_limiter: Arc::new(LoginRateLimiter::new(
            config.login_rate_limit,
            Duration::from_secs(config.login_rate_window_secs),
        )),
        media: Arc::new(MediaStore::new(upload_dir)),
        mailer: None,
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::get(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    app.oneshot(
        Request::get(uri)
            .header("cookie", cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST with a forged `X-Forwarded-For`, for rate-limit origin keying.
pub async fn post_json_from(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    origin: &str,
) -> Response<Body> {
    app.oneshot(
        Request::post(uri)
            .header("content-type", "application/json")
            .header("x-forwarded-for", origin)
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::delete(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Collect a response body into raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Multipart helpers
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "folio-test-boundary";

/// Hand-rolled multipart body builder for project create/update requests.
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> (String, Vec<u8>) {
        self.body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (format!("multipart/form-data; boundary={BOUNDARY}"), self.body)
    }

    /// Send this form as the given method to `uri` with a bearer token.
    pub async fn send(
        self,
        app: Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
    ) -> Response<Body> {
        let (content_type, body) = self.finish();
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", content_type);
        if let Some(token) = token {
            request = request.header("authorization", format!("Bearer {token}"));
        }
        app.oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap()
    }
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Insert a principal directly, returning the row.
pub async fn seed_principal(
    pool: &SqlitePool,
    username: &str,
    password: &str,
    role: &str,
) -> Principal {
    let input = CreatePrincipal {
        username: username.to_string(),
        password_hash: hash_password(password).expect("hashing should succeed"),
        role: role.to_string(),
    };
    PrincipalRepo::create(pool, &input)
        .await
        .expect("principal creation should succeed")
}

/// Insert the standard test admin.
pub async fn seed_admin(pool: &SqlitePool) -> Principal {
    seed_principal(pool, ADMIN_USERNAME, ADMIN_PASSWORD, ROLE_ADMIN).await
}

/// Log the standard test admin in via the API and return the session token.
pub async fn login_admin(app: Router) -> String {
    let body = serde_json::json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["token"].as_str().expect("token in body").to_string()
}
