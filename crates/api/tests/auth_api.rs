//! HTTP-level integration tests for login, logout, me, and rate limiting.

mod common;

use axum::http::StatusCode;
use common::{
    body_bytes, body_json, get, get_auth, get_with_cookie, post_json, post_json_from, seed_admin,
    seed_principal, ADMIN_PASSWORD, ADMIN_USERNAME,
};
use folio_api::auth::jwt::generate_token;
use folio_core::roles::ROLE_USER;
use serde_json::json;
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns the token in the body and as an HttpOnly cookie.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_success_returns_token_and_cookie(pool: SqlitePool) {
    let admin = seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get("set-cookie")
        .expect("login must set the session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["token"].is_string());
    assert_eq!(json["user"]["id"], admin.id);
    assert_eq!(json["user"]["username"], ADMIN_USERNAME);
    assert_eq!(json["user"]["role"], "admin");
    assert!(
        json["user"]["lastLoginAt"].is_string(),
        "login must stamp lastLoginAt"
    );
    assert!(
        json["user"].get("passwordHash").is_none() && json["user"].get("password_hash").is_none(),
        "the password hash must never be serialized"
    );
}

/// Username lookup is normalized: whitespace and case are ignored.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_normalizes_the_username(pool: SqlitePool) {
    seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({ "username": "  ADMIN  ", "password": ADMIN_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
}

/// Wrong password and unknown username must be indistinguishable: same
/// status, byte-identical body.
#[sqlx::test(migrations = "../db/migrations")]
async fn credential_failures_are_byte_identical(pool: SqlitePool) {
    seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let wrong_password = post_json(
        app.clone(),
        "/api/auth/login",
        json!({ "username": ADMIN_USERNAME, "password": "not-the-password" }),
    )
    .await;
    let unknown_user = post_json(
        app,
        "/api/auth/login",
        json!({ "username": "ghost", "password": "whatever" }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_bytes(wrong_password).await,
        body_bytes(unknown_user).await,
        "error bodies must not allow username enumeration"
    );
}

/// Empty credentials fail the same way as bad ones.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_rejects_empty_fields(pool: SqlitePool) {
    seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    for body in [
        json!({ "username": "", "password": "x" }),
        json!({ "username": "admin", "password": "" }),
        json!({}),
    ] {
        let response = post_json(app.clone(), "/api/auth/login", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"], "InvalidCredentials");
    }
}

/// Only role=admin principals can log in; a user-role account fails exactly
/// like an unknown username.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_rejects_non_admin_roles(pool: SqlitePool) {
    seed_principal(&pool, "regular", "plain-user-pass", ROLE_USER).await;
    let app = common::build_test_app(pool);

    let body = json!({ "username": "regular", "password": "plain-user-pass" });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "InvalidCredentials");
}

// ---------------------------------------------------------------------------
// Guard chain: me / logout
// ---------------------------------------------------------------------------

/// The token works from the Authorization header.
#[sqlx::test(migrations = "../db/migrations")]
async fn me_accepts_a_bearer_token(pool: SqlitePool) {
    let admin = seed_admin(&pool).await;
    let app = common::build_test_app(pool);
    let token = common::login_admin(app.clone()).await;

    let response = get_auth(app, "/api/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], admin.id);
    assert_eq!(json["user"]["username"], ADMIN_USERNAME);
}

/// The token also works from the session cookie.
#[sqlx::test(migrations = "../db/migrations")]
async fn me_accepts_the_session_cookie(pool: SqlitePool) {
    seed_admin(&pool).await;
    let app = common::build_test_app(pool);
    let token = common::login_admin(app.clone()).await;

    let response = get_with_cookie(app, "/api/auth/me", &format!("token={token}")).await;

    assert_eq!(response.status(), StatusCode::OK);
}

/// No token at all is `Unauthenticated`, a presented-but-bad token is
/// `InvalidToken`; both are 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn missing_and_invalid_tokens_are_distinct_kinds(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let absent = get(app.clone(), "/api/auth/me").await;
    assert_eq!(absent.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(absent).await["error"], "Unauthenticated");

    let garbage = get_auth(app, "/api/auth/me", "not.a.jwt").await;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(garbage).await["error"], "InvalidToken");
}

/// A well-signed token whose subject no longer exists fails as InvalidToken.
#[sqlx::test(migrations = "../db/migrations")]
async fn dangling_token_subject_is_rejected(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let config = common::test_config(std::env::temp_dir());
    let token = generate_token(9999, "ghost", "admin", &config.jwt).unwrap();

    let response = get_auth(app, "/api/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "InvalidToken");
}

/// Logout requires authentication and clears the cookie; the token itself
/// stays valid until expiry (stateless sessions).
#[sqlx::test(migrations = "../db/migrations")]
async fn logout_clears_the_cookie_but_not_the_token(pool: SqlitePool) {
    seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let unauthenticated = get(app.clone(), "/api/auth/logout").await;
    assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);

    // Bearer-only request: no cookie travels with it, yet the response must
    // still expire any stale cookie the client holds from an earlier login.
    let token = common::login_admin(app.clone()).await;
    let response = get_auth(app.clone(), "/api/auth/logout", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get("set-cookie")
        .expect("logout must clear the cookie")
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("token=;"), "cookie: {cookie}");
    assert!(cookie.contains("Max-Age=0"), "cookie must be expired: {cookie}");
    assert!(cookie.contains("Path=/"), "cookie: {cookie}");

    // No server-side revocation: the bearer token still authenticates.
    let me = get_auth(app, "/api/auth/me", &token).await;
    assert_eq!(me.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Rate limiting
// ---------------------------------------------------------------------------

/// The 21st attempt inside the window from one origin is rejected with 429
/// before credentials are even checked; other origins are unaffected.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_is_rate_limited_per_origin(pool: SqlitePool) {
    seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let bad = json!({ "username": ADMIN_USERNAME, "password": "wrong" });
    for _ in 0..20 {
        let response =
            post_json_from(app.clone(), "/api/auth/login", bad.clone(), "10.0.0.1").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // 21st attempt: limited, even with the CORRECT password.
    let good = json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD });
    let limited = post_json_from(app.clone(), "/api/auth/login", good.clone(), "10.0.0.1").await;
    assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = body_json(limited).await;
    assert_eq!(json["error"], "RateLimited");

    // A different origin logs in fine.
    let other = post_json_from(app, "/api/auth/login", good, "10.0.0.2").await;
    assert_eq!(other.status(), StatusCode::OK);
}
