//! Handlers for the `/auth` resource (login, logout, me).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use axum::Json;
use chrono::Utc;
use folio_core::error::CoreError;
use folio_core::principal::normalize_username;
use folio_core::roles::ROLE_ADMIN;
use folio_db::models::principal::PrincipalResponse;
use folio_db::repositories::PrincipalRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::ClientOrigin;
use crate::middleware::auth::{CurrentPrincipal, SESSION_COOKIE};
use crate::response::ApiMessage;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Successful authentication response.
///
/// The token is returned in the body and also set as an HttpOnly cookie.
#[derive(Debug, Serialize)]
pub struct AuthBody {
    pub success: bool,
    pub token: String,
    pub user: PrincipalResponse,
}

/// Response for `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeBody {
    pub success: bool,
    pub user: PrincipalResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Rate-limited credential verification. Every failure path -- empty fields,
/// unknown username, non-admin account, wrong password -- yields the same
/// `InvalidCredentials` response so usernames cannot be enumerated.
pub async fn login(
    State(state): State<AppState>,
    ClientOrigin(origin): ClientOrigin,
    Json(input): Json<LoginRequest>,
) -> AppResult<(HeaderMap, Json<AuthBody>)> {
    // 1. Rate-limit gate, before any credential work.
    state
        .login_limiter
        .check(&origin, "/api/auth/login")
        .map_err(AppError::Core)?;

    // 2. Normalize and reject empty input.
    let username = normalize_username(&input.username);
    if username.is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::InvalidCredentials));
    }

    // 3. Look up an admin principal under that username.
    let mut principal =
        PrincipalRepo::find_by_username_with_role(&state.pool, &username, ROLE_ADMIN)
            .await?
            .ok_or(AppError::Core(CoreError::InvalidCredentials))?;

    // 4. Verify the password off the async runtime (Argon2 is CPU-bound).
    let password = input.password;
    let hash = principal.password_hash.clone();
    let password_valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {e}")))?
        .map_err(|e| AppError::Internal(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::InvalidCredentials));
    }

    // 5. Mint the session token.
    let token = generate_token(
        principal.id,
        &principal.username,
        &principal.role,
        &state.config.jwt,
    )
    .map_err(|e| AppError::Internal(format!("Token generation error: {e}")))?;

    // 6. Stamp last_login_at, best-effort: a failed write is logged and the
    //    issued token is still returned.
    match PrincipalRepo::record_login(&state.pool, principal.id).await {
        Ok(()) => principal.last_login_at = Some(Utc::now()),
        Err(e) => {
            tracing::warn!(principal_id = principal.id, error = %e, "Failed to update last login")
        }
    }
    tracing::info!(username = %principal.username, "Admin logged in");

    // 7. Token in the body and as an HttpOnly SameSite=Strict cookie.
    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        session_cookie(&token, state.config.jwt.token_expiry_secs, state.config.production)
            .parse()
            .map_err(|e| AppError::Internal(format!("Invalid cookie header: {e}")))?,
    );

    Ok((
        headers,
        Json(AuthBody {
            success: true,
            token,
            user: principal.into(),
        }),
    ))
}

/// GET /api/auth/logout
///
/// Stateless: clears the session cookie only. The token itself stays valid
/// until natural expiry; there is no server-side revocation list.
///
/// The expired cookie is set unconditionally: a client authenticating via
/// the Authorization header may still hold a stale cookie from an earlier
/// login.
pub async fn logout(CurrentPrincipal(principal): CurrentPrincipal) -> (HeaderMap, Json<ApiMessage>) {
    tracing::info!(username = %principal.username, "Admin logged out");
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, HeaderValue::from_static(CLEAR_SESSION_COOKIE));
    (headers, Json(ApiMessage::new("Logged out")))
}

/// GET /api/auth/me
///
/// Returns the live principal resolved from the presented token, with the
/// password hash excluded.
pub async fn me(CurrentPrincipal(principal): CurrentPrincipal) -> Json<MeBody> {
    Json(MeBody {
        success: true,
        user: principal.into(),
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `Set-Cookie` value that expires the session cookie immediately.
const CLEAR_SESSION_COOKIE: &str = "token=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0";

/// Build the `Set-Cookie` value for a freshly issued session token.
///
/// HttpOnly and SameSite=Strict always; the Secure flag only in production
/// so local HTTP development keeps working.
fn session_cookie(token: &str, max_age_secs: i64, production: bool) -> String {
    let secure_flag = if production { "; Secure" } else { "" };
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict; Max-Age={max_age_secs}{secure_flag}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_is_httponly_and_strict() {
        let value = session_cookie("abc.def.ghi", 3600, false);
        assert_eq!(
            value,
            "token=abc.def.ghi; Path=/; HttpOnly; SameSite=Strict; Max-Age=3600"
        );
    }

    #[test]
    fn session_cookie_is_secure_in_production() {
        let value = session_cookie("t", 60, true);
        assert!(value.ends_with("; Secure"));
    }

    #[test]
    fn clearing_cookie_expires_with_matching_attributes() {
        assert!(CLEAR_SESSION_COOKIE.starts_with("token=;"));
        assert!(CLEAR_SESSION_COOKIE.contains("Max-Age=0"));
        assert!(CLEAR_SESSION_COOKIE.contains("Path=/"));
    }
}
