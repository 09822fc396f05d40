//! Session-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use folio_core::error::CoreError;
use folio_db::models::principal::Principal;
use folio_db::repositories::PrincipalRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Name of the session cookie set by login and cleared by logout.
pub const SESSION_COOKIE: &str = "token";

/// The live principal behind a verified session token.
///
/// The token is taken from the `Authorization: Bearer ...` header or, when
/// that is absent, from the session cookie. The encoded subject is then
/// resolved against the database so a deleted principal cannot keep acting
/// through an unexpired token.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(CurrentPrincipal(principal): CurrentPrincipal) -> AppResult<Json<()>> {
///     tracing::info!(principal_id = principal.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

impl FromRequestParts<AppState> for CurrentPrincipal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .or_else(|| cookie_token(parts))
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthenticated(
                    "No session token presented".into(),
                ))
            })?;

        let claims = validate_token(&token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::InvalidToken(
                "Signature or expiry check failed".into(),
            ))
        })?;

        // The subject must still exist; a token for a removed principal no
        // longer proves a live identity.
        let principal = PrincipalRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::InvalidToken(
                    "Token subject no longer exists".into(),
                ))
            })?;

        Ok(CurrentPrincipal(principal))
    }
}

/// Token from the `Authorization: Bearer ...` header, if present.
fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

/// Token from the session cookie, if present.
fn cookie_token(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
}
