//! Session-token generation and validation.
//!
//! Session tokens are HS256-signed JWTs containing a [`Claims`] payload.
//! There is no server-side revocation list: logout only instructs the client
//! to discard the token, so a token stays valid until its natural expiry.

use folio_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the principal's internal database id.
    pub sub: DbId,
    /// The principal's username at issuance time.
    pub username: String,
    /// The principal's role name (e.g. `"admin"`).
    pub role: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for session-token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session token lifetime in seconds (default: 3600).
    pub token_expiry_secs: i64,
}

/// Default session token expiry in seconds (one hour).
const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 3600;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var             | Required | Default |
    /// |---------------------|----------|---------|
    /// | `JWT_SECRET`        | **yes**  | --      |
    /// | `TOKEN_EXPIRY_SECS` | no       | `3600`  |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let token_expiry_secs: i64 = std::env::var("TOKEN_EXPIRY_SECS")
            .unwrap_or_else(|_| DEFAULT_TOKEN_EXPIRY_SECS.to_string())
            .parse()
            .expect("TOKEN_EXPIRY_SECS must be a valid i64");

        Self {
            secret,
            token_expiry_secs,
        }
    }
}

/// Generate an HS256 session token for the given principal.
pub fn generate_token(
    principal_id: DbId,
    username: &str,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: principal_id,
        username: username.to_string(),
        role: role.to_string(),
        iat: now,
        exp: now + config.token_expiry_secs,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
