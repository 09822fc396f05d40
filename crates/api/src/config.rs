use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Default maximum size of an uploaded cover image in bytes (5 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory media uploads are written to and served from.
    pub upload_dir: PathBuf,
    /// Maximum accepted upload body size in bytes.
    pub max_upload_bytes: usize,
    /// Maximum login attempts per origin inside the rate-limit window.
    pub login_rate_limit: u32,
    /// Login rate-limit window length in seconds.
    pub login_rate_window_secs: u64,
    /// Whether this is a production deployment (`APP_ENV=production`).
    /// Controls the `Secure` flag on the session cookie.
    pub production: bool,
    /// JWT session token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `5000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `UPLOAD_DIR`              | `public/uploads`        |
    /// | `MAX_UPLOAD_BYTES`        | `5242880` (5 MiB)       |
    /// | `LOGIN_RATE_LIMIT`        | `20`                    |
    /// | `LOGIN_RATE_WINDOW_SECS`  | `900` (15 minutes)      |
    /// | `APP_ENV`                 | `development`           |
    ///
    /// JWT variables are documented on [`JwtConfig::from_env`], which panics
    /// if `JWT_SECRET` is missing.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_dir =
            PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "public/uploads".into()));

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let login_rate_limit: u32 = std::env::var("LOGIN_RATE_LIMIT")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("LOGIN_RATE_LIMIT must be a valid u32");

        let login_rate_window_secs: u64 = std::env::var("LOGIN_RATE_WINDOW_SECS")
            .unwrap_or_else(|_| "900".into())
            .parse()
            .expect("LOGIN_RATE_WINDOW_SECS must be a valid u64");

        let production = std::env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload_dir,
            max_upload_bytes,
            login_rate_limit,
            login_rate_window_secs,
            production,
            jwt,
        }
    }
}
