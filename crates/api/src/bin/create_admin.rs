//! Admin seeding CLI.
//!
//! Principals have no public registration endpoint; this binary is the only
//! provisioning path. It validates, hashes, and inserts an admin account:
//!
//! ```text
//! create-admin --username admin --password 'a strong password'
//! ```

use anyhow::{bail, Context};
use clap::Parser;

use folio_api::auth::password::hash_password;
use folio_core::principal::{normalize_username, validate_password, validate_username};
use folio_core::roles::ROLE_ADMIN;
use folio_db::models::principal::CreatePrincipal;
use folio_db::repositories::PrincipalRepo;

/// Create an admin principal in the configured database.
#[derive(Debug, Parser)]
#[command(name = "create-admin")]
struct Cli {
    /// Username for the new admin (3-30 chars, lowercase letters, digits,
    /// underscores). Input is normalized to lowercase.
    #[arg(long)]
    username: String,

    /// Password for the new admin (minimum 8 characters).
    #[arg(long)]
    password: String,

    /// Database URL; falls back to the DATABASE_URL environment variable.
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let username = normalize_username(&cli.username);
    validate_username(&username).map_err(|e| anyhow::anyhow!("{e}: {}", violation_list(&e)))?;
    validate_password(&cli.password)
        .map_err(|e| anyhow::anyhow!("{e}: {}", violation_list(&e)))?;

    let database_url = match cli.database_url {
        Some(url) => url,
        None => std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
    };

    let pool = folio_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    folio_db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    let password_hash = hash_password(&cli.password)
        .map_err(|e| anyhow::anyhow!("Password hashing failed: {e}"))?;

    let input = CreatePrincipal {
        username: username.clone(),
        password_hash,
        role: ROLE_ADMIN.to_string(),
    };

    match PrincipalRepo::create(&pool, &input).await {
        Ok(principal) => {
            println!("Created admin '{}' (id {})", principal.username, principal.id);
            Ok(())
        }
        Err(e) if folio_db::is_unique_violation(&e, "principals.username") => {
            bail!("A principal named '{username}' already exists")
        }
        Err(e) => Err(e).context("Failed to insert admin"),
    }
}

/// Render the field violations of a validation error for CLI output.
fn violation_list(err: &folio_core::error::CoreError) -> String {
    err.violations()
        .map(|violations| {
            violations
                .iter()
                .map(|v| v.message.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        })
        .unwrap_or_default()
}
