//! Session store migration commands.
//!
//! The storefront keeps identity access tokens in a `tower-sessions`
//! `PostgreSQL` store. Its table is not created on server startup; run
//! `luxstore-cli migrate` once per database instead.
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)

use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;
use tower_sessions_sqlx_store::PostgresStore;

/// Errors from migration commands.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create or update the session table.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or the schema cannot be created.
pub async fn sessions() -> Result<(), MigrationError> {
    let pool = connect().await?;

    tracing::info!("Running session store migrations...");
    PostgresStore::new(pool).migrate().await?;

    tracing::info!("Session store migrations complete");
    Ok(())
}

/// Verify the session database answers a trivial query.
///
/// # Errors
///
/// Returns an error if the database URL is missing or the query fails.
pub async fn check() -> Result<(), MigrationError> {
    let pool = connect().await?;
    sqlx::query("SELECT 1").execute(&pool).await?;

    tracing::info!("Session database is reachable");
    Ok(())
}

async fn connect() -> Result<PgPool, MigrationError> {
    let _ = dotenvy::dotenv();

    let database_url = database_url(|key| std::env::var(key).ok())?;

    tracing::info!("Connecting to session database...");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url.expose_secret())
        .await?;
    Ok(pool)
}

/// Resolve the database URL, preferring the storefront-specific variable.
fn database_url(
    lookup: impl Fn(&'static str) -> Option<String>,
) -> Result<SecretString, MigrationError> {
    lookup("STOREFRONT_DATABASE_URL")
        .or_else(|| lookup("DATABASE_URL"))
        .filter(|url| !url.is_empty())
        .map(SecretString::from)
        .ok_or(MigrationError::MissingEnvVar("STOREFRONT_DATABASE_URL"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_prefers_storefront_variable() {
        let url = database_url(|key| match key {
            "STOREFRONT_DATABASE_URL" => Some("postgres://sf".to_string()),
            "DATABASE_URL" => Some("postgres://shared".to_string()),
            _ => None,
        })
        .expect("url");
        assert_eq!(url.expose_secret(), "postgres://sf");
    }

    #[test]
    fn test_database_url_falls_back() {
        let url = database_url(|key| {
            (key == "DATABASE_URL").then(|| "postgres://shared".to_string())
        })
        .expect("url");
        assert_eq!(url.expose_secret(), "postgres://shared");
    }

    #[test]
    fn test_database_url_missing() {
        let err = database_url(|_| None).expect_err("missing");
        assert!(matches!(err, MigrationError::MissingEnvVar("STOREFRONT_DATABASE_URL")));
    }
}
