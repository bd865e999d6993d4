//! Database access for the storefront session store.
//!
//! # Database: `luxstore_storefront`
//!
//! The storefront keeps no business data of its own. `PostgreSQL` only backs
//! the tower-sessions store, which holds the identity access token.
//!
//! ## Tables
//!
//! - `tower_sessions.session` - Tower-sessions storage
//!
//! # Migrations
//!
//! The session table is created via:
//! ```bash
//! cargo run -p luxstore-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Check that the database answers a trivial query.
///
/// # Errors
///
/// Returns `sqlx::Error` if the query fails.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
