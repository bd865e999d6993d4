//! Session middleware configuration.
//!
//! The session holds a single value: the identity access token.

use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "luxstore_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer over any tower-sessions store.
///
/// Production passes the `PostgreSQL` store; local runs and tests use
/// `MemoryStore`.
#[must_use]
pub fn create_session_layer<Store>(
    store: Store,
    config: &StorefrontConfig,
) -> SessionManagerLayer<Store>
where
    Store: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
