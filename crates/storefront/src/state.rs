//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::identity::{HttpSessionProvider, SessionProvider};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the identity provider and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    identity: Arc<dyn SessionProvider>,
    pool: Option<PgPool>,
}

impl AppState {
    /// Create application state backed by the HTTP identity service.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: Option<PgPool>) -> Self {
        let identity = Arc::new(HttpSessionProvider::new(&config.identity));
        Self::with_provider(config, identity, pool)
    }

    /// Create application state with an explicit session provider.
    #[must_use]
    pub fn with_provider(
        config: StorefrontConfig,
        identity: Arc<dyn SessionProvider>,
        pool: Option<PgPool>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                identity,
                pool,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the session provider.
    #[must_use]
    pub fn identity(&self) -> &dyn SessionProvider {
        self.inner.identity.as_ref()
    }

    /// Get the session store pool, if sessions are persisted in `PostgreSQL`.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }
}
