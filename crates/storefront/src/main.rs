//! LuxStore Storefront - public storefront shell.
//!
//! This binary serves the storefront on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework, Askama templates for server-side rendering
//! - External identity service for sign-in, session lookup and logout
//! - tower-sessions for the identity access token (`PostgreSQL` or in-memory)
//!
//! The storefront never stores identity data itself. Each rendered page asks
//! the identity service who the session belongs to.

#![cfg_attr(not(test), forbid(unsafe_code))]

use luxstore_storefront::config::StorefrontConfig;
use luxstore_storefront::state::AppState;
use luxstore_storefront::{build_router, db, middleware};
use sentry::integrations::tracing as sentry_tracing;
use tower_sessions::MemoryStore;
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "luxstore_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    tracing::info!(identity = %config.identity.base_url, "Using identity service");

    let app = match &config.database_url {
        Some(database_url) => {
            let pool = db::create_pool(database_url)
                .await
                .expect("Failed to create database pool");
            tracing::info!("Session store: PostgreSQL");

            // NOTE: The session table is NOT created automatically on startup.
            // Run it explicitly via: cargo run -p luxstore-cli -- migrate
            let session_layer =
                middleware::create_session_layer(PostgresStore::new(pool.clone()), &config);
            let state = AppState::new(config.clone(), Some(pool));
            build_router(state, session_layer)
        }
        None => {
            tracing::warn!("No database configured, sessions are kept in memory");
            let session_layer = middleware::create_session_layer(MemoryStore::default(), &config);
            let state = AppState::new(config.clone(), None);
            build_router(state, session_layer)
        }
    };

    let addr = config.socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
