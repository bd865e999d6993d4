//! LuxStore Storefront library.
//!
//! This crate provides the storefront shell as a library, so the router can
//! be exercised in tests with an in-memory session store and a stub
//! identity provider.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod identity;
pub mod layout;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{Router, body::Body, http::Request};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::{SessionManagerLayer, SessionStore};
use tracing::Span;

use crate::state::AppState;

/// Directory served under `/static`, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/storefront/static";

/// Build the complete storefront router.
///
/// Layers, outermost first: Sentry, request tracing, request ID, security
/// headers, sessions.
pub fn build_router<Store>(state: AppState, session_layer: SessionManagerLayer<Store>) -> Router
where
    Store: SessionStore + Clone,
{
    Router::new()
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(routes::pages::not_found)
        .layer(session_layer)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .with_state(state)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Request span with the fields filled in by middleware and handlers.
fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = tracing::field::Empty,
    )
}
