//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Home page (Home link not highlighted)
//! GET  /home              - Home page
//! GET  /cart              - Cart page
//! GET  /orders            - Order history page
//! GET  /admindashboard    - Admin dashboard (admin only)
//! GET  /adminorders       - Admin order management (admin only)
//!
//! # Auth
//! GET  /auth/login        - Redirect to the identity service login page
//! GET  /auth/callback     - Store the issued access token
//! POST /auth/logout       - End the session
//!
//! # Health
//! GET  /health            - Liveness
//! GET  /health/ready      - Readiness
//!
//! # Anything else
//! *                       - 404 `Not found: <path>` (router fallback)
//! ```
//!
//! Page paths come from [`Page::url`], the same mapping the navigation
//! links use.

pub mod auth;
pub mod health;
pub mod pages;

use axum::{
    Router,
    routing::{get, post},
};

use luxstore_core::Page;

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login))
        .route("/callback", get(auth::callback))
        .route("/logout", post(auth::logout))
}

/// Create the page routes router.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route(&Page::Home.url(), get(pages::home))
        .route(&Page::Cart.url(), get(pages::cart))
        .route(&Page::Orders.url(), get(pages::orders))
        .route(&Page::AdminDashboard.url(), get(pages::admin_dashboard))
        .route(&Page::AdminOrders.url(), get(pages::admin_orders))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(page_routes())
        .nest("/auth", auth_routes())
}
