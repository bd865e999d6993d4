//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with a `request_id` field; handlers record
//!    `page` on their own `#[instrument]` span)
//! 3. Request ID (reuse or generate, echo in response)
//! 4. Security headers
//! 5. Session layer (tower-sessions)

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{
    AdminRejection, CurrentUser, RequireAdmin, access_token, clear_access_token,
    set_access_token,
};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
