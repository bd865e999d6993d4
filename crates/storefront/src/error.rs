//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. Route handlers that can fail return
//! `Result<T, AppError>`.
//!
//! A failed session lookup is deliberately not an `AppError`: page renders
//! degrade to the signed-out layout instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::identity::IdentityError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Identity service call failed.
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Session store read or write failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// No route matches the requested path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is authenticated but lacks the required role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Session(_) | Self::Identity(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Identity(err) => match err {
                IdentityError::NotAuthenticated => StatusCode::UNAUTHORIZED,
                IdentityError::InvalidUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
                IdentityError::Http(_) | IdentityError::UnexpectedStatus(_) => {
                    StatusCode::BAD_GATEWAY
                }
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Session(_) => "Internal server error".to_string(),
            Self::Identity(IdentityError::NotAuthenticated) => "Please sign in".to_string(),
            Self::Identity(_) => "External service error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context.
///
/// Call this after a successful identity lookup to associate errors with users.
pub fn set_sentry_user(email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
