//! Identity service error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the identity service.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No session token, or the identity service rejected it.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Transport or decoding failure.
    #[error("identity request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The identity service answered with a status we do not handle.
    #[error("identity service returned {0}")]
    UnexpectedStatus(StatusCode),

    /// The configured identity URL could not be joined with an endpoint.
    #[error("invalid identity url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl IdentityError {
    /// Map a non-success response status to an error.
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::NotAuthenticated,
            other => Self::UnexpectedStatus(other),
        }
    }
}
