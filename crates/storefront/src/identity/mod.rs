//! Session-provider capability backed by the external identity service.
//!
//! The storefront never owns identity state. It keeps an opaque access token
//! in its own session and asks a [`SessionProvider`] who that token belongs
//! to. Handlers receive the provider through [`AppState`](crate::state::AppState)
//! as an `Arc<dyn SessionProvider>`, so tests can substitute a stub.
//!
//! # Flow
//!
//! 1. Sign In: redirect to [`SessionProvider::login_url`] with the page URL
//!    to come back to
//! 2. The identity service redirects to `/auth/callback` with an access token
//! 3. Every page render calls [`SessionProvider::current_user`] once
//! 4. Logout calls [`SessionProvider::logout`], then drops the local token

mod error;
mod http;

pub use error::IdentityError;
pub use http::HttpSessionProvider;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use luxstore_core::SessionUser;

/// Opaque bearer token issued by the identity service.
#[derive(Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    /// Wrap a raw token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// The raw token, for request headers only.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// Lookup, login and logout against an identity service.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Resolve the user behind `token`.
    ///
    /// # Errors
    ///
    /// Fails with [`IdentityError::NotAuthenticated`] when there is no token
    /// or the service rejects it, and with other variants when the service
    /// cannot be reached. Callers rendering pages treat every error the same.
    async fn current_user(&self, token: Option<&AccessToken>)
    -> Result<SessionUser, IdentityError>;

    /// Build the external login URL that returns the shopper to `return_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the login URL cannot be built.
    fn login_url(&self, return_url: &str) -> Result<Url, IdentityError>;

    /// End the remote session for `token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the identity service call fails.
    async fn logout(&self, token: &AccessToken) -> Result<(), IdentityError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("tok_live_abc123");
        assert_eq!(format!("{token:?}"), "AccessToken([REDACTED])");
        assert_eq!(token.expose(), "tok_live_abc123");
    }
}
