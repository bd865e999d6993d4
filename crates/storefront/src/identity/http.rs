//! HTTP client for the identity service.
//!
//! # Endpoints
//!
//! ```text
//! GET  {base}/api/auth/me       - Current user (Bearer token)
//! POST {base}/api/auth/logout   - End the session (Bearer token)
//! GET  {base}/login             - Hosted login page (browser redirect)
//! ```
//!
//! Each call is a single attempt. There are no retries and no client-side
//! timeouts beyond what the transport imposes.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use luxstore_core::SessionUser;

use super::{AccessToken, IdentityError, SessionProvider};
use crate::config::IdentityConfig;

const APP_ID_HEADER: &str = "X-App-Id";
const API_KEY_HEADER: &str = "X-Api-Key";

/// Identity service client.
///
/// Cheaply cloneable; all clones share one connection pool.
#[derive(Clone)]
pub struct HttpSessionProvider {
    inner: Arc<HttpSessionProviderInner>,
}

struct HttpSessionProviderInner {
    client: reqwest::Client,
    base_url: Url,
    app_id: String,
    api_key: Option<SecretString>,
}

impl HttpSessionProvider {
    /// Create a new identity client.
    #[must_use]
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            inner: Arc::new(HttpSessionProviderInner {
                client: reqwest::Client::new(),
                base_url: with_trailing_slash(config.base_url.clone()),
                app_id: config.app_id.clone(),
                api_key: config.api_key.clone(),
            }),
        }
    }

    /// Resolve an endpoint path relative to the identity base URL.
    fn endpoint(&self, path: &str) -> Result<Url, IdentityError> {
        Ok(self.inner.base_url.join(path)?)
    }

    fn authorized(
        &self,
        request: reqwest::RequestBuilder,
        token: &AccessToken,
    ) -> reqwest::RequestBuilder {
        let request = request
            .bearer_auth(token.expose())
            .header(APP_ID_HEADER, &self.inner.app_id);

        match &self.inner.api_key {
            Some(key) => request.header(API_KEY_HEADER, key.expose_secret()),
            None => request,
        }
    }
}

#[async_trait]
impl SessionProvider for HttpSessionProvider {
    async fn current_user(
        &self,
        token: Option<&AccessToken>,
    ) -> Result<SessionUser, IdentityError> {
        let token = token.ok_or(IdentityError::NotAuthenticated)?;
        let url = self.endpoint("api/auth/me")?;

        let response = self
            .authorized(self.inner.client.get(url), token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(IdentityError::from_status(response.status()));
        }

        Ok(response.json::<SessionUser>().await?)
    }

    fn login_url(&self, return_url: &str) -> Result<Url, IdentityError> {
        let mut url = self.endpoint("login")?;
        url.query_pairs_mut()
            .append_pair("from_url", return_url)
            .append_pair("app_id", &self.inner.app_id);
        Ok(url)
    }

    async fn logout(&self, token: &AccessToken) -> Result<(), IdentityError> {
        let url = self.endpoint("api/auth/logout")?;

        let response = self
            .authorized(self.inner.client.post(url), token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(IdentityError::from_status(response.status()));
        }

        Ok(())
    }
}

/// Make `Url::join` treat the last path segment as a directory.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn provider(base: &str) -> HttpSessionProvider {
        HttpSessionProvider::new(&IdentityConfig {
            base_url: Url::parse(base).unwrap(),
            app_id: "luxstore".to_string(),
            api_key: None,
        })
    }

    #[test]
    fn test_login_url_carries_return_target() {
        let url = provider("https://id.example.test")
            .login_url("http://localhost:3000/cart?step=2")
            .unwrap();

        assert_eq!(url.path(), "/login");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                (
                    "from_url".to_string(),
                    "http://localhost:3000/cart?step=2".to_string()
                ),
                ("app_id".to_string(), "luxstore".to_string()),
            ]
        );
    }

    #[test]
    fn test_endpoints_keep_base_path() {
        let provider = provider("https://auth.example.test/identity");
        assert_eq!(
            provider.endpoint("api/auth/me").unwrap().as_str(),
            "https://auth.example.test/identity/api/auth/me"
        );
        assert_eq!(
            provider.login_url("/").unwrap().path(),
            "/identity/login"
        );
    }

    #[tokio::test]
    async fn test_current_user_without_token_skips_request() {
        // The base URL is unroutable; reaching the network would surface an Http error.
        let result = provider("http://127.0.0.1:9").current_user(None).await;
        assert!(matches!(result, Err(IdentityError::NotAuthenticated)));
    }
}
