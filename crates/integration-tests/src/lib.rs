//! Integration test harness for the LuxStore storefront.
//!
//! Tests drive the full router in-process with `tower::ServiceExt::oneshot`,
//! an in-memory session store and a [`StubIdentity`] in place of the
//! identity service. No database or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p luxstore-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use tower::ServiceExt;
use tower_sessions::MemoryStore;
use url::Url;

use luxstore_core::{Role, SessionUser};
use luxstore_storefront::{
    build_router,
    config::{IdentityConfig, StorefrontConfig},
    identity::{AccessToken, IdentityError, SessionProvider},
    middleware::create_session_layer,
    state::AppState,
};

/// Public base URL used by every test app.
pub const BASE_URL: &str = "http://localhost:3000";

/// Login page of the stub identity service.
pub const IDENTITY_LOGIN: &str = "https://identity.test/login";

/// How the stub answers session lookups.
#[derive(Debug, Clone)]
enum Lookup {
    /// Any present token resolves to this user.
    User(SessionUser),
    /// Every lookup fails as if the service were down.
    Unavailable,
}

/// In-memory [`SessionProvider`] that records how it was called.
#[derive(Debug)]
pub struct StubIdentity {
    lookup: Lookup,
    fail_logout: bool,
    lookups: AtomicUsize,
    logouts: AtomicUsize,
    login_requests: Mutex<Vec<String>>,
}

impl StubIdentity {
    fn with_lookup(lookup: Lookup) -> Self {
        Self {
            lookup,
            fail_logout: false,
            lookups: AtomicUsize::new(0),
            logouts: AtomicUsize::new(0),
            login_requests: Mutex::new(Vec::new()),
        }
    }

    /// Signed-in user with an ordinary role.
    #[must_use]
    pub fn shopper() -> Self {
        Self::with_lookup(Lookup::User(SessionUser::new(
            "Ada Lovelace",
            "ada@example.com",
            Role::User,
        )))
    }

    /// Signed-in user with the admin role.
    #[must_use]
    pub fn admin() -> Self {
        Self::with_lookup(Lookup::User(SessionUser::new(
            "Grace Hopper",
            "grace@example.com",
            Role::Admin,
        )))
    }

    /// Identity service that fails every lookup.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::with_lookup(Lookup::Unavailable)
    }

    /// Make remote logout fail.
    #[must_use]
    pub const fn failing_logout(mut self) -> Self {
        self.fail_logout = true;
        self
    }

    /// Number of `current_user` calls so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Number of `logout` calls so far.
    pub fn logouts(&self) -> usize {
        self.logouts.load(Ordering::SeqCst)
    }

    /// Return URLs passed to `login_url`, in call order.
    pub fn login_requests(&self) -> Vec<String> {
        self.login_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionProvider for StubIdentity {
    async fn current_user(
        &self,
        token: Option<&AccessToken>,
    ) -> Result<SessionUser, IdentityError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        match (&self.lookup, token) {
            (Lookup::Unavailable, _) => {
                Err(IdentityError::from_status(StatusCode::SERVICE_UNAVAILABLE))
            }
            (Lookup::User(_), None) => Err(IdentityError::NotAuthenticated),
            (Lookup::User(user), Some(_)) => Ok(user.clone()),
        }
    }

    fn login_url(&self, return_url: &str) -> Result<Url, IdentityError> {
        self.login_requests
            .lock()
            .unwrap()
            .push(return_url.to_string());
        Ok(Url::parse_with_params(
            IDENTITY_LOGIN,
            &[("from_url", return_url), ("app_id", "luxstore-test")],
        )?)
    }

    async fn logout(&self, _token: &AccessToken) -> Result<(), IdentityError> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        if self.fail_logout {
            Err(IdentityError::from_status(StatusCode::BAD_GATEWAY))
        } else {
            Ok(())
        }
    }
}

/// Storefront configuration for tests: plain HTTP, no database, no Sentry.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        database_url: None,
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 3000,
        base_url: BASE_URL.to_string(),
        identity: IdentityConfig {
            base_url: Url::parse("https://identity.test").unwrap(),
            app_id: "luxstore-test".to_string(),
            api_key: None,
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// A storefront router wired to `identity`.
pub struct TestApp {
    router: Router,
    pub identity: Arc<StubIdentity>,
}

/// Response pieces the tests assert on.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// The `name=value` part of the session cookie, if one was set.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("luxstore_session="))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}

impl TestApp {
    /// Build the app around `identity` with an in-memory session store.
    #[must_use]
    pub fn new(identity: StubIdentity) -> Self {
        let config = test_config();
        let identity = Arc::new(identity);
        let session_layer = create_session_layer(MemoryStore::default(), &config);
        let state = AppState::with_provider(config, identity.clone(), None);
        Self {
            router: build_router(state, session_layer),
            identity,
        }
    }

    /// Send a request through the router.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    /// `GET path`, optionally with a session cookie.
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        let mut request = Request::get(path);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    /// `POST path` with a form body and an optional session cookie.
    pub async fn post_form(&self, path: &str, form: &str, cookie: Option<&str>) -> TestResponse {
        let mut request = Request::post(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::from(form.to_string())).unwrap())
            .await
    }

    /// Complete the identity callback and return the session cookie.
    pub async fn sign_in(&self) -> String {
        let response = self
            .get("/auth/callback?access_token=tok-123&from_url=%2Fhome", None)
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        response.session_cookie().expect("session cookie")
    }
}
