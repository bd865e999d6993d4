//! Authentication extractors and session token helpers.
//!
//! The identity lookup happens at most once per request: the first extractor
//! that needs the user stores the outcome in the request extensions and
//! later extractors reuse it.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use luxstore_core::SessionUser;

use crate::error::{AppError, set_sentry_user};
use crate::identity::AccessToken;
use crate::layout::Location;
use crate::state::AppState;

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for the identity service access token.
    pub const ACCESS_TOKEN: &str = "access_token";
}

/// Outcome of the identity lookup for the current request.
#[derive(Clone)]
struct ResolvedUser(Option<SessionUser>);

/// Extractor for the session user, if any.
///
/// Never rejects. A missing token, an expired token and an unreachable
/// identity service all resolve to `None`.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentUser(user): CurrentUser) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hello, {}!", u.full_name),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct CurrentUser(pub Option<SessionUser>);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(ResolvedUser(user)) = parts.extensions.get::<ResolvedUser>() {
            return Ok(Self(user.clone()));
        }

        let token = match parts.extensions.get::<Session>() {
            Some(session) => access_token(session).await,
            None => None,
        };

        let user = match state.identity().current_user(token.as_ref()).await {
            Ok(user) => {
                set_sentry_user(&user.email);
                Some(user)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Session lookup failed, rendering signed out");
                None
            }
        };

        parts.extensions.insert(ResolvedUser(user.clone()));
        Ok(Self(user))
    }
}

/// Extractor that requires a session user with the admin role.
///
/// Anonymous visitors are sent through the login flow and returned to the
/// requested page. Signed-in users without the admin role get 403.
pub struct RequireAdmin(pub SessionUser);

/// Rejection for [`RequireAdmin`].
pub enum AdminRejection {
    /// Not signed in: redirect to the login action.
    SignIn(String),
    /// Signed in without the admin role.
    Forbidden,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::SignIn(login_href) => Redirect::to(&login_href).into_response(),
            Self::Forbidden => {
                AppError::Forbidden("admin access required".to_string()).into_response()
            }
        }
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(CurrentUser(user)) = CurrentUser::from_request_parts(parts, state).await;

        match user {
            Some(user) if user.is_admin() => Ok(Self(user)),
            Some(_) => Err(AdminRejection::Forbidden),
            None => {
                let location = Location::from_parts(parts, &state.config().base_url);
                Err(AdminRejection::SignIn(location.login_href()))
            }
        }
    }
}

/// Read the access token from the session.
///
/// A session read error counts as "no token".
pub async fn access_token(session: &Session) -> Option<AccessToken> {
    session
        .get::<String>(session_keys::ACCESS_TOKEN)
        .await
        .ok()
        .flatten()
        .map(AccessToken::new)
}

/// Store the access token in the session.
///
/// The session ID is cycled first so a pre-login session ID cannot be
/// reused after sign-in.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_access_token(
    session: &Session,
    token: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::ACCESS_TOKEN, token).await
}

/// Remove the access token from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_access_token(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<String>(session_keys::ACCESS_TOKEN)
        .await?;
    Ok(())
}
