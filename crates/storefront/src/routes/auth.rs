//! Authentication route handlers.
//!
//! Sign-in and sign-out are delegated to the identity service. The
//! storefront only stores or drops the access token in its own session.
//!
//! - Login: redirect to the identity service's hosted login page
//! - Callback: store the issued access token and return to the original page
//! - Logout: end the remote session, then drop the local token

use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use url::{Position, Url};

use crate::error::{AppError, Result, add_breadcrumb, clear_sentry_user};
use crate::middleware::{access_token, clear_access_token, set_access_token};
use crate::state::AppState;

/// Query parameters for the login action.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Full URL of the page the shopper signed in from.
    pub return_to: Option<String>,
}

/// Query parameters from the identity service callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    /// Access token issued by the identity service.
    pub access_token: Option<String>,
    /// Return target passed through from the login action.
    pub from_url: Option<String>,
}

/// Logout form data.
#[derive(Debug, Deserialize)]
pub struct LogoutForm {
    /// Page to show after logout.
    pub return_to: Option<String>,
}

/// Start the login flow.
///
/// Hands the current page URL to the identity service and redirects there.
/// The session is left untouched.
///
/// # Route
///
/// `GET /auth/login?return_to=<url>`
///
/// # Errors
///
/// Returns an error if the identity login URL cannot be built.
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> Result<Redirect> {
    let base_url = &state.config().base_url;
    let target = safe_return_target(base_url, query.return_to.as_deref().unwrap_or("/"));
    let return_url = format!("{base_url}{target}");

    add_breadcrumb("auth", "Sign in redirect", Some(&[("return_to", target.as_str())]));

    let login_url = state.identity().login_url(&return_url)?;
    Ok(Redirect::to(login_url.as_str()))
}

/// Handle the identity service callback.
///
/// # Route
///
/// `GET /auth/callback?access_token=<token>&from_url=<url>`
///
/// # Errors
///
/// Returns `BadRequest` if no token was issued, or a session error if the
/// token cannot be stored.
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CallbackQuery>,
) -> Result<Redirect> {
    let Some(token) = query.access_token.filter(|t| !t.is_empty()) else {
        tracing::warn!("Identity callback missing access token");
        return Err(AppError::BadRequest("missing access token".to_string()));
    };

    set_access_token(&session, &token).await?;
    tracing::info!("Identity session established");

    let target = safe_return_target(
        &state.config().base_url,
        query.from_url.as_deref().unwrap_or("/"),
    );
    Ok(Redirect::to(&target))
}

/// Log out.
///
/// Waits for the identity service to end the remote session, then removes
/// the local token so the next render is signed out. A failed remote logout
/// is logged and the local token is removed anyway.
///
/// # Route
///
/// `POST /auth/logout`
///
/// # Errors
///
/// Returns a session error if the token cannot be removed.
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LogoutForm>,
) -> Result<Redirect> {
    if let Some(token) = access_token(&session).await
        && let Err(e) = state.identity().logout(&token).await
    {
        tracing::warn!(error = %e, "Identity logout failed, clearing local session");
    }

    clear_access_token(&session).await?;
    clear_sentry_user();
    add_breadcrumb("auth", "Logged out", None);

    let target = safe_return_target(
        &state.config().base_url,
        form.return_to.as_deref().unwrap_or("/"),
    );
    Ok(Redirect::to(&target))
}

/// Reduce a return target to a same-origin path.
///
/// Accepts absolute URLs on `base_url` and rooted paths. Anything else
/// (other hosts, protocol-relative `//host`, backslash tricks) becomes `/`.
/// The result is percent-encoded, so it is always a valid `Location` value.
#[must_use]
pub fn safe_return_target(base_url: &str, candidate: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    let Some(path) = rooted_path(base_url, candidate) else {
        return "/".to_string();
    };

    // Dot segments and backslashes are resolved by the join, so the
    // protocol-relative check has to run on the normalised result too.
    Url::parse(base_url)
        .and_then(|base| base.join(&path))
        .ok()
        .map(|url| url[Position::BeforePath..].to_string())
        .filter(|target| !target.starts_with("//"))
        .unwrap_or_else(|| "/".to_string())
}

fn rooted_path(base_url: &str, candidate: &str) -> Option<String> {
    let path = match candidate.strip_prefix(base_url) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') || rest.starts_with('?') => rest,
        Some(_) => return None,
        None => candidate,
    };

    let path = if path.starts_with('?') {
        format!("/{path}")
    } else {
        path.to_string()
    };

    let is_rooted = path.starts_with('/')
        && !path.starts_with("//")
        && !path.starts_with("/\\")
        && !path.chars().any(char::is_control);

    is_rooted.then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://luxstore.test";

    #[test]
    fn test_safe_return_target_accepts_paths() {
        assert_eq!(safe_return_target(BASE, "/cart"), "/cart");
        assert_eq!(safe_return_target(BASE, "/orders?page=2"), "/orders?page=2");
    }

    #[test]
    fn test_safe_return_target_accepts_same_origin_urls() {
        assert_eq!(safe_return_target(BASE, "https://luxstore.test/cart"), "/cart");
        assert_eq!(safe_return_target(BASE, "https://luxstore.test"), "/");
        assert_eq!(safe_return_target(BASE, "https://luxstore.test?x=1"), "/?x=1");
    }

    #[test]
    fn test_safe_return_target_rejects_other_origins() {
        assert_eq!(safe_return_target(BASE, "https://evil.test/cart"), "/");
        assert_eq!(safe_return_target(BASE, "https://luxstore.test.evil.test/"), "/");
        assert_eq!(safe_return_target(BASE, "//evil.test"), "/");
        assert_eq!(safe_return_target(BASE, "/\\evil.test"), "/");
        assert_eq!(safe_return_target(BASE, "javascript:alert(1)"), "/");
        assert_eq!(safe_return_target(BASE, ""), "/");
        assert_eq!(safe_return_target(BASE, "/cart\r\nSet-Cookie: x"), "/");
    }

    #[test]
    fn test_safe_return_target_percent_encodes_non_ascii() {
        assert_eq!(safe_return_target(BASE, "/caf\u{e9}"), "/caf%C3%A9");
        assert_eq!(
            safe_return_target(BASE, "https://luxstore.test/orders?q=th\u{e9}"),
            "/orders?q=th%C3%A9"
        );
        assert_eq!(safe_return_target(BASE, "/caf%C3%A9"), "/caf%C3%A9");
    }

    #[test]
    fn test_safe_return_target_rejects_normalised_protocol_relative() {
        assert_eq!(safe_return_target(BASE, "/.//evil.test"), "/");
        assert_eq!(safe_return_target(BASE, "/.\\/evil.test"), "/");
    }
}
