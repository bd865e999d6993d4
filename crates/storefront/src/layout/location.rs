//! The request location a layout is rendered for.

use axum::{extract::OriginalUri, http::request::Parts};

/// Path and full URL of the page being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path_and_query: String,
    path_len: usize,
    full_url: String,
}

impl Location {
    /// Build a location from the storefront base URL and a request target.
    #[must_use]
    pub fn new(base_url: &str, path_and_query: &str) -> Self {
        let path_and_query = if path_and_query.starts_with('/') {
            path_and_query.to_string()
        } else {
            format!("/{path_and_query}")
        };
        let path_len = path_and_query.find('?').unwrap_or(path_and_query.len());

        Self {
            full_url: format!("{}{path_and_query}", base_url.trim_end_matches('/')),
            path_and_query,
            path_len,
        }
    }

    /// Build a location from request parts.
    ///
    /// Uses the URI as the client sent it, before any router nesting
    /// stripped a prefix.
    #[must_use]
    pub fn from_parts(parts: &Parts, base_url: &str) -> Self {
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map_or(&parts.uri, |original| &original.0);

        let target = uri
            .path_and_query()
            .map_or_else(|| uri.path(), |pq| pq.as_str());

        Self::new(base_url, target)
    }

    /// The path, without query string.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path_and_query.get(..self.path_len).unwrap_or("/")
    }

    /// The path including any query string.
    #[must_use]
    pub fn path_and_query(&self) -> &str {
        &self.path_and_query
    }

    /// Link to the login action that returns to this page.
    #[must_use]
    pub fn login_href(&self) -> String {
        let encoded: String =
            url::form_urlencoded::byte_serialize(self.full_url.as_bytes()).collect();
        format!("/auth/login?return_to={encoded}")
    }
}
