//! Logical page names and their routable paths.

use core::fmt;
use core::str::FromStr;

/// Error returned when parsing an unknown logical page name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown page: {0}")]
pub struct PageError(pub String);

/// A logical page of the storefront.
///
/// Links are always built from a `Page` through [`create_page_url`], never
/// from hand-written paths, so navigation and routing agree on one mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Cart,
    Orders,
    AdminDashboard,
    AdminOrders,
}

impl Page {
    /// Every logical page, in navigation order.
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::Cart,
        Self::Orders,
        Self::AdminDashboard,
        Self::AdminOrders,
    ];

    /// The logical page name, e.g. `"AdminDashboard"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Cart => "Cart",
            Self::Orders => "Orders",
            Self::AdminDashboard => "AdminDashboard",
            Self::AdminOrders => "AdminOrders",
        }
    }

    /// The routable path for this page.
    #[must_use]
    pub fn url(self) -> String {
        create_page_url(self.name())
    }

    /// Whether `current_path` is exactly this page's path.
    ///
    /// No normalisation happens: `/` does not match [`Page::Home`] and
    /// `/cart/` does not match [`Page::Cart`].
    #[must_use]
    pub fn is_active(self, current_path: &str) -> bool {
        current_path == self.url()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Page {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.name() == s)
            .ok_or_else(|| PageError(s.to_owned()))
    }
}

/// Resolve a logical page name to its path.
///
/// The path is the lowercased name with spaces replaced by dashes, prefixed
/// with `/`.
///
/// ```
/// use luxstore_core::create_page_url;
///
/// assert_eq!(create_page_url("Home"), "/home");
/// assert_eq!(create_page_url("AdminOrders"), "/adminorders");
/// assert_eq!(create_page_url("Gift Cards"), "/gift-cards");
/// ```
#[must_use]
pub fn create_page_url(page_name: &str) -> String {
    format!("/{}", page_name.to_lowercase().replace(' ', "-"))
}
