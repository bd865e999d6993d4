//! Page shell: navigation bar, user menu and footer.
//!
//! A [`Layout`] is built once per rendered page from the session user and
//! the request location. Page templates embed it and extend `base.html`,
//! which renders the shell around the page body.
//!
//! # Visibility rules
//!
//! | Section              | Shown when                     |
//! |----------------------|--------------------------------|
//! | Home link            | always                         |
//! | Cart, Orders links   | a session user is present      |
//! | Admin menu           | the user's role is `admin`     |
//! | User menu            | a session user is present      |
//! | Sign In              | no session user                |
//! | Footer quick links   | always                         |

mod location;

pub use location::Location;

use axum::{extract::FromRequestParts, http::request::Parts};

use luxstore_core::{Page, SessionUser};

use crate::middleware::CurrentUser;
use crate::state::AppState;

/// A navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Stable identifier, used as `data-nav` in markup.
    pub key: &'static str,
    /// Visible label.
    pub label: &'static str,
    /// Resolved page path.
    pub href: String,
    /// Whether the current location is exactly this page.
    pub active: bool,
}

impl NavLink {
    fn new(page: Page, label: &'static str, location: &Location) -> Self {
        Self {
            key: nav_key(page),
            label,
            href: page.url(),
            active: page.is_active(location.path()),
        }
    }
}

/// Admin dropdown, present only for admin users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminMenu {
    /// Highlight the trigger when on any admin page.
    pub active: bool,
    pub items: Vec<NavLink>,
}

/// User dropdown contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMenu {
    pub full_name: String,
    pub email: String,
}

/// The rendered page shell.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Logical name the handler rendered. Not used for link highlighting,
    /// which always follows the live request path.
    pub current_page_name: String,
    /// Request location the shell was built for.
    pub location: Location,
    /// Brand link target.
    pub home_href: String,
    pub user: Option<UserMenu>,
    pub nav_links: Vec<NavLink>,
    pub admin_menu: Option<AdminMenu>,
    /// Target of the Sign In control.
    pub login_href: String,
    /// Where the logout form sends the shopper back to.
    pub logout_return_to: String,
    pub quick_links: Vec<NavLink>,
}

impl Layout {
    /// Build the shell for `location` and the (optional) session user.
    #[must_use]
    pub fn new(user: Option<&SessionUser>, location: Location) -> Self {
        let mut nav_links = vec![NavLink::new(Page::Home, "Home", &location)];
        if user.is_some() {
            nav_links.push(NavLink::new(Page::Cart, "Cart", &location));
            nav_links.push(NavLink::new(Page::Orders, "Orders", &location));
        }

        let admin_menu = user.filter(|u| u.is_admin()).map(|_| AdminMenu {
            active: Page::AdminDashboard.is_active(location.path())
                || Page::AdminOrders.is_active(location.path()),
            items: vec![
                NavLink::new(Page::AdminDashboard, "Dashboard", &location),
                NavLink::new(Page::AdminOrders, "Manage Orders", &location),
            ],
        });

        let quick_links = vec![
            NavLink::new(Page::Home, "Home", &location),
            NavLink::new(Page::Cart, "Cart", &location),
            NavLink::new(Page::Orders, "Orders", &location),
        ];

        Self {
            current_page_name: String::new(),
            home_href: Page::Home.url(),
            user: user.map(|u| UserMenu {
                full_name: u.full_name.clone(),
                email: u.email.clone(),
            }),
            nav_links,
            admin_menu,
            login_href: location.login_href(),
            logout_return_to: location.path_and_query().to_string(),
            quick_links,
            location,
        }
    }

    /// Record which logical page is being rendered.
    #[must_use]
    pub fn page(mut self, page_name: &str) -> Self {
        tracing::Span::current().record("page", page_name);
        page_name.clone_into(&mut self.current_page_name);
        self
    }

    /// Whether `page` is the current location.
    #[must_use]
    pub fn is_active(&self, page: Page) -> bool {
        page.is_active(self.location.path())
    }

    /// Whether a session user is present. Pages use it to swap in
    /// signed-out copy.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Mount sequence: one identity lookup, then compose the shell.
    ///
    /// Any lookup failure renders the shell signed out.
    pub async fn mount(parts: &mut Parts, state: &AppState) -> Self {
        let Ok(CurrentUser(user)) = CurrentUser::from_request_parts(parts, state).await;
        let location = Location::from_parts(parts, &state.config().base_url);
        Self::new(user.as_ref(), location)
    }
}

impl FromRequestParts<AppState> for Layout {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::mount(parts, state).await)
    }
}

const fn nav_key(page: Page) -> &'static str {
    match page {
        Page::Home => "home",
        Page::Cart => "cart",
        Page::Orders => "orders",
        Page::AdminDashboard => "admin-dashboard",
        Page::AdminOrders => "admin-orders",
    }
}

#[cfg(test)]
mod tests {
    use luxstore_core::Role;

    use super::*;

    const BASE: &str = "http://localhost:3000";

    fn at(path: &str) -> Location {
        Location::new(BASE, path)
    }

    fn shopper() -> SessionUser {
        SessionUser::new("Ada Lovelace", "ada@example.com", Role::User)
    }

    fn admin() -> SessionUser {
        SessionUser::new("Grace Hopper", "grace@example.com", Role::Admin)
    }

    fn keys(layout: &Layout) -> Vec<&'static str> {
        layout.nav_links.iter().map(|l| l.key).collect()
    }

    fn link<'a>(layout: &'a Layout, key: &str) -> Option<&'a NavLink> {
        layout.nav_links.iter().find(|l| l.key == key)
    }

    #[test]
    fn test_signed_out_shows_home_only() {
        let layout = Layout::new(None, at("/home"));

        assert_eq!(keys(&layout), vec!["home"]);
        assert!(layout.user.is_none());
        assert!(layout.admin_menu.is_none());
        assert!(!layout.is_signed_in());
    }

    #[test]
    fn test_is_signed_in_follows_user() {
        assert!(Layout::new(Some(&shopper()), at("/cart")).is_signed_in());
        assert!(!Layout::new(None, at("/cart")).is_signed_in());
    }

    #[test]
    fn test_signed_in_shows_cart_and_orders() {
        let user = shopper();
        let layout = Layout::new(Some(&user), at("/home"));

        assert_eq!(keys(&layout), vec!["home", "cart", "orders"]);
        assert_eq!(
            layout.user,
            Some(UserMenu {
                full_name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
            })
        );
    }

    #[test]
    fn test_admin_menu_requires_admin_role() {
        let layout = Layout::new(Some(&shopper()), at("/home"));
        assert!(layout.admin_menu.is_none());

        let other = SessionUser::new("Op", "op@example.com", Role::from("Admin"));
        let layout = Layout::new(Some(&other), at("/home"));
        assert!(layout.admin_menu.is_none());

        let layout = Layout::new(Some(&admin()), at("/home"));
        let menu = layout.admin_menu.expect("admin menu");
        assert!(!menu.active);
        let labels: Vec<_> = menu.items.iter().map(|l| (l.label, l.href.as_str())).collect();
        assert_eq!(
            labels,
            vec![
                ("Dashboard", "/admindashboard"),
                ("Manage Orders", "/adminorders")
            ]
        );
    }

    #[test]
    fn test_admin_menu_active_on_either_admin_page() {
        for path in ["/admindashboard", "/adminorders"] {
            let layout = Layout::new(Some(&admin()), at(path));
            assert!(layout.admin_menu.is_some_and(|m| m.active), "{path}");
        }

        let layout = Layout::new(Some(&admin()), at("/admindashboard/"));
        assert!(layout.admin_menu.is_some_and(|m| !m.active));
    }

    #[test]
    fn test_active_link_is_exact_path_match() {
        let user = shopper();
        for page in [Page::Home, Page::Cart, Page::Orders] {
            let layout = Layout::new(Some(&user), at(&page.url()));
            for link in &layout.nav_links {
                assert_eq!(link.active, link.href == page.url(), "{page} / {}", link.key);
            }
        }

        let layout = Layout::new(Some(&user), at("/"));
        assert!(layout.nav_links.iter().all(|l| !l.active));

        let layout = Layout::new(Some(&user), at("/cart?coupon=LUX10"));
        assert!(layout.is_active(Page::Cart));
    }

    #[test]
    fn test_page_name_does_not_drive_highlighting() {
        let user = shopper();
        let layout = Layout::new(Some(&user), at("/orders")).page("Cart");

        assert_eq!(layout.current_page_name, "Cart");
        assert!(!layout.is_active(Page::Cart));
        assert!(link(&layout, "orders").is_some_and(|l| l.active));
        assert!(link(&layout, "cart").is_some_and(|l| !l.active));
    }

    #[test]
    fn test_login_href_carries_full_url() {
        let layout = Layout::new(None, at("/cart?step=2"));
        assert_eq!(
            layout.login_href,
            "/auth/login?return_to=http%3A%2F%2Flocalhost%3A3000%2Fcart%3Fstep%3D2"
        );
        assert_eq!(layout.logout_return_to, "/cart?step=2");
    }

    #[test]
    fn test_quick_links_render_for_everyone() {
        let layout = Layout::new(None, at("/home"));
        let hrefs: Vec<_> = layout.quick_links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(hrefs, vec!["/home", "/cart", "/orders"]);
    }
}
