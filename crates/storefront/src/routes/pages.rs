//! Page route handlers.
//!
//! Each page renders its body inside the shared [`Layout`]. The bodies are
//! intentionally thin: catalogue, cart and order data live in other services.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::OriginalUri, response::IntoResponse};
use tracing::instrument;

use luxstore_core::{Page, SessionUser};

use crate::error::AppError;
use crate::filters;
use crate::layout::Layout;
use crate::middleware::RequireAdmin;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/cart.html")]
pub struct CartTemplate {
    pub layout: Layout,
}

/// Orders page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/orders.html")]
pub struct OrdersTemplate {
    pub layout: Layout,
}

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/admin_dashboard.html")]
pub struct AdminDashboardTemplate {
    pub layout: Layout,
    pub admin: SessionUser,
}

/// Admin order management template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/admin_orders.html")]
pub struct AdminOrdersTemplate {
    pub layout: Layout,
}

/// Display the home page.
///
/// Served at both `/` and `/home`. Only `/home` highlights the Home link.
#[instrument(skip_all, fields(page = tracing::field::Empty))]
pub async fn home(layout: Layout) -> impl IntoResponse {
    HomeTemplate {
        layout: layout.page(Page::Home.name()),
    }
}

/// Display the cart page.
#[instrument(skip_all, fields(page = tracing::field::Empty))]
pub async fn cart(layout: Layout) -> impl IntoResponse {
    CartTemplate {
        layout: layout.page(Page::Cart.name()),
    }
}

/// Display the order history page.
#[instrument(skip_all, fields(page = tracing::field::Empty))]
pub async fn orders(layout: Layout) -> impl IntoResponse {
    OrdersTemplate {
        layout: layout.page(Page::Orders.name()),
    }
}

/// Display the admin dashboard.
#[instrument(skip_all, fields(page = tracing::field::Empty))]
pub async fn admin_dashboard(
    RequireAdmin(admin): RequireAdmin,
    layout: Layout,
) -> impl IntoResponse {
    AdminDashboardTemplate {
        layout: layout.page(Page::AdminDashboard.name()),
        admin,
    }
}

/// Display the admin order management page.
#[instrument(skip_all, fields(page = tracing::field::Empty))]
pub async fn admin_orders(
    RequireAdmin(_admin): RequireAdmin,
    layout: Layout,
) -> impl IntoResponse {
    AdminOrdersTemplate {
        layout: layout.page(Page::AdminOrders.name()),
    }
}

/// Fallback for paths no route matches.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    tracing::debug!(path = %uri.path(), "No route");
    AppError::NotFound(uri.path().to_string())
}
