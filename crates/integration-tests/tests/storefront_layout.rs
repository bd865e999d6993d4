//! Integration tests for the page shell rendered around every page.

use axum::http::StatusCode;
use luxstore_integration_tests::{StubIdentity, TestApp};

// ============================================================================
// Visibility
// ============================================================================

#[tokio::test]
async fn test_anonymous_visitor_sees_sign_in_only() {
    let app = TestApp::new(StubIdentity::shopper());

    let resp = app.get("/home", None).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"data-nav="home""#));
    assert!(!resp.body.contains(r#"data-nav="cart""#));
    assert!(!resp.body.contains(r#"data-nav="orders""#));
    assert!(resp.body.contains("data-sign-in"));
    assert!(!resp.body.contains("data-user-menu"));
    assert!(!resp.body.contains("data-admin-menu"));
}

#[tokio::test]
async fn test_signed_in_shopper_sees_cart_orders_and_user_menu() {
    let app = TestApp::new(StubIdentity::shopper());
    let cookie = app.sign_in().await;

    let resp = app.get("/home", Some(&cookie)).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"data-nav="cart""#));
    assert!(resp.body.contains(r#"data-nav="orders""#));
    assert!(resp.body.contains("data-user-menu"));
    assert!(resp.body.contains("Ada Lovelace"));
    assert!(resp.body.contains("ada@example.com"));
    assert!(resp.body.contains("Logout"));
    assert!(!resp.body.contains("data-sign-in"));
    assert!(!resp.body.contains("data-admin-menu"));
}

#[tokio::test]
async fn test_admin_sees_admin_menu() {
    let app = TestApp::new(StubIdentity::admin());
    let cookie = app.sign_in().await;

    let resp = app.get("/home", Some(&cookie)).await;

    assert!(resp.body.contains("data-admin-menu"));
    assert!(resp.body.contains(r#"data-nav="admin-dashboard""#));
    assert!(resp.body.contains(r#"data-nav="admin-orders""#));
    assert!(resp.body.contains("Manage Orders"));
}

#[tokio::test]
async fn test_failed_lookup_renders_signed_out() {
    let app = TestApp::new(StubIdentity::unavailable());
    let cookie = app.sign_in().await;

    let resp = app.get("/cart", Some(&cookie)).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("data-sign-in"));
    assert!(!resp.body.contains("data-user-menu"));
    assert!(!resp.body.contains(r#"data-nav="cart""#));
}

#[tokio::test]
async fn test_cart_body_prompts_only_signed_out_visitors() {
    let app = TestApp::new(StubIdentity::shopper());
    let prompt = "Sign in to see the items saved in your cart.";

    let resp = app.get("/cart", None).await;
    assert!(resp.body.contains(prompt));

    let cookie = app.sign_in().await;
    let resp = app.get("/cart", Some(&cookie)).await;
    assert!(!resp.body.contains(prompt));
}

#[tokio::test]
async fn test_footer_renders_for_everyone() {
    let app = TestApp::new(StubIdentity::shopper());

    let resp = app.get("/home", None).await;

    assert!(resp.body.contains("Premium e-commerce experience"));
    assert!(resp.body.contains(r#"data-quick-link="cart""#));
    assert!(resp.body.contains(r#"data-quick-link="orders""#));
    assert!(resp.body.contains("30-Day Returns"));
    assert!(resp.body.contains("LuxStore. All rights reserved."));
}

// ============================================================================
// Active link
// ============================================================================

#[tokio::test]
async fn test_active_link_follows_exact_path() {
    let app = TestApp::new(StubIdentity::shopper());
    let cookie = app.sign_in().await;

    let resp = app.get("/cart", Some(&cookie)).await;
    assert!(resp.body.contains(r#"data-nav="cart" aria-current="page""#));
    assert!(!resp.body.contains(r#"data-nav="home" aria-current="page""#));
    assert!(!resp.body.contains(r#"data-nav="orders" aria-current="page""#));

    let resp = app.get("/orders", Some(&cookie)).await;
    assert!(resp.body.contains(r#"data-nav="orders" aria-current="page""#));
    assert!(!resp.body.contains(r#"data-nav="cart" aria-current="page""#));
}

#[tokio::test]
async fn test_root_serves_home_without_highlight() {
    let app = TestApp::new(StubIdentity::shopper());

    let resp = app.get("/", None).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Welcome to LuxStore"));
    assert!(!resp.body.contains(r#"aria-current="page""#));
}

// ============================================================================
// Lookup count
// ============================================================================

#[tokio::test]
async fn test_one_lookup_per_render() {
    let app = TestApp::new(StubIdentity::admin());
    let cookie = app.sign_in().await;
    assert_eq!(app.identity.lookups(), 0);

    app.get("/home", Some(&cookie)).await;
    assert_eq!(app.identity.lookups(), 1);

    // RequireAdmin and Layout both need the user.
    let resp = app.get("/admindashboard", Some(&cookie)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(app.identity.lookups(), 2);
}

// ============================================================================
// Admin pages
// ============================================================================

#[tokio::test]
async fn test_admin_page_redirects_anonymous_to_login() {
    let app = TestApp::new(StubIdentity::admin());

    let resp = app.get("/adminorders", None).await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(
        resp.location(),
        Some("/auth/login?return_to=http%3A%2F%2Flocalhost%3A3000%2Fadminorders")
    );
}

#[tokio::test]
async fn test_admin_page_forbidden_for_shopper() {
    let app = TestApp::new(StubIdentity::shopper());
    let cookie = app.sign_in().await;

    let resp = app.get("/admindashboard", Some(&cookie)).await;

    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_dashboard_renders_for_admin() {
    let app = TestApp::new(StubIdentity::admin());
    let cookie = app.sign_in().await;

    let resp = app.get("/admindashboard", Some(&cookie)).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Grace Hopper"));
    assert!(resp.body.contains(r#"data-nav="admin-dashboard" aria-current="page""#));
}

// ============================================================================
// Headers and health
// ============================================================================

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let app = TestApp::new(StubIdentity::shopper());

    let request = axum::http::Request::get("/home")
        .header("x-request-id", "req-abc")
        .body(axum::body::Body::empty())
        .expect("request");
    let resp = app.send(request).await;

    assert_eq!(resp.headers["x-frame-options"], "DENY");
    assert_eq!(resp.headers["x-content-type-options"], "nosniff");
    assert!(resp.headers.contains_key("content-security-policy"));
    assert_eq!(resp.headers["x-request-id"], "req-abc");
}

#[tokio::test]
async fn test_unknown_path_returns_not_found_body() {
    let app = TestApp::new(StubIdentity::shopper());

    let resp = app.get("/products/lux-watch", None).await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, "Not found: /products/lux-watch");
    assert_eq!(resp.headers["x-content-type-options"], "nosniff");
    assert_eq!(app.identity.lookups(), 0);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new(StubIdentity::shopper());

    let resp = app.get("/health", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");

    let resp = app.get("/health/ready", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(app.identity.lookups(), 0);
}
