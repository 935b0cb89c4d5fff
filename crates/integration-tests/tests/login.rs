//! Login, demo entry and logout flows.

use reqwest::Method;
use serde_json::json;

use cms_admin::api::RequestBody;
use cms_admin_integration_tests::{Reply, TestApp};

// ============================================================================
// Validation (no backend traffic)
// ============================================================================

#[tokio::test]
async fn test_empty_credentials_make_no_request() {
    let mut app = TestApp::new();

    for (email, password) in [("", "secret"), ("ada@example.com", ""), ("  ", "  ")] {
        let resp = app
            .post_form("/login", &[("email", email), ("password", password)])
            .await;
        assert_eq!(resp.status.as_u16(), 422);
        assert!(resp.body.contains("Email and password are required"));
        assert!(resp.body.contains("toast-error"));
    }

    assert!(app.api.requests().is_empty());
}

#[tokio::test]
async fn test_email_without_at_is_blocked() {
    let mut app = TestApp::new();

    let resp = app
        .post_form("/login", &[("email", "ada.example.com"), ("password", "secret")])
        .await;

    assert_eq!(resp.status.as_u16(), 422);
    assert!(resp.body.contains("Enter a valid email address"));
    assert!(resp.body.contains("value=\"ada.example.com\""));
    assert!(app.api.requests().is_empty());
}

// ============================================================================
// Token handling
// ============================================================================

#[tokio::test]
async fn test_login_with_token_starts_session() {
    let mut app = TestApp::new();
    app.api.reply(
        Method::POST,
        "/auth/login",
        Reply::Json(json!({
            "token": "abc",
            "user": { "id": "7", "name": "Ada Lovelace", "email": "ada@example.com", "role": "admin" }
        })),
    );

    let resp = app
        .post_form("/login", &[("email", "ada@example.com"), ("password", "secret")])
        .await;
    assert_eq!(resp.status.as_u16(), 303);
    assert_eq!(resp.location.as_deref(), Some("/dash/home"));
    assert!(resp.session_cookie.is_some());

    let requests = app.api.requests_to(&Method::POST, "/auth/login");
    assert_eq!(requests.len(), 1);
    assert!(matches!(requests[0].body, RequestBody::Json(_)));

    let home = app.get("/dash/home").await;
    assert_eq!(home.status.as_u16(), 200);
    assert!(home.body.contains("Welcome back, Ada Lovelace"));
    assert!(home.body.contains("Session mode: live"));

    // The stored token authorises content requests.
    app.api
        .reply(Method::GET, "/home/hero", Reply::Json(json!({ "data": { "title": "Hi" } })));
    let page = app.get("/dash/home-hero").await;
    assert_eq!(page.status.as_u16(), 200);
    let fetches = app.api.requests_to(&Method::GET, "/home/hero");
    assert_eq!(fetches[0].token.as_deref(), Some("abc"));
}

#[tokio::test]
async fn test_missing_token_falls_back_to_generate_token() {
    let mut app = TestApp::new();
    app.api.reply(
        Method::POST,
        "/auth/login",
        Reply::Json(json!({ "success": true, "data": { "user": { "name": "Grace" } } })),
    );
    app.api.reply(
        Method::POST,
        "/auth/generate-token",
        Reply::Json(json!({ "token": "xyz" })),
    );

    let resp = app
        .post_form("/login", &[("email", "grace@example.com"), ("password", "secret")])
        .await;
    assert_eq!(resp.status.as_u16(), 303);
    assert_eq!(app.api.requests_to(&Method::POST, "/auth/generate-token").len(), 1);

    app.api.reply(Method::GET, "/contact/details", Reply::Json(json!({})));
    app.get("/dash/contact-details").await;
    let fetches = app.api.requests_to(&Method::GET, "/contact/details");
    assert_eq!(fetches.len(), 1);
    assert_eq!(fetches[0].token.as_deref(), Some("xyz"));
}

#[tokio::test]
async fn test_no_token_anywhere_fails_without_fake_session() {
    let mut app = TestApp::new();
    app.api
        .reply(Method::POST, "/auth/login", Reply::Json(json!({ "success": true })));
    app.api
        .reply(Method::POST, "/auth/generate-token", Reply::Json(json!({ "ok": true })));

    let resp = app
        .post_form("/login", &[("email", "ada@example.com"), ("password", "secret")])
        .await;

    assert_eq!(resp.status.as_u16(), 401);
    assert!(resp.body.contains("did not issue a session token"));
    assert_eq!(app.get("/dash/home").await.status.as_u16(), 303);
}

#[tokio::test]
async fn test_no_token_starts_unverified_session_when_allowed() {
    let mut app = TestApp::with_config(|config| config.allow_unverified_sessions = true);
    app.api
        .reply(Method::POST, "/auth/login", Reply::Json(json!({ "success": true })));
    app.api
        .reply(Method::POST, "/auth/generate-token", Reply::Status(500, "boom".into()));

    let resp = app
        .post_form("/login", &[("email", "ada@example.com"), ("password", "secret")])
        .await;
    assert_eq!(resp.status.as_u16(), 303);

    let home = app.get("/dash/home").await;
    assert!(home.body.contains("banner-unverified"));

    // Unverified sessions are served demo data.
    let before = app.api.requests().len();
    let page = app.get("/dash/home-hero").await;
    assert_eq!(page.status.as_u16(), 200);
    assert_eq!(app.api.requests().len(), before);
}

// ============================================================================
// Error mapping
// ============================================================================

#[tokio::test]
async fn test_unauthorized_shows_invalid_credentials() {
    let mut app = TestApp::new();
    app.api
        .reply(Method::POST, "/auth/login", Reply::Status(401, "bad".into()));

    let resp = app
        .post_form("/login", &[("email", "ada@example.com"), ("password", "wrong")])
        .await;

    assert_eq!(resp.status.as_u16(), 401);
    assert!(resp.body.contains("Invalid email or password"));
    // Refused credentials are not retried form-encoded.
    assert_eq!(app.api.requests().len(), 1);
}

#[tokio::test]
async fn test_server_error_retries_form_encoded_then_reports() {
    let mut app = TestApp::new();
    app.api
        .reply(Method::POST, "/auth/login", Reply::Status(500, "boom".into()));

    let resp = app
        .post_form("/login", &[("email", "ada@example.com"), ("password", "secret")])
        .await;

    assert_eq!(resp.status.as_u16(), 502);
    assert!(resp.body.contains("Server error, please try again later"));

    let requests = app.api.requests_to(&Method::POST, "/auth/login");
    assert_eq!(requests.len(), 2);
    assert!(matches!(requests[0].body, RequestBody::Json(_)));
    assert!(matches!(requests[1].body, RequestBody::Form(_)));
}

#[tokio::test]
async fn test_form_fallback_can_succeed() {
    let mut app = TestApp::new();
    app.api
        .reply(Method::POST, "/auth/login", Reply::Status(502, "gateway".into()))
        .reply(Method::POST, "/auth/login", Reply::Json(json!({ "data": { "accessToken": "f0rm" } })));

    let resp = app
        .post_form("/login", &[("email", "ada@example.com"), ("password", "secret")])
        .await;

    assert_eq!(resp.status.as_u16(), 303);
    assert_eq!(app.api.requests_to(&Method::POST, "/auth/login").len(), 2);
}

// ============================================================================
// Demo entry and logout
// ============================================================================

#[tokio::test]
async fn test_demo_login_makes_no_request() {
    let mut app = TestApp::new();

    let resp = app.sign_in_demo().await;
    assert_eq!(resp.status.as_u16(), 303);

    let home = app.get("/dash/home").await;
    assert_eq!(home.status.as_u16(), 200);
    assert!(home.body.contains("Demo mode"));
    assert!(app.api.requests().is_empty());
}

#[tokio::test]
async fn test_demo_login_can_be_disabled() {
    let mut app = TestApp::with_config(|config| config.demo_enabled = false);

    assert_eq!(app.sign_in_demo().await.status.as_u16(), 404);
    assert!(!app.get("/").await.body.contains("/login/demo"));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let mut app = TestApp::new();
    app.sign_in_demo().await;

    let resp = app.post_form("/logout", &[]).await;
    assert_eq!(resp.status.as_u16(), 303);
    assert_eq!(resp.location.as_deref(), Some("/?signed_out=1"));

    let login = app.get("/?signed_out=1").await;
    assert_eq!(login.status.as_u16(), 200);
    assert!(login.body.contains("You have been signed out"));

    let guarded = app.get("/dash/home").await;
    assert_eq!(guarded.location.as_deref(), Some("/"));
}

#[tokio::test]
async fn test_signed_in_user_skips_login_page() {
    let mut app = TestApp::new();
    app.sign_in_demo().await;

    let resp = app.get("/").await;
    assert_eq!(resp.status.as_u16(), 303);
    assert_eq!(resp.location.as_deref(), Some("/dash/home"));
}
