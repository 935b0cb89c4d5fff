//! Route guard, fallback and plumbing.

use cms_admin_integration_tests::TestApp;

#[tokio::test]
async fn test_guard_redirects_to_login() {
    let mut app = TestApp::new();

    for path in ["/dash", "/dash/home", "/dash/home-hero", "/dash/subscribers"] {
        let resp = app.get(path).await;
        assert_eq!(resp.status.as_u16(), 303, "{path}");
        let expected = if path == "/dash" { "/dash/home" } else { "/" };
        assert_eq!(resp.location.as_deref(), Some(expected), "{path}");
    }
}

#[tokio::test]
async fn test_guard_rejects_unsigned_save() {
    let mut app = TestApp::new();

    let resp = app
        .post_multipart("/dash/home-hero", &[("f.title", "Hi"), ("action", "save")])
        .await;

    assert_eq!(resp.status.as_u16(), 303);
    assert_eq!(resp.location.as_deref(), Some("/"));
    assert!(app.api.requests().is_empty());
}

#[tokio::test]
async fn test_unknown_paths_render_not_found() {
    let mut app = TestApp::new();
    assert_eq!(app.get("/nowhere").await.status.as_u16(), 404);

    app.sign_in_demo().await;
    let resp = app.get("/dash/no-such-area").await;
    assert_eq!(resp.status.as_u16(), 404);
    assert!(resp.body.contains("Page not found"));
}

#[tokio::test]
async fn test_health_and_request_id() {
    let mut app = TestApp::new();

    let resp = app.get("/health").await;

    assert_eq!(resp.status.as_u16(), 200);
    assert_eq!(resp.body, "ok");
    assert!(resp.request_id.is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn test_upstream_request_id_is_echoed() {
    let mut app = TestApp::new();

    let resp = app
        .send(
            axum::http::Request::get("/health")
                .header("x-request-id", "edge-42")
                .body(axum::body::Body::empty())
                .expect("valid request"),
        )
        .await;

    assert_eq!(resp.request_id.as_deref(), Some("edge-42"));
}

#[tokio::test]
async fn test_login_page_renders() {
    let mut app = TestApp::new();

    let resp = app.get("/").await;

    assert_eq!(resp.status.as_u16(), 200);
    assert!(resp.body.contains("action=\"/login\""));
    assert!(resp.body.contains("action=\"/login/demo\""));
}
