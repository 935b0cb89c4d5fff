//! Section editor: load, validate, save and list editing.

use reqwest::Method;
use serde_json::json;

use cms_admin::api::RequestBody;
use cms_admin::services::fixtures;
use cms_admin_core::{AreaKind, ContentArea, ContentRecord};
use cms_admin_integration_tests::{MultipartForm, Reply, TestApp};

const HERO_IMAGE: &str = "https://images.example.com/hero.jpg";

async fn sign_in_live(app: &mut TestApp) {
    app.api.reply(
        Method::POST,
        "/auth/login",
        Reply::Json(json!({ "token": "live-token", "user": { "name": "Ada" } })),
    );
    let resp = app
        .post_form("/login", &[("email", "ada@example.com"), ("password", "secret")])
        .await;
    assert_eq!(resp.status.as_u16(), 303, "{}", resp.body);
}

fn hero_fields<'a>(title: &'a str, action: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("f.title", title),
        ("f.subtitle", "Short and sweet"),
        ("f.backgroundImage", HERO_IMAGE),
        ("f.ctaText", "Join us"),
        ("f.ctaLink", "/volunteer"),
        ("action", action),
    ]
}

// ============================================================================
// Demo mode
// ============================================================================

#[tokio::test]
async fn test_demo_edit_page_shows_fixture() {
    let mut app = TestApp::new();
    app.sign_in_demo().await;

    let resp = app.get("/dash/home-hero").await;

    assert_eq!(resp.status.as_u16(), 200);
    assert!(resp.body.contains("Building brighter futures together"));
    assert!(resp.body.contains("name=\"f.backgroundImage__file\""));
    assert!(app.api.requests().is_empty());
}

#[tokio::test]
async fn test_demo_save_succeeds_without_network() {
    let mut app = TestApp::new();
    app.sign_in_demo().await;

    let resp = app
        .post_multipart("/dash/home-hero", &hero_fields("New headline", "save"))
        .await;

    assert_eq!(resp.status.as_u16(), 200);
    assert!(resp.body.contains("toast-success"));
    assert!(resp.body.contains("Home Hero saved (demo data, nothing was sent to the website)"));
    assert!(resp.body.contains("value=\"New headline\""));
    assert!(app.api.requests().is_empty());
}

#[tokio::test]
async fn test_every_demo_section_saves_without_network() {
    let mut app = TestApp::new();
    app.sign_in_demo().await;

    for area in ContentArea::of_kind(AreaKind::Section) {
        let schema = area.section_schema().expect("section schema");
        let record = ContentRecord::from_json(&schema, &fixtures::demo_content(area));
        let form = MultipartForm::new()
            .record(&schema, &record)
            .text("action", "save");

        let resp = app
            .post_multipart_form(&format!("/dash/{}", area.slug()), form)
            .await;

        assert_eq!(resp.status.as_u16(), 200, "{area:?}: {}", resp.body);
        assert!(resp.body.contains("toast-success"), "{area:?}");
        assert!(
            resp.body
                .contains(&format!("{} saved (demo data, nothing was sent", area.title())),
            "{area:?}"
        );
    }
    assert!(app.api.requests().is_empty());
}

#[tokio::test]
async fn test_every_demo_section_renders() {
    let mut app = TestApp::new();
    app.sign_in_demo().await;

    for area in cms_admin_core::ContentArea::of_kind(cms_admin_core::AreaKind::Section) {
        let resp = app.get(&format!("/dash/{}", area.slug())).await;
        assert_eq!(resp.status.as_u16(), 200, "{area:?}");
        assert!(resp.body.contains(area.title()), "{area:?}");
        // Fixtures are valid, so the save button starts enabled.
        assert!(
            resp.body.contains("value=\"save\" class=\"primary\">"),
            "{area:?}"
        );
    }
    assert!(app.api.requests().is_empty());
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_invalid_save_is_blocked() {
    let mut app = TestApp::new();
    sign_in_live(&mut app).await;

    let resp = app
        .post_multipart("/dash/home-hero", &hero_fields("   ", "save"))
        .await;

    assert_eq!(resp.status.as_u16(), 422);
    assert!(resp.body.contains("Headline is required"));
    assert!(resp.body.contains("Please fix the highlighted fields"));
    assert!(resp.body.contains(" disabled>Save</button>"));
    assert!(app.api.requests_to(&Method::PUT, "/home/hero").is_empty());
}

#[tokio::test]
async fn test_too_long_value_is_blocked() {
    let mut app = TestApp::new();
    app.sign_in_demo().await;
    let long = "x".repeat(500);

    let resp = app
        .post_multipart("/dash/home-hero", &hero_fields(&long, "save"))
        .await;

    assert_eq!(resp.status.as_u16(), 422);
    assert!(resp.body.contains("Headline must be at most"));
}

#[tokio::test]
async fn test_check_reports_without_saving() {
    let mut app = TestApp::new();
    sign_in_live(&mut app).await;

    let resp = app
        .post_multipart("/dash/home-hero", &hero_fields("", "check"))
        .await;
    assert_eq!(resp.status.as_u16(), 200);
    assert!(resp.body.contains("Headline is required"));

    let resp = app
        .post_multipart("/dash/home-hero", &hero_fields("Fine", "check"))
        .await;
    assert!(resp.body.contains("Everything looks good"));
    assert!(app.api.requests_to(&Method::PUT, "/home/hero").is_empty());
}

#[tokio::test]
async fn test_unknown_action_is_rejected() {
    let mut app = TestApp::new();
    app.sign_in_demo().await;

    let resp = app
        .post_multipart("/dash/home-hero", &hero_fields("Hi", "publish"))
        .await;

    assert_eq!(resp.status.as_u16(), 400);
}

// ============================================================================
// Live load and save
// ============================================================================

#[tokio::test]
async fn test_live_load_accepts_every_envelope() {
    let mut app = TestApp::new();
    sign_in_live(&mut app).await;
    app.api
        .reply(Method::GET, "/home/hero", Reply::Json(json!({ "data": { "title": "From data" } })))
        .reply(
            Method::GET,
            "/home/hero",
            Reply::Json(json!({ "success": true, "data": { "title": "From success" } })),
        )
        .reply(Method::GET, "/home/hero", Reply::Json(json!({ "title": "Bare" })));

    for expected in ["From data", "From success", "Bare"] {
        let resp = app.get("/dash/home-hero").await;
        assert_eq!(resp.status.as_u16(), 200);
        assert!(resp.body.contains(&format!("value=\"{expected}\"")), "{expected}");
    }
}

#[tokio::test]
async fn test_live_load_failure_keeps_page_usable() {
    let mut app = TestApp::new();
    sign_in_live(&mut app).await;
    app.api
        .reply(Method::GET, "/home/hero", Reply::Status(500, "boom".into()));

    let resp = app.get("/dash/home-hero").await;

    assert_eq!(resp.status.as_u16(), 200);
    assert!(resp.body.contains("Server error, please try again later"));
    assert!(resp.body.contains("name=\"f.title\""));
}

#[tokio::test]
async fn test_load_failure_replaces_pending_toast() {
    let mut app = TestApp::new();
    sign_in_live(&mut app).await;
    app.api
        .reply(Method::GET, "/home/hero", Reply::Status(500, "boom".into()));

    let resp = app.get("/dash/home-hero").await;
    assert!(resp.body.contains("Server error, please try again later"));
    assert!(!resp.body.contains("Welcome back"));

    // The sign-in toast was consumed with the failed page.
    let dashboard = app.get("/dash/home").await;
    assert_eq!(dashboard.status.as_u16(), 200);
    assert!(!dashboard.body.contains("Welcome back"));
}

#[tokio::test]
async fn test_refused_token_on_load_signs_out() {
    let mut app = TestApp::new();
    sign_in_live(&mut app).await;
    app.api
        .reply(Method::GET, "/home/hero", Reply::Status(401, "token expired".into()));

    let resp = app.get("/dash/home-hero").await;
    assert_eq!(resp.status.as_u16(), 303);
    assert_eq!(resp.location.as_deref(), Some("/"));

    let guarded = app.get("/dash/home").await;
    assert_eq!(guarded.status.as_u16(), 303);
    assert_eq!(guarded.location.as_deref(), Some("/"));

    let login = app.get("/").await;
    assert_eq!(login.status.as_u16(), 200);
    assert!(login.body.contains("Your session has expired, please sign in again"));
}

#[tokio::test]
async fn test_refused_token_on_save_signs_out() {
    let mut app = TestApp::new();
    sign_in_live(&mut app).await;
    app.api
        .reply(Method::PUT, "/home/hero", Reply::Status(403, "forbidden".into()));

    let resp = app
        .post_multipart("/dash/home-hero", &hero_fields("New headline", "save"))
        .await;
    assert_eq!(resp.status.as_u16(), 303);
    assert_eq!(resp.location.as_deref(), Some("/"));
    assert_eq!(app.api.requests_to(&Method::PUT, "/home/hero").len(), 1);

    let again = app.get("/dash/home-hero").await;
    assert_eq!(again.status.as_u16(), 303);
    assert!(app.api.requests_to(&Method::GET, "/home/hero").is_empty());
}

#[tokio::test]
async fn test_section_page_ignores_listing_query() {
    let mut app = TestApp::new();
    app.sign_in_demo().await;

    let resp = app.get("/dash/home-hero?sort=title&dir=DESC&page=x").await;

    assert_eq!(resp.status.as_u16(), 200);
    assert!(resp.body.contains("Building brighter futures together"));
}

#[tokio::test]
async fn test_live_save_sends_update() {
    let mut app = TestApp::new();
    sign_in_live(&mut app).await;
    app.api.reply(
        Method::PUT,
        "/testimonials",
        Reply::Json(json!({ "success": true, "data": {} })),
    );

    let resp = app
        .post_multipart(
            "/dash/testimonials",
            &[
                ("f.title", "Kind words"),
                ("l.testimonials.0.name", "Priya"),
                ("l.testimonials.0.message", "Wonderful people"),
                ("l.testimonials.0.rating", "5"),
                ("l.testimonials.0.__extra", "{\"featured\":true}"),
                ("action", "save"),
            ],
        )
        .await;

    assert_eq!(resp.status.as_u16(), 200, "{}", resp.body);
    assert!(resp.body.contains("Testimonials saved"));

    let updates = app.api.requests_to(&Method::PUT, "/testimonials");
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].token.as_deref(), Some("live-token"));
    let RequestBody::Json(body) = &updates[0].body else {
        panic!("expected a JSON body");
    };
    assert_eq!(body["title"], "Kind words");
    assert_eq!(body["testimonials"][0]["name"], "Priya");
    assert_eq!(body["testimonials"][0]["featured"], true);
}

#[tokio::test]
async fn test_live_save_failure_keeps_form_state() {
    let mut app = TestApp::new();
    sign_in_live(&mut app).await;
    app.api
        .reply(Method::PUT, "/home/hero", Reply::Status(503, "down".into()));

    let resp = app
        .post_multipart("/dash/home-hero", &hero_fields("Kept headline", "save"))
        .await;

    assert_eq!(resp.status.as_u16(), 502);
    assert!(resp.body.contains("Server error, please try again later"));
    assert!(resp.body.contains("value=\"Kept headline\""));
}

#[tokio::test]
async fn test_live_save_rejected_envelope_shows_message() {
    let mut app = TestApp::new();
    sign_in_live(&mut app).await;
    app.api.reply(
        Method::PUT,
        "/home/hero",
        Reply::Json(json!({ "success": false, "message": "Headline already used" })),
    );

    let resp = app
        .post_multipart("/dash/home-hero", &hero_fields("Again", "save"))
        .await;

    assert_eq!(resp.status.as_u16(), 502);
    assert!(resp.body.contains("Headline already used"));
}

// ============================================================================
// List editing and uploads
// ============================================================================

#[tokio::test]
async fn test_add_and_remove_items_without_saving() {
    let mut app = TestApp::new();
    app.sign_in_demo().await;
    let id = "4f1c2b7e-8d2a-4c55-9d3e-2f6a1b0c9e11";

    let added = app
        .post_multipart(
            "/dash/testimonials",
            &[
                ("f.title", "Kind words"),
                ("l.testimonials.0.__id", id),
                ("l.testimonials.0.name", "Priya"),
                ("l.testimonials.0.message", "Wonderful"),
                ("action", "add:testimonials"),
            ],
        )
        .await;
    assert_eq!(added.status.as_u16(), 200);
    assert!(added.body.contains("Testimonial added"));
    assert!(added.body.contains("name=\"l.testimonials.1.name\""));

    let remove = format!("remove:testimonials:{id}");
    let removed = app
        .post_multipart(
            "/dash/testimonials",
            &[
                ("f.title", "Kind words"),
                ("l.testimonials.0.__id", id),
                ("l.testimonials.0.name", "Priya"),
                ("l.testimonials.0.message", "Wonderful"),
                ("action", remove.as_str()),
            ],
        )
        .await;
    assert_eq!(removed.status.as_u16(), 200);
    assert!(removed.body.contains("Testimonial removed"));
    assert!(!removed.body.contains("value=\"Priya\""));
    assert!(app.api.requests().is_empty());
}

#[tokio::test]
async fn test_uploaded_image_becomes_data_uri() {
    let mut app = TestApp::new();
    app.sign_in_demo().await;

    let form = hero_fields("With upload", "save")
        .into_iter()
        .fold(MultipartForm::new(), |form, (name, value)| form.text(name, value))
        .file("f.backgroundImage__file", "hero.png", "image/png", b"\x89PNG");
    let resp = app.post_multipart_form("/dash/home-hero", form).await;

    assert_eq!(resp.status.as_u16(), 200, "{}", resp.body);
    assert!(resp.body.contains("data:image/png;base64,iVBORw=="));
}

#[tokio::test]
async fn test_non_image_upload_is_refused() {
    let mut app = TestApp::new();
    app.sign_in_demo().await;

    let form = hero_fields("With upload", "save")
        .into_iter()
        .fold(MultipartForm::new(), |form, (name, value)| form.text(name, value))
        .file("f.backgroundImage__file", "notes.txt", "text/plain", b"hello");
    let resp = app.post_multipart_form("/dash/home-hero", form).await;

    assert_eq!(resp.status.as_u16(), 422);
    assert!(resp.body.contains("only image files can be uploaded"));
}

#[tokio::test]
async fn test_list_of_inline_images_can_be_resubmitted() {
    const MAX_IMAGE: usize = 1024 * 1024;
    let mut app = TestApp::with_config(|config| config.max_image_bytes = MAX_IMAGE);
    app.sign_in_demo().await;

    // Base64 of a near-cap image, as the hidden input sends it back.
    let inline = format!("data:image/png;base64,{}", "A".repeat(MAX_IMAGE.div_ceil(3) * 4));
    let mut form = MultipartForm::new().text("f.title", "Voices");
    for index in 0..7 {
        let prefix = format!("l.testimonials.{index}");
        form = form
            .text(&format!("{prefix}.name"), "Volunteer")
            .text(&format!("{prefix}.message"), "Great experience")
            .text(&format!("{prefix}.image"), &inline)
            .text(&format!("{prefix}.rating"), "5");
    }
    let resp = app
        .post_multipart_form("/dash/testimonials", form.text("action", "add:testimonials"))
        .await;

    assert_eq!(resp.status.as_u16(), 200);
    assert!(resp.body.contains("Testimonial added"));
}
