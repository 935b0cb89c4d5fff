//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, response::Redirect, routing::get};
use tracing::instrument;

use cms_admin_core::{AreaKind, ContentArea};

use super::Layout;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireSession, SessionStore};
use crate::state::AppState;

/// Card linking to one content area.
#[derive(Debug, Clone)]
pub struct AreaCard {
    pub href: String,
    pub title: &'static str,
    pub description: &'static str,
}

impl AreaCard {
    fn new(area: ContentArea) -> Self {
        Self {
            href: format!("/dash/{}", area.slug()),
            title: area.title(),
            description: describe(area),
        }
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub layout: Layout,
    pub content_cards: Vec<AreaCard>,
    pub inbox_cards: Vec<AreaCard>,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dash", get(|| async { Redirect::to("/dash/home") }))
        .route("/dash/home", get(home))
}

/// Dashboard home.
///
/// GET /dash/home
#[instrument(skip_all)]
async fn home(
    RequireSession(auth): RequireSession,
    store: SessionStore,
) -> Result<DashboardTemplate, AppError> {
    let toast = store.take_toast().await?;
    Ok(DashboardTemplate {
        layout: Layout::new(&auth, None, toast),
        content_cards: ContentArea::of_kind(AreaKind::Section).map(AreaCard::new).collect(),
        inbox_cards: ContentArea::of_kind(AreaKind::Listing).map(AreaCard::new).collect(),
    })
}

const fn describe(area: ContentArea) -> &'static str {
    match area {
        ContentArea::HomeHero => "Headline, background image and call to action",
        ContentArea::AboutUs => "Story, mission, vision and key points",
        ContentArea::Statistics => "Impact figures on the home page",
        ContentArea::Testimonials => "Quotes from volunteers and partners",
        ContentArea::Services => "Programmes and what they offer",
        ContentArea::Navigation => "Header and footer menu links",
        ContentArea::Blogs => "News posts",
        ContentArea::Stories => "Stories of change",
        ContentArea::Events => "Upcoming events",
        ContentArea::Documents => "Reports, policies and downloads",
        ContentArea::ContactDetails => "Email, phone, address and hours",
        ContentArea::JobApplications => "Applications received through the careers page",
        ContentArea::Subscribers => "Newsletter sign-ups",
        ContentArea::ContactQueries => "Messages sent through the contact form",
    }
}
