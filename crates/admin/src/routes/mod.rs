//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Login page (redirects to /dash/home when signed in)
//! GET  /login            - Redirect to /
//! POST /login            - Sign in with email and password
//! POST /login/demo       - Start a demo session
//! POST /logout           - Sign out
//!
//! GET  /dash             - Redirect to /dash/home
//! GET  /dash/home        - Dashboard home
//! GET  /dash/{area}      - Section editor or record listing
//! POST /dash/{area}      - Save or check a section, or add/remove a list item
//!
//! *                      - Not found page
//! ```

pub mod auth;
pub mod dashboard;
pub mod listings;
pub mod not_found;
pub mod sections;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::Uri,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};

use cms_admin_core::{AreaKind, ContentArea};

use crate::components::TableQuery;
use crate::error::AppError;
use crate::middleware::{RequireSession, SessionStore};
use crate::models::{AdminSession, Toast};
use crate::state::AppState;

/// Build the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(dashboard::router())
        .route("/dash/{area}", get(area_page).post(sections::save))
        .fallback(not_found::not_found)
}

/// Dispatch `/dash/{area}` to the section editor or the listing page.
///
/// Only listings read the query string; section pages ignore it.
async fn area_page(
    State(state): State<AppState>,
    RequireSession(auth): RequireSession,
    store: SessionStore,
    Path(slug): Path<String>,
    uri: Uri,
) -> Result<Response, AppError> {
    let Some(area) = ContentArea::from_slug(&slug) else {
        return Ok(not_found::page().into_response());
    };
    match area.kind() {
        AreaKind::Section => sections::edit(&state, auth, &store, area).await,
        AreaKind::Listing => {
            let Query(query) = Query::<TableQuery>::try_from_uri(&uri)
                .map_err(|err| AppError::BadRequest(err.body_text()))?;
            listings::index(&state, auth, &store, area, &query).await
        }
    }
}

/// Sign out a session whose token the backend refused and send the user to
/// the login page.
async fn expire_session(store: &SessionStore) -> Result<Response, AppError> {
    store
        .expire(Toast::error("Your session has expired, please sign in again"))
        .await?;
    Ok(Redirect::to("/").into_response())
}

/// Signed-in user for templates.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Sidebar link.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub href: String,
    pub title: &'static str,
    pub active: bool,
}

/// Shared chrome of every signed-in page.
#[derive(Debug, Clone)]
pub struct Layout {
    pub user: AdminUserView,
    /// `live`, `demo` or `unverified`.
    pub mode: &'static str,
    pub content_nav: Vec<NavLink>,
    pub inbox_nav: Vec<NavLink>,
    pub toast: Option<Toast>,
}

impl Layout {
    /// Build the layout for `auth` with `active` highlighted in the sidebar.
    #[must_use]
    pub fn new(auth: &AdminSession, active: Option<ContentArea>, toast: Option<Toast>) -> Self {
        let nav = |kind| {
            ContentArea::of_kind(kind)
                .map(|area| NavLink {
                    href: format!("/dash/{}", area.slug()),
                    title: area.title(),
                    active: active == Some(area),
                })
                .collect()
        };
        Self {
            user: AdminUserView {
                name: auth.user.name.clone(),
                email: auth.user.email.clone(),
                role: auth.user.role.label().to_string(),
            },
            mode: auth.mode_label(),
            content_nav: nav(AreaKind::Section),
            inbox_nav: nav(AreaKind::Listing),
            toast,
        }
    }

    /// Whether pages show fixture data.
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.mode != "live"
    }
}
