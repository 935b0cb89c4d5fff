//! Authentication route handlers for admin.
//!
//! Email/password login against the CMS backend, the demo entry point and
//! logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::{OptionalSession, SessionStore};
use crate::models::{AdminSession, Toast, Verification};
use crate::services::{LoginError, LoginService, fixtures};
use crate::state::AppState;

/// Where signed-in users land.
pub const HOME_PATH: &str = "/dash/home";

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginPageTemplate {
    pub toast: Option<Toast>,
    pub email: String,
    pub demo_enabled: bool,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Query parameters of the login page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub signed_out: Option<String>,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(login_page))
        .route("/login", get(|| async { Redirect::to("/") }).post(login))
        .route("/login/demo", post(demo_login))
        .route("/logout", post(logout))
}

/// Render the login page.
///
/// GET /
async fn login_page(
    State(state): State<AppState>,
    OptionalSession(auth): OptionalSession,
    store: SessionStore,
    Query(query): Query<LoginQuery>,
) -> Result<Response, AppError> {
    if auth.is_some() {
        return Ok(Redirect::to(HOME_PATH).into_response());
    }

    let toast = match store.take_toast().await? {
        Some(toast) => Some(toast),
        None => query
            .signed_out
            .map(|_| Toast::info("You have been signed out")),
    };

    Ok(LoginPageTemplate {
        toast,
        email: String::new(),
        demo_enabled: state.config().demo_enabled,
    }
    .into_response())
}

/// Sign in with email and password.
///
/// POST /login
#[instrument(skip_all)]
async fn login(
    State(state): State<AppState>,
    store: SessionStore,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let service = LoginService::new(state.api(), state.config().allow_unverified_sessions);

    match service.login(&form.email, &form.password).await {
        Ok(auth) => {
            let greeting = if auth.verification == Verification::Unverified {
                Toast::info(
                    "Signed in without a session token. Showing demo data; changes are not saved.",
                )
            } else {
                Toast::success(format!("Welcome back, {}", auth.user.name))
            };
            start_session(&store, &auth, greeting).await
        }
        Err(err) => {
            let status = login_error_status(&err);
            if err.is_validation() {
                tracing::debug!(error = %err, "Login form rejected");
            } else {
                tracing::info!(error = %err, "Login failed");
            }
            Ok((
                status,
                LoginPageTemplate {
                    toast: Some(Toast::error(err.user_message())),
                    email: form.email.trim().to_string(),
                    demo_enabled: state.config().demo_enabled,
                },
            )
                .into_response())
        }
    }
}

/// Start a demo session without contacting the backend.
///
/// POST /login/demo
#[instrument(skip_all)]
async fn demo_login(State(state): State<AppState>, store: SessionStore) -> Result<Response, AppError> {
    if !state.config().demo_enabled {
        return Err(AppError::NotFound("demo mode is disabled".to_string()));
    }
    let auth = AdminSession::demo(fixtures::demo_user());
    start_session(
        &store,
        &auth,
        Toast::info("Exploring with demo data. Changes are not sent to the website."),
    )
    .await
}

/// Logout and clear session.
///
/// POST /logout
async fn logout(store: SessionStore) -> Result<Redirect, AppError> {
    store.clear().await?;
    Ok(Redirect::to("/?signed_out=1"))
}

async fn start_session(
    store: &SessionStore,
    auth: &AdminSession,
    toast: Toast,
) -> Result<Response, AppError> {
    store.sign_in(auth).await?;
    store.push_toast(toast).await?;
    Ok(Redirect::to(HOME_PATH).into_response())
}

const fn login_error_status(err: &LoginError) -> StatusCode {
    match err {
        LoginError::MissingCredentials | LoginError::InvalidEmail(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        LoginError::InvalidCredentials | LoginError::NoTokenIssued => StatusCode::UNAUTHORIZED,
        LoginError::Api(_) => StatusCode::BAD_GATEWAY,
    }
}
