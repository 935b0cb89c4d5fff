//! Route guard extractors.
//!
//! Every authenticated page takes [`RequireSession`]; a request without a
//! session token is redirected to the login page at `/`.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use super::SessionStore;
use crate::models::AdminSession;

/// Path of the login page.
pub const LOGIN_PATH: &str = "/";

/// Extractor that requires a signed-in session.
///
/// If nobody is signed in, returns a redirect to the login page for HTML
/// requests, or 401 Unauthorized for API requests.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireSession(auth): RequireSession,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", auth.user.name)
/// }
/// ```
pub struct RequireSession(pub AdminSession);

/// Error returned when a session is required but missing.
pub enum SessionRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

async fn current_session(parts: &Parts) -> Option<AdminSession> {
    let session = parts.extensions.get::<Session>()?.clone();
    SessionStore::new(session).auth().await.ok().flatten()
}

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = SessionRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_session(parts).await.map(Self).ok_or_else(|| {
            if parts.uri.path().starts_with("/api/") {
                SessionRejection::Unauthorized
            } else {
                SessionRejection::RedirectToLogin
            }
        })
    }
}

/// Extractor that optionally gets the signed-in session.
///
/// Unlike `RequireSession`, this never rejects the request.
pub struct OptionalSession(pub Option<AdminSession>);

impl<S> FromRequestParts<S> for OptionalSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(current_session(parts).await))
    }
}
