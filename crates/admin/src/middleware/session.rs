//! Session middleware and the per-request session store.
//!
//! Sessions live in an in-memory [`MokaStore`] (the backend owns all durable
//! state) with stricter cookie settings: SameSite=Strict, HTTP-only, expiry
//! on inactivity.

use axum::{extract::FromRequestParts, http::StatusCode, http::request::Parts};
use tower_sessions::{Expiry, Session, SessionManagerLayer};

use super::MokaStore;
use crate::config::AdminConfig;
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::models::{AdminSession, SessionCredential, SessionUser, Toast, session_keys};

/// Session cookie name for admin.
pub const SESSION_COOKIE_NAME: &str = "cms_admin_session";

type SessionResult<T> = Result<T, tower_sessions::session::Error>;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &AdminConfig) -> SessionManagerLayer<MokaStore> {
    SessionManagerLayer::new(MokaStore::new())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::hours(config.session_ttl_hours),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}

/// Typed access to the staff session.
///
/// Holds the credential and user halves of an [`AdminSession`] plus a
/// pending flash [`Toast`].
#[derive(Debug, Clone)]
pub struct SessionStore(Session);

impl SessionStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// The signed-in session, if any.
    ///
    /// Both the credential and the user profile must be present.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read.
    pub async fn auth(&self) -> SessionResult<Option<AdminSession>> {
        let Some(credential) = self.0.get::<SessionCredential>(session_keys::TOKEN).await? else {
            return Ok(None);
        };
        let user = self.0.get::<SessionUser>(session_keys::USER).await?;
        Ok(user.map(|user| AdminSession::from_parts(credential, user)))
    }

    /// Store the session credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn set_token(&self, credential: &SessionCredential) -> SessionResult<()> {
        self.0.insert(session_keys::TOKEN, credential).await
    }

    /// Store the signed-in user profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn set_user(&self, user: &SessionUser) -> SessionResult<()> {
        self.0.insert(session_keys::USER, user).await
    }

    /// Store a freshly created session, rotating the session id.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn sign_in(&self, auth: &AdminSession) -> SessionResult<()> {
        self.0.cycle_id().await?;
        self.set_token(&auth.credential()).await?;
        self.set_user(&auth.user).await?;
        set_sentry_user(&auth.user.id, &auth.user.email);
        Ok(())
    }

    /// Drop an identity the backend no longer accepts.
    ///
    /// The session id is rotated and `toast` is kept for the login page.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn expire(&self, toast: Toast) -> SessionResult<()> {
        self.0.remove_value(session_keys::TOKEN).await?;
        self.0.remove_value(session_keys::USER).await?;
        self.0.cycle_id().await?;
        clear_sentry_user();
        self.push_toast(toast).await
    }

    /// Sign out: drop all session data and the session itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be deleted.
    pub async fn clear(&self) -> SessionResult<()> {
        self.0.flush().await?;
        clear_sentry_user();
        Ok(())
    }

    /// Queue a toast for the next rendered page.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn push_toast(&self, toast: Toast) -> SessionResult<()> {
        self.0.insert(session_keys::TOAST, toast).await
    }

    /// Take the pending toast, if any. Each toast is returned once.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn take_toast(&self) -> SessionResult<Option<Toast>> {
        self.0.remove(session_keys::TOAST).await
    }
}

impl<S> FromRequestParts<S> for SessionStore
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(Self)
            .ok_or((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Session layer is not installed",
            ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use cms_admin_core::SessionToken;

    use super::*;
    use crate::models::ToastKind;

    fn store() -> SessionStore {
        SessionStore::new(Session::new(None, Arc::new(MokaStore::new()), None))
    }

    fn verified() -> AdminSession {
        AdminSession::verified(
            SessionToken::parse("abc").unwrap(),
            SessionUser::from_email("ada@example.com"),
        )
    }

    #[tokio::test]
    async fn test_sign_in_and_clear() {
        let store = store();
        assert!(store.auth().await.unwrap().is_none());

        store.sign_in(&verified()).await.unwrap();
        assert_eq!(store.auth().await.unwrap().unwrap().token.expose(), "abc");

        store.clear().await.unwrap();
        assert!(store.auth().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_auth_needs_token_and_user() {
        let store = store();
        let auth = verified();

        store.set_token(&auth.credential()).await.unwrap();
        assert!(store.auth().await.unwrap().is_none());

        store.set_user(&auth.user).await.unwrap();
        let read = store.auth().await.unwrap().unwrap();
        assert_eq!(read.token.expose(), "abc");
        assert_eq!(read.user.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_expire_keeps_only_the_toast() {
        let store = store();
        store.sign_in(&verified()).await.unwrap();

        store.expire(Toast::error("Session expired")).await.unwrap();

        assert!(store.auth().await.unwrap().is_none());
        let toast = store.take_toast().await.unwrap().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Session expired");
    }

    #[tokio::test]
    async fn test_toast_is_read_once() {
        let store = store();
        store.push_toast(Toast::success("Saved")).await.unwrap();

        let toast = store.take_toast().await.unwrap().unwrap();
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.message, "Saved");
        assert!(store.take_toast().await.unwrap().is_none());
    }
}
