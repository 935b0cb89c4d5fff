//! Staff login against the CMS backend.
//!
//! The exchange, in order:
//!
//! 1. Local validation; nothing is sent when it fails.
//! 2. JSON `POST /auth/login`, retried once form-encoded when the failure is
//!    anything other than a credential rejection.
//! 3. `POST /auth/generate-token` when the login response carried no token.
//! 4. An unverified (demo-only) session, if enabled, when no token was issued.

mod error;

pub use error::LoginError;

use secrecy::SecretString;
use serde_json::Value;
use tracing::instrument;

use cms_admin_core::{Email, SessionToken};

use crate::api::{ApiError, CmsApi, Credentials, LoginPayload};
use crate::models::{AdminSession, SessionUser};

/// Login service.
pub struct LoginService<'a> {
    api: &'a dyn CmsApi,
    allow_unverified: bool,
}

impl<'a> LoginService<'a> {
    /// Create a new login service.
    #[must_use]
    pub const fn new(api: &'a dyn CmsApi, allow_unverified: bool) -> Self {
        Self {
            api,
            allow_unverified,
        }
    }

    /// Validate the form input without touching the network.
    ///
    /// # Errors
    ///
    /// Returns `LoginError::MissingCredentials` or `LoginError::InvalidEmail`.
    pub fn validate(email: &str, password: &str) -> Result<Credentials, LoginError> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(LoginError::MissingCredentials);
        }
        let email = Email::parse(email)?;
        Ok(Credentials {
            email,
            password: SecretString::from(password.to_string()),
        })
    }

    /// Sign in and build the session to store.
    ///
    /// # Errors
    ///
    /// Returns `LoginError` when validation fails, the backend refuses the
    /// credentials, the backend fails, or no token is issued.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminSession, LoginError> {
        let credentials = Self::validate(email, password)?;

        let body = self.request_login(&credentials).await?;
        let payload = LoginPayload::from_body(&body);
        let fallback_user = payload
            .user
            .unwrap_or_else(|| SessionUser::from_email(credentials.email.as_str()));

        if let Some(token) = payload.token {
            tracing::info!("Login succeeded");
            return Ok(AdminSession::verified(token, fallback_user));
        }

        tracing::info!("Login response carried no token, requesting one");
        match self.api.generate_token(&credentials).await {
            Ok(body) => {
                let generated = LoginPayload::from_body(&body);
                if let Some(token) = generated.token {
                    tracing::info!("Token generated");
                    let user = generated.user.unwrap_or(fallback_user);
                    return Ok(AdminSession::verified(token, user));
                }
            }
            Err(ApiError::Unauthorized) => return Err(LoginError::InvalidCredentials),
            Err(err) => tracing::warn!(error = %err, "Token generation failed"),
        }

        if self.allow_unverified {
            tracing::warn!("No token issued, starting an unverified session");
            let token = SessionToken::parse(&format!(
                "unverified-{}",
                chrono::Utc::now().timestamp_millis()
            ))
            .map_err(|_| LoginError::NoTokenIssued)?;
            return Ok(AdminSession::unverified(token, fallback_user));
        }

        Err(LoginError::NoTokenIssued)
    }

    /// JSON login, with a single form-encoded retry.
    async fn request_login(&self, credentials: &Credentials) -> Result<Value, LoginError> {
        match self.api.login(credentials).await {
            Ok(body) => Ok(body),
            Err(err) if err.is_rejection() => Err(rejection(err)),
            Err(err) => {
                tracing::warn!(error = %err, "JSON login failed, retrying form-encoded");
                self.api
                    .login_form(credentials)
                    .await
                    .map_err(|err| if err.is_rejection() { rejection(err) } else { err.into() })
            }
        }
    }
}

fn rejection(err: ApiError) -> LoginError {
    match err {
        ApiError::Unauthorized => LoginError::InvalidCredentials,
        other => LoginError::Api(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_both_fields() {
        assert!(matches!(
            LoginService::validate("", "pw"),
            Err(LoginError::MissingCredentials)
        ));
        assert!(matches!(
            LoginService::validate("ada@example.com", "   "),
            Err(LoginError::MissingCredentials)
        ));
    }

    #[test]
    fn test_validate_email_shape() {
        assert!(matches!(
            LoginService::validate("ada.example.com", "pw"),
            Err(LoginError::InvalidEmail(_))
        ));
        let credentials = LoginService::validate(" ada@example.com ", "pw").unwrap();
        assert_eq!(credentials.email.as_str(), "ada@example.com");
    }
}
