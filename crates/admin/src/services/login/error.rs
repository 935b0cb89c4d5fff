//! Login error types.

use thiserror::Error;

use crate::api::ApiError;

/// Errors that can occur while signing in.
#[derive(Debug, Error)]
pub enum LoginError {
    /// Email or password left blank.
    #[error("Email and password are required")]
    MissingCredentials,

    /// Email is not shaped like an address.
    #[error("Enter a valid email address ({0})")]
    InvalidEmail(#[from] cms_admin_core::EmailError),

    /// Backend refused the credentials.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Backend accepted the exchange but issued no token.
    #[error("Login failed: the server did not issue a session token")]
    NoTokenIssued,

    /// Backend could not be reached or failed.
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl LoginError {
    /// Message safe to show on the login page.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            other => other.to_string(),
        }
    }

    /// Whether the request was refused before contacting the backend.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::MissingCredentials | Self::InvalidEmail(_))
    }
}
