//! Login diagnostics against the configured CMS API.
//!
//! # Usage
//!
//! ```bash
//! CMS_PASSWORD=... cms-cli login -e editor@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `CMS_API_URL` - Base URL of the CMS API
//! - `CMS_API_KEY` - Optional static API key
//! - `CMS_API_TIMEOUT_SECS` - Request timeout (default 15)

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use cms_admin::api::{ApiError, CmsClient};
use cms_admin::config::{CmsApiConfig, ConfigError};
use cms_admin::models::Verification;
use cms_admin::services::{LoginError, LoginService};

/// Errors that can occur during a login check.
#[derive(Debug, Error)]
pub enum LoginCheckError {
    /// API configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client could not be built.
    #[error("Client error: {0}")]
    Client(#[from] ApiError),

    /// The login flow failed.
    #[error("{0}")]
    Login(#[from] LoginError),
}

/// Run the admin login flow and log the outcome. The token is never logged.
///
/// # Errors
///
/// Returns `LoginCheckError` if configuration is invalid or the login fails.
pub async fn run(
    email: &str,
    password: &SecretString,
    allow_unverified: bool,
) -> Result<(), LoginCheckError> {
    dotenvy::dotenv().ok();

    let config = CmsApiConfig::from_env()?;
    tracing::info!("Signing in to {} as {email}...", config.base_url);

    let client = CmsClient::new(&config)?;
    let session = LoginService::new(&client, allow_unverified)
        .login(email, password.expose_secret())
        .await?;

    match session.verification {
        Verification::Verified => tracing::info!(
            "Login succeeded: {} <{}>, role {}, token issued ({} chars)",
            session.user.name,
            session.user.email,
            session.user.role.label(),
            session.token.expose().len()
        ),
        Verification::Unverified => tracing::warn!(
            "Login accepted without a session token; the admin would serve demo data for {}",
            session.user.email
        ),
    }
    Ok(())
}
