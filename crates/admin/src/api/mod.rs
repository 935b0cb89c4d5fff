//! CMS backend API.
//!
//! The rest of the crate talks to the backend only through the [`CmsApi`]
//! trait. Implementors provide [`CmsApi::execute`], which sends one request
//! and returns the raw JSON body of a successful response; the per-endpoint
//! methods are built on top of it and pass every body through the
//! normalisation boundary in [`envelope`].
//!
//! # Endpoints
//!
//! - `POST /auth/login` - JSON, with a form-encoded fallback
//! - `POST /auth/generate-token`
//! - `GET /<area path>` / `PUT /<area path>` - editable sections
//! - `GET /<area path>` - inbound record listings

mod client;
pub mod envelope;
pub mod login;

pub use client::CmsClient;
pub use login::LoginPayload;

use async_trait::async_trait;
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use thiserror::Error;

use cms_admin_core::{ContentArea, Email, SessionToken};

/// Errors that can occur when interacting with the CMS API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Credentials or token were refused (401/403).
    #[error("Unauthorized")]
    Unauthorized,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The envelope reported `success: false`.
    #[error("Rejected: {0}")]
    Rejected(String),
}

impl ApiError {
    /// Message safe to show to staff.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized => "Invalid credentials".to_string(),
            Self::Api { status, .. } if *status >= 500 => {
                "Server error, please try again later".to_string()
            }
            Self::Http(_) => "Network error, check your connection".to_string(),
            Self::Rejected(message) if !message.trim().is_empty() => message.clone(),
            _ => "Something went wrong".to_string(),
        }
    }

    /// Whether the backend refused the token or credentials (401/403).
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Whether the backend refused the credentials outright.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Rejected(_))
    }
}

/// Login credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct Credentials {
    pub email: Email,
    pub password: SecretString,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email.as_str())
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    fn to_json(&self) -> Value {
        json!({
            "email": self.email.as_str(),
            "password": self.password.expose_secret(),
        })
    }

    fn to_form(&self) -> Vec<(String, String)> {
        vec![
            ("email".to_string(), self.email.as_str().to_string()),
            ("password".to_string(), self.password.expose_secret().to_string()),
        ]
    }
}

/// Request body.
#[derive(Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Form(Vec<(String, String)>),
}

/// One request to the CMS API, relative to its base URL.
#[derive(Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
    /// Bearer token, sent as `Authorization: Bearer <token>`.
    pub token: Option<String>,
}

impl std::fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let body = match self.body {
            RequestBody::Empty => "empty",
            RequestBody::Json(_) => "json",
            RequestBody::Form(_) => "form",
        };
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("body", &body)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ApiRequest {
    fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            body: RequestBody::Empty,
            token: None,
        }
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    #[must_use]
    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(fields);
        self
    }

    #[must_use]
    pub fn bearer(mut self, token: &SessionToken) -> Self {
        self.token = Some(token.expose().to_string());
        self
    }
}

/// Access to the CMS backend.
#[async_trait]
pub trait CmsApi: Send + Sync {
    /// Send a request and return the raw JSON body of a 2xx response.
    ///
    /// Non-2xx statuses map to [`ApiError::Unauthorized`] (401/403),
    /// [`ApiError::NotFound`] (404) or [`ApiError::Api`].
    async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError>;

    /// `POST /auth/login` with a JSON body.
    ///
    /// Returns the whole (non-rejected) body: the token may sit at the top
    /// level or under `data`.
    async fn login(&self, credentials: &Credentials) -> Result<Value, ApiError> {
        let body = self
            .execute(ApiRequest::post("/auth/login").json(credentials.to_json()))
            .await?;
        envelope::ensure_accepted(body)
    }

    /// `POST /auth/login` with a form-encoded body.
    async fn login_form(&self, credentials: &Credentials) -> Result<Value, ApiError> {
        let body = self
            .execute(ApiRequest::post("/auth/login").form(credentials.to_form()))
            .await?;
        envelope::ensure_accepted(body)
    }

    /// `POST /auth/generate-token`.
    async fn generate_token(&self, credentials: &Credentials) -> Result<Value, ApiError> {
        let body = self
            .execute(ApiRequest::post("/auth/generate-token").json(credentials.to_json()))
            .await?;
        envelope::ensure_accepted(body)
    }

    /// Current content of an editable section.
    async fn fetch_section(
        &self,
        area: ContentArea,
        token: &SessionToken,
    ) -> Result<Value, ApiError> {
        let body = self
            .execute(ApiRequest::get(area.api_path()).bearer(token))
            .await?;
        envelope::unwrap(body)
    }

    /// Replace the content of an editable section.
    async fn update_section(
        &self,
        area: ContentArea,
        token: &SessionToken,
        content: Value,
    ) -> Result<Value, ApiError> {
        let body = self
            .execute(ApiRequest::put(area.api_path()).bearer(token).json(content))
            .await?;
        envelope::unwrap(body)
    }

    /// Records of a listing area.
    async fn list_records(
        &self,
        area: ContentArea,
        token: &SessionToken,
    ) -> Result<Vec<Value>, ApiError> {
        let body = self
            .execute(ApiRequest::get(area.api_path()).bearer(token))
            .await?;
        envelope::unwrap_list(body)
    }
}
