//! reqwest-backed [`CmsApi`] implementation.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::instrument;

use super::{ApiError, ApiRequest, CmsApi, RequestBody};
use crate::config::{CmsApiConfig, expose_api_key};

/// CMS API client.
///
/// Cheap to clone; the connection pool is shared.
#[derive(Clone)]
pub struct CmsClient {
    inner: Arc<CmsClientInner>,
}

struct CmsClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl CmsClient {
    /// Create a new CMS API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CmsApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(key) = expose_api_key(config) {
            headers.insert(
                "x-api-key",
                HeaderValue::from_str(key)
                    .map_err(|e| ApiError::Parse(format!("Invalid API key format: {e}")))?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(CmsClientInner {
                client,
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    /// Handle API response and parse JSON.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Value, ApiError> {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text)
                .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(self.parse_error(response).await)
    }

    /// Parse error response from the CMS API.
    async fn parse_error(&self, response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();

        if status == 401 || status == 403 {
            return ApiError::Unauthorized;
        }

        if status == 404 {
            return ApiError::NotFound(response.url().path().to_string());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        // Prefer the envelope's message over the raw body
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| {
                ["message", "error"]
                    .iter()
                    .find_map(|key| v.get(*key).and_then(Value::as_str).map(String::from))
            })
            .unwrap_or(body);

        ApiError::Api { status, message }
    }
}

#[async_trait]
impl CmsApi for CmsClient {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let mut builder = self
            .inner
            .client
            .request(request.method.clone(), self.url(&request.path));

        if let Some(token) = &request.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Form(fields) => builder.form(&fields),
        };

        let response = builder.send().await.inspect_err(|e| {
            tracing::warn!(error = %e, "CMS API request failed");
        })?;
        self.handle_response(response).await
    }
}

impl std::fmt::Debug for CmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}
