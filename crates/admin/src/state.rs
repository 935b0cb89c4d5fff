//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::{ApiError, CmsApi, CmsClient};
use crate::config::AdminConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    api: Arc<dyn CmsApi>,
}

impl AppState {
    /// Build state backed by the real CMS API client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the HTTP client cannot be built.
    pub fn new(config: AdminConfig) -> Result<Self, ApiError> {
        let client = CmsClient::new(&config.api)?;
        Ok(Self::with_api(config, Arc::new(client)))
    }

    /// Build state around any [`CmsApi`] implementation.
    #[must_use]
    pub fn with_api(config: AdminConfig, api: Arc<dyn CmsApi>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, api }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn api(&self) -> &dyn CmsApi {
        self.inner.api.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
