//! Read-only listings of inbound records.

use tracing::instrument;

use cms_admin_core::ContentArea;

use super::{SessionExpired, fixtures};
use crate::api::CmsApi;
use crate::components::RecordRow;
use crate::models::{AdminSession, DataMode};

/// Rows ready for the table.
#[derive(Debug, Clone, Default)]
pub struct LoadedListing {
    pub rows: Vec<RecordRow>,
    /// Why the live rows could not be loaded, for the error toast.
    pub load_error: Option<String>,
}

/// Listing service.
pub struct ListingService<'a> {
    api: &'a dyn CmsApi,
}

impl<'a> ListingService<'a> {
    /// Create a new listing service.
    #[must_use]
    pub const fn new(api: &'a dyn CmsApi) -> Self {
        Self { api }
    }

    /// Load every record of a listing area.
    ///
    /// # Errors
    ///
    /// Returns [`SessionExpired`] when the backend refuses the session token.
    #[instrument(skip(self, auth))]
    pub async fn load(
        &self,
        area: ContentArea,
        auth: &AdminSession,
    ) -> Result<LoadedListing, SessionExpired> {
        let rows = match auth.mode() {
            DataMode::Demo => fixtures::demo_content(area)
                .as_array()
                .cloned()
                .unwrap_or_default(),
            DataMode::Live => match self.api.list_records(area, &auth.token).await {
                Ok(rows) => rows,
                Err(err) if err.is_unauthorized() => {
                    tracing::info!("Session token refused while loading listing");
                    return Err(SessionExpired);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Failed to load listing");
                    return Ok(LoadedListing {
                        rows: Vec::new(),
                        load_error: Some(err.user_message()),
                    });
                }
            },
        };

        Ok(LoadedListing {
            rows: rows.iter().map(RecordRow::from_json).collect(),
            load_error: None,
        })
    }
}
