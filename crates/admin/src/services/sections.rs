//! Editable content sections.
//!
//! One service drives every section page; the [`SectionSchema`] decides
//! which fields and lists exist and how they are validated.

use tracing::instrument;

use cms_admin_core::{ContentRecord, SectionSchema, ValidationError, validate};

use super::{SessionExpired, fixtures};
use crate::api::{ApiError, CmsApi};
use crate::models::{AdminSession, DataMode};

/// A record ready for the form.
#[derive(Debug, Clone)]
pub struct LoadedSection {
    pub record: ContentRecord,
    /// Why the live content could not be loaded, for the error toast.
    pub load_error: Option<String>,
}

/// Result of a save attempt.
#[derive(Debug)]
pub enum SaveOutcome {
    /// Validation failed; nothing was sent.
    Invalid(Vec<ValidationError>),
    /// Saved (or, in demo mode, accepted without a network call).
    Saved { mode: DataMode },
    /// The backend refused the session token.
    SessionExpired,
    /// The backend rejected or failed the update.
    Failed(ApiError),
}

/// Section load/save service.
pub struct SectionService<'a> {
    api: &'a dyn CmsApi,
}

impl<'a> SectionService<'a> {
    /// Create a new section service.
    #[must_use]
    pub const fn new(api: &'a dyn CmsApi) -> Self {
        Self { api }
    }

    /// Load the current content of a section.
    ///
    /// A failed live fetch still yields an empty, normalised record so the
    /// page stays usable.
    ///
    /// # Errors
    ///
    /// Returns [`SessionExpired`] when the backend refuses the session token.
    #[instrument(skip(self, schema, auth), fields(area = %schema.area))]
    pub async fn load(
        &self,
        schema: &SectionSchema,
        auth: &AdminSession,
    ) -> Result<LoadedSection, SessionExpired> {
        let loaded = match auth.mode() {
            DataMode::Demo => LoadedSection {
                record: ContentRecord::from_json(schema, &fixtures::demo_content(schema.area)),
                load_error: None,
            },
            DataMode::Live => match self.api.fetch_section(schema.area, &auth.token).await {
                Ok(body) => LoadedSection {
                    record: ContentRecord::from_json(schema, &body),
                    load_error: None,
                },
                Err(err) if err.is_unauthorized() => {
                    tracing::info!("Session token refused while loading section");
                    return Err(SessionExpired);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Failed to load section");
                    LoadedSection {
                        record: ContentRecord::empty(schema),
                        load_error: Some(err.user_message()),
                    }
                }
            },
        };
        Ok(loaded)
    }

    /// Validate and save a record.
    #[instrument(skip(self, schema, auth, record), fields(area = %schema.area))]
    pub async fn save(
        &self,
        schema: &SectionSchema,
        auth: &AdminSession,
        record: &ContentRecord,
    ) -> SaveOutcome {
        let errors = validate(schema, record);
        if !errors.is_empty() {
            tracing::debug!(errors = errors.len(), "Save blocked by validation");
            return SaveOutcome::Invalid(errors);
        }

        let mode = auth.mode();
        if mode == DataMode::Demo {
            tracing::info!("Demo save accepted without network call");
            return SaveOutcome::Saved { mode };
        }

        match self
            .api
            .update_section(schema.area, &auth.token, record.to_json(schema))
            .await
        {
            Ok(_) => {
                tracing::info!("Section saved");
                SaveOutcome::Saved { mode }
            }
            Err(err) if err.is_unauthorized() => {
                tracing::info!("Session token refused while saving section");
                SaveOutcome::SessionExpired
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to save section");
                SaveOutcome::Failed(err)
            }
        }
    }
}
