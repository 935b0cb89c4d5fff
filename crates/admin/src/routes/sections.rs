//! Section editor handlers.
//!
//! Every editable area shares one template; the schema decides the inputs.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use cms_admin_core::{
    ContentArea, ContentRecord, SectionSchema, ValidationError, can_submit, validate,
};

use super::{Layout, expire_session, not_found};
use crate::components::SectionForm;
use crate::error::AppError;
use crate::filters;
use crate::forms::{FormAction, Submission};
use crate::middleware::{RequireSession, SessionStore};
use crate::models::{AdminSession, DataMode, Toast};
use crate::services::{SaveOutcome, SectionService};
use crate::state::AppState;

/// Section editor template.
#[derive(Template, WebTemplate)]
#[template(path = "sections/edit.html")]
pub struct SectionTemplate {
    pub layout: Layout,
    pub title: &'static str,
    pub action: String,
    pub form: SectionForm,
}

impl SectionTemplate {
    fn new(
        auth: &AdminSession,
        schema: &SectionSchema,
        record: &ContentRecord,
        errors: &[ValidationError],
        toast: Option<Toast>,
    ) -> Self {
        Self {
            layout: Layout::new(auth, Some(schema.area), toast),
            title: schema.area.title(),
            action: format!("/dash/{}", schema.area.slug()),
            form: SectionForm::build(schema, record, errors),
        }
    }

    /// Enable the save button exactly when the record validates.
    fn with_submit_state(mut self, schema: &SectionSchema, record: &ContentRecord) -> Self {
        self.form.can_submit = can_submit(schema, record);
        self
    }
}

/// Render the editor with the current content.
///
/// GET /dash/{area}
#[instrument(skip(state, auth, store))]
pub(super) async fn edit(
    state: &AppState,
    auth: AdminSession,
    store: &SessionStore,
    area: ContentArea,
) -> Result<Response, AppError> {
    let schema = area
        .section_schema()
        .ok_or_else(|| AppError::NotFound(area.slug().to_string()))?;

    let Ok(loaded) = SectionService::new(state.api()).load(&schema, &auth).await else {
        return expire_session(store).await;
    };
    // A load error replaces the pending toast; both are consumed.
    let pending = store.take_toast().await?;
    let toast = loaded.load_error.map(Toast::error).or(pending);

    // Pristine content only shows errors once the user submits.
    Ok(SectionTemplate::new(&auth, &schema, &loaded.record, &[], toast)
        .with_submit_state(&schema, &loaded.record)
        .into_response())
}

/// Save or check a section, or add/remove a list item.
///
/// POST /dash/{area}
#[instrument(skip_all)]
pub async fn save(
    State(state): State<AppState>,
    RequireSession(auth): RequireSession,
    store: SessionStore,
    Path(slug): Path<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let Some(schema) = ContentArea::from_slug(&slug).and_then(ContentArea::section_schema) else {
        return Ok(not_found::page().into_response());
    };

    let parts = Submission::read_parts(multipart).await?;
    let Submission {
        mut record,
        action,
        upload_errors,
    } = Submission::from_parts(&schema, parts, state.config().max_image_bytes)?;

    let render = |record: &ContentRecord, errors: &[ValidationError], toast: Toast| {
        SectionTemplate::new(&auth, &schema, record, errors, Some(toast))
    };

    let response = match action {
        FormAction::AddItem(key) => {
            let toast = match schema.find_list(&key) {
                Some(list) if record.add_item(list).is_some() => {
                    Toast::info(format!("{} added. Save to publish it.", list.item_label))
                }
                Some(list) => Toast::error(format!(
                    "{} allows at most {} item(s)",
                    list.label,
                    list.max_items.unwrap_or_default()
                )),
                None => return Err(AppError::BadRequest(format!("unknown list: {key}"))),
            };
            render(&record, &[], toast)
                .with_submit_state(&schema, &record)
                .into_response()
        }
        FormAction::RemoveItem(key, id) => {
            let toast = match schema.find_list(&key) {
                Some(list) if record.remove_item(list, id) => {
                    Toast::info(format!("{} removed. Save to publish the change.", list.item_label))
                }
                Some(list) => Toast::error(format!(
                    "{} needs at least {} item(s)",
                    list.label, list.min_items
                )),
                None => return Err(AppError::BadRequest(format!("unknown list: {key}"))),
            };
            render(&record, &[], toast)
                .with_submit_state(&schema, &record)
                .into_response()
        }
        FormAction::Check => {
            let errors = validate(&schema, &record);
            let toast = if !upload_errors.is_empty() {
                Toast::error(upload_errors.join("; "))
            } else if errors.is_empty() {
                Toast::info("Everything looks good. Save to publish.")
            } else {
                Toast::error("Please fix the highlighted fields")
            };
            render(&record, &errors, toast).into_response()
        }
        FormAction::Save if !upload_errors.is_empty() => (
            StatusCode::UNPROCESSABLE_ENTITY,
            render(&record, &validate(&schema, &record), Toast::error(upload_errors.join("; "))),
        )
            .into_response(),
        FormAction::Save => {
            match SectionService::new(state.api()).save(&schema, &auth, &record).await {
                SaveOutcome::Invalid(errors) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    render(
                        &record,
                        &errors,
                        Toast::error("Please fix the highlighted fields"),
                    ),
                )
                    .into_response(),
                SaveOutcome::Saved { mode } => {
                    let message = match mode {
                        DataMode::Live => format!("{} saved", schema.area.title()),
                        DataMode::Demo => format!(
                            "{} saved (demo data, nothing was sent to the website)",
                            schema.area.title()
                        ),
                    };
                    render(&record, &[], Toast::success(message)).into_response()
                }
                SaveOutcome::SessionExpired => expire_session(&store).await?,
                SaveOutcome::Failed(err) => (
                    StatusCode::BAD_GATEWAY,
                    render(&record, &[], Toast::error(err.user_message()))
                        .with_submit_state(&schema, &record),
                )
                    .into_response(),
            }
        }
    };
    Ok(response)
}
