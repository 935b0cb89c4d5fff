//! Read-only listings of inbound records.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Response};
use tracing::instrument;

use cms_admin_core::ContentArea;

use super::{Layout, expire_session};
use crate::components::{DataTableConfig, RecordRow, SortDir, TableQuery, listing_table};
use crate::error::AppError;
use crate::filters;
use crate::middleware::SessionStore;
use crate::models::{AdminSession, Toast};
use crate::services::ListingService;
use crate::state::AppState;

/// Column header with its sort link.
#[derive(Debug, Clone)]
pub struct HeaderView {
    pub label: String,
    pub sortable: bool,
    pub href: String,
    /// `asc` or `desc` when the table is sorted by this column.
    pub active_dir: Option<&'static str>,
}

/// Listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "listings/index.html")]
pub struct ListingTemplate {
    pub layout: Layout,
    pub title: &'static str,
    pub action: String,
    pub q: String,
    pub search_placeholder: String,
    pub headers: Vec<HeaderView>,
    pub rows: Vec<Vec<String>>,
    pub total: usize,
    pub empty_title: String,
    pub empty_description: Option<String>,
}

impl ListingTemplate {
    /// Whether the search hid some rows.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.rows.len() != self.total
    }
}

/// Render a listing with search and sort applied.
///
/// GET /dash/{area}
#[instrument(skip(state, auth, store))]
pub(super) async fn index(
    state: &AppState,
    auth: AdminSession,
    store: &SessionStore,
    area: ContentArea,
    query: &TableQuery,
) -> Result<Response, AppError> {
    let config =
        listing_table(area).ok_or_else(|| AppError::NotFound(area.slug().to_string()))?;

    let Ok(loaded) = ListingService::new(state.api()).load(area, &auth).await else {
        return expire_session(store).await;
    };
    let pending = store.take_toast().await?;
    let toast = loaded.load_error.map(Toast::error).or(pending);

    let total = loaded.rows.len();
    let rows = query.apply(&config, loaded.rows);
    let action = format!("/dash/{}", area.slug());

    Ok(ListingTemplate {
        layout: Layout::new(&auth, Some(area), toast),
        title: area.title(),
        headers: headers(&config, query, &action),
        rows: cells(&config, &rows),
        action,
        q: query.q.clone(),
        search_placeholder: config.search_placeholder.clone(),
        total,
        empty_title: config.empty_title,
        empty_description: config.empty_description,
    }
    .into_response())
}

fn headers(config: &DataTableConfig, query: &TableQuery, action: &str) -> Vec<HeaderView> {
    config
        .visible_columns()
        .into_iter()
        .map(|column| {
            let active = query.sort.as_deref() == Some(column.key.as_str());
            let next = if active { query.dir.toggled() } else { SortDir::Asc };
            let mut href = url::form_urlencoded::Serializer::new(String::new());
            if !query.q.is_empty() {
                href.append_pair("q", &query.q);
            }
            href.append_pair("sort", &column.key);
            href.append_pair("dir", next.as_str());
            HeaderView {
                label: column.label.clone(),
                sortable: column.sortable,
                href: format!("{action}?{}", href.finish()),
                active_dir: active.then(|| query.dir.as_str()),
            }
        })
        .collect()
}

fn cells(config: &DataTableConfig, rows: &[RecordRow]) -> Vec<Vec<String>> {
    let columns = config.visible_columns();
    rows.iter()
        .map(|row| columns.iter().map(|c| row.get(&c.key).to_string()).collect())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_header_links_toggle_active_column() {
        let config = listing_table(ContentArea::Subscribers).unwrap();
        let query = TableQuery {
            q: "ex ample".to_string(),
            sort: Some("email".to_string()),
            dir: SortDir::Asc,
        };
        let headers = headers(&config, &query, "/dash/subscribers");

        assert_eq!(headers[0].href, "/dash/subscribers?q=ex+ample&sort=email&dir=desc");
        assert_eq!(headers[0].active_dir, Some("asc"));
        assert_eq!(headers[1].href, "/dash/subscribers?q=ex+ample&sort=createdAt&dir=asc");
        assert_eq!(headers[1].active_dir, None);
    }

    #[test]
    fn test_hidden_columns_are_not_rendered() {
        let config = listing_table(ContentArea::JobApplications).unwrap();
        let row = RecordRow::from_json(&serde_json::json!({
            "name": "Ada",
            "resume": "https://example.com/cv.pdf",
        }));
        let cells = cells(&config, &[row]);
        assert_eq!(cells[0].len(), config.visible_columns().len());
        assert!(!cells[0].iter().any(|c| c.contains("cv.pdf")));
    }
}
