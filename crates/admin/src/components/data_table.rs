//! Data table component types.
//!
//! Read-only tables for the inbound record listings. Rows arrive as loose
//! JSON objects and are flattened into [`RecordRow`]s; a [`TableQuery`]
//! filters them by a case-insensitive search and sorts by a sortable column.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use cms_admin_core::ContentArea;

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    /// Key in the record.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Whether the column is sortable.
    pub sortable: bool,
    /// Whether the column is visible by default.
    pub default_visible: bool,
}

impl TableColumn {
    /// Create a new sortable column.
    #[must_use]
    pub fn sortable(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: true,
            default_visible: true,
        }
    }

    /// Create a new non-sortable column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: false,
            default_visible: true,
        }
    }

    /// Set whether the column is visible by default.
    #[must_use]
    pub const fn visible(mut self, visible: bool) -> Self {
        self.default_visible = visible;
        self
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Search placeholder text.
    pub search_placeholder: String,
    /// Title for empty state.
    pub empty_title: String,
    /// Description for empty state.
    pub empty_description: Option<String>,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            search_placeholder: "Search...".to_string(),
            empty_title: "No items found".to_string(),
            empty_description: None,
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Set search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, placeholder: &str) -> Self {
        self.search_placeholder = placeholder.to_string();
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(mut self, title: &str, description: Option<&str>) -> Self {
        self.empty_title = title.to_string();
        self.empty_description = description.map(ToString::to_string);
        self
    }

    /// Columns shown by default.
    #[must_use]
    pub fn visible_columns(&self) -> Vec<&TableColumn> {
        self.columns.iter().filter(|c| c.default_visible).collect()
    }

    fn find_sortable(&self, key: &str) -> Option<&TableColumn> {
        self.columns.iter().find(|c| c.sortable && c.key == key)
    }
}

/// One flattened record: column key to display string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordRow(pub BTreeMap<String, String>);

impl RecordRow {
    /// Flatten a backend record. Nested values are shown as compact JSON.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        Self(
            object
                .iter()
                .map(|(key, value)| {
                    let display = match value {
                        Value::Null => String::new(),
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (key.clone(), display)
                })
                .collect(),
        )
    }

    /// Cell value, `""` when absent.
    #[must_use]
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map_or("", String::as_str)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

/// Case-insensitive; anything other than `desc` sorts ascending.
impl<'de> Deserialize<'de> for SortDir {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(if raw.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        })
    }
}

impl SortDir {
    /// Direction a header link should request next.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Search and sort parameters from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableQuery {
    /// Case-insensitive search over the visible columns.
    #[serde(default)]
    pub q: String,
    /// Column to sort by; ignored unless sortable.
    pub sort: Option<String>,
    #[serde(default)]
    pub dir: SortDir,
}

impl TableQuery {
    /// Filter and sort rows for display.
    #[must_use]
    pub fn apply(&self, config: &DataTableConfig, rows: Vec<RecordRow>) -> Vec<RecordRow> {
        let needle = self.q.trim().to_lowercase();
        let mut rows: Vec<RecordRow> = if needle.is_empty() {
            rows
        } else {
            rows.into_iter()
                .filter(|row| {
                    config
                        .visible_columns()
                        .iter()
                        .any(|c| row.get(&c.key).to_lowercase().contains(&needle))
                })
                .collect()
        };

        if let Some(column) = self.sort.as_deref().and_then(|key| config.find_sortable(key)) {
            rows.sort_by(|a, b| {
                let ordering = compare_cells(a.get(&column.key), b.get(&column.key));
                match self.dir {
                    SortDir::Asc => ordering,
                    SortDir::Desc => ordering.reverse(),
                }
            });
        }
        rows
    }
}

/// Case-insensitive comparison of two cells.
fn compare_cells(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Table configuration for a listing area; `None` for editable sections.
#[must_use]
pub fn listing_table(area: ContentArea) -> Option<DataTableConfig> {
    let config = match area {
        ContentArea::JobApplications => DataTableConfig::new("job-applications")
            .column(TableColumn::sortable("name", "Applicant"))
            .column(TableColumn::sortable("email", "Email"))
            .column(TableColumn::sortable("position", "Position"))
            .column(TableColumn::new("phone", "Phone"))
            .column(TableColumn::new("resume", "Resume").visible(false))
            .column(TableColumn::sortable("createdAt", "Applied"))
            .search_placeholder("Search applicants by name, email or position...")
            .empty_state("No applications yet", Some("New applications appear here")),
        ContentArea::Subscribers => DataTableConfig::new("subscribers")
            .column(TableColumn::sortable("email", "Email"))
            .column(TableColumn::sortable("createdAt", "Subscribed"))
            .search_placeholder("Search subscribers by email...")
            .empty_state("No subscribers yet", None),
        ContentArea::ContactQueries => DataTableConfig::new("contact-queries")
            .column(TableColumn::sortable("name", "Name"))
            .column(TableColumn::sortable("email", "Email"))
            .column(TableColumn::sortable("subject", "Subject"))
            .column(TableColumn::new("message", "Message"))
            .column(TableColumn::sortable("createdAt", "Received"))
            .search_placeholder("Search queries...")
            .empty_state(
                "No contact queries",
                Some("Try adjusting your search"),
            ),
        _ => return None,
    };
    Some(config)
}
