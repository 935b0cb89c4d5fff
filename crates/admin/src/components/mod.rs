//! Reusable view components for admin pages.

pub mod data_table;
pub mod form_field;

pub use data_table::{DataTableConfig, RecordRow, SortDir, TableColumn, TableQuery, listing_table};
pub use form_field::{FieldView, ListItemView, ListView, SectionForm};
