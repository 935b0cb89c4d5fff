//! Content areas, their form schemas, and the records edited through them.

pub mod area;
pub mod catalog;
pub mod record;
pub mod schema;
pub mod validate;

pub use area::{AreaKind, ContentArea};
pub use record::{ContentRecord, ListItem};
pub use schema::{FieldKind, FieldSpec, ListSpec, SectionSchema, SelectOption};
pub use validate::{ValidationError, ValidationErrorKind, can_submit, validate};
