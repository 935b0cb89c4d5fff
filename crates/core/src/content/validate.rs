//! Client-side validation of content records.
//!
//! Validation is a pure function of schema and record. The save button is
//! enabled exactly when [`validate`] returns no errors.

use super::record::ContentRecord;
use super::schema::{FieldKind, FieldSpec, SectionSchema};

/// What is wrong with a value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    #[error("is required")]
    Required,
    #[error("must be at most {max} characters")]
    TooLong { max: usize },
    #[error("must be one of the listed options")]
    InvalidOption,
    #[error("must be an image URL or an uploaded image")]
    InvalidImage,
    #[error("needs at least {min} item(s)")]
    TooFewItems { min: usize },
    #[error("allows at most {max} item(s)")]
    TooManyItems { max: usize },
}

/// A single validation failure, displayed as a human-readable sentence.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{label} {kind}")]
pub struct ValidationError {
    /// Form path of the offending input (`title`, `testimonials.2.name`).
    pub path: String,
    /// Human label (`Title`, `Testimonial 3 Name`).
    pub label: String,
    /// What is wrong.
    pub kind: ValidationErrorKind,
}

/// Validate a record against its schema.
///
/// Errors are returned in form order: scalar fields first, then each list.
#[must_use]
pub fn validate(schema: &SectionSchema, record: &ContentRecord) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for field in &schema.fields {
        if let Some(kind) = check_value(field, record.get(&field.key)) {
            errors.push(ValidationError {
                path: field.key.clone(),
                label: field.label.clone(),
                kind,
            });
        }
    }

    for list in &schema.lists {
        let items = record.items(&list.key);
        if items.len() < list.min_items {
            errors.push(ValidationError {
                path: list.key.clone(),
                label: list.label.clone(),
                kind: ValidationErrorKind::TooFewItems {
                    min: list.min_items,
                },
            });
        }
        if let Some(max) = list.max_items.filter(|max| items.len() > *max) {
            errors.push(ValidationError {
                path: list.key.clone(),
                label: list.label.clone(),
                kind: ValidationErrorKind::TooManyItems { max },
            });
        }

        for (index, item) in items.iter().enumerate() {
            for field in &list.fields {
                if let Some(kind) = check_value(field, item.get(&field.key)) {
                    errors.push(ValidationError {
                        path: format!("{}.{index}.{}", list.key, field.key),
                        label: format!("{} {} {}", list.item_label, index + 1, field.label),
                        kind,
                    });
                }
            }
        }
    }

    errors
}

/// Whether the record may be submitted.
#[must_use]
pub fn can_submit(schema: &SectionSchema, record: &ContentRecord) -> bool {
    validate(schema, record).is_empty()
}

/// Human-readable messages for a list of errors.
#[must_use]
pub fn messages(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}

fn check_value(field: &FieldSpec, value: &str) -> Option<ValidationErrorKind> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return field.required.then_some(ValidationErrorKind::Required);
    }

    // Uploaded images are data URIs far beyond any text limit.
    if field.kind != FieldKind::Image {
        if let Some(max) = field.max_length.filter(|max| value.chars().count() > *max) {
            return Some(ValidationErrorKind::TooLong { max });
        }
    }

    match field.kind {
        FieldKind::Select if !field.options.iter().any(|o| o.value == trimmed) => {
            Some(ValidationErrorKind::InvalidOption)
        }
        FieldKind::Image if !is_image_reference(trimmed) => Some(ValidationErrorKind::InvalidImage),
        _ => None,
    }
}

/// Absolute URL, site-relative path, or inline image data.
fn is_image_reference(value: &str) -> bool {
    value.starts_with("https://")
        || value.starts_with("http://")
        || value.starts_with('/')
        || value.starts_with("data:image/")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::content::area::ContentArea;
    use crate::content::schema::{ListSpec, SelectOption};

    fn schema() -> SectionSchema {
        SectionSchema::new(ContentArea::Testimonials)
            .field(FieldSpec::text("heading", "Heading").required().max_length(10))
            .field(FieldSpec::select(
                "layout",
                "Layout",
                vec![SelectOption::new("grid", "Grid"), SelectOption::new("carousel", "Carousel")],
            ))
            .field(FieldSpec::image("banner", "Banner"))
            .list(
                ListSpec::new(
                    "testimonials",
                    "Testimonials",
                    "Testimonial",
                    vec![FieldSpec::text("name", "Name").required()],
                )
                .min_items(1)
                .max_items(2),
            )
    }

    fn valid_record() -> ContentRecord {
        let schema = schema();
        let mut record = ContentRecord::empty(&schema);
        record.set("heading", "Reviews");
        let list = schema.find_list("testimonials").unwrap();
        record.add_item(list);
        record.lists.get_mut("testimonials").unwrap()[0]
            .fields
            .insert("name".into(), "Ada".into());
        record
    }

    #[test]
    fn test_valid_record_can_submit() {
        assert!(can_submit(&schema(), &valid_record()));
    }

    #[test]
    fn test_blank_required_field() {
        let mut record = valid_record();
        record.set("heading", "   ");
        let errors = validate(&schema(), &record);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::Required);
        assert_eq!(errors[0].to_string(), "Heading is required");
    }

    #[test]
    fn test_max_length_counts_characters() {
        let mut record = valid_record();
        record.set("heading", "éééééééééé");
        assert!(can_submit(&schema(), &record));
        record.set("heading", "ééééééééééé");
        let errors = validate(&schema(), &record);
        assert_eq!(errors[0].to_string(), "Heading must be at most 10 characters");
    }

    #[test]
    fn test_select_must_match_option() {
        let mut record = valid_record();
        record.set("layout", "masonry");
        let errors = validate(&schema(), &record);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidOption);
        record.set("layout", "grid");
        assert!(can_submit(&schema(), &record));
    }

    #[test]
    fn test_image_accepts_urls_and_data_uris() {
        let mut record = valid_record();
        for ok in ["https://cdn.example.com/a.png", "/uploads/a.png", "data:image/png;base64,AAAA"] {
            record.set("banner", ok);
            assert!(can_submit(&schema(), &record), "{ok}");
        }
        record.set("banner", "a.png");
        assert_eq!(
            validate(&schema(), &record)[0].kind,
            ValidationErrorKind::InvalidImage
        );
    }

    #[test]
    fn test_list_item_errors_are_labelled() {
        let mut record = valid_record();
        record.lists.get_mut("testimonials").unwrap()[0]
            .fields
            .insert("name".into(), String::new());
        let errors = validate(&schema(), &record);
        assert_eq!(errors[0].path, "testimonials.0.name");
        assert_eq!(errors[0].to_string(), "Testimonial 1 Name is required");
    }

    #[test]
    fn test_list_bounds() {
        let mut record = valid_record();
        record.lists.get_mut("testimonials").unwrap().clear();
        assert_eq!(
            validate(&schema(), &record)[0].kind,
            ValidationErrorKind::TooFewItems { min: 1 }
        );
    }

    #[test]
    fn test_messages() {
        let mut record = valid_record();
        record.set("heading", "");
        assert_eq!(messages(&validate(&schema(), &record)), vec!["Heading is required"]);
    }
}
