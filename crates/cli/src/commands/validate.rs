//! Record validation against an area schema.
//!
//! # Usage
//!
//! ```bash
//! cms-cli validate --area about-us --file about.json
//! ```
//!
//! The file may hold the bare record or any envelope the CMS API returns
//! (`{data: ...}`, `{success: true, data: ...}`).

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use cms_admin::api::{ApiError, envelope};
use cms_admin_core::{ContentArea, ContentRecord, ValidationError, validate};

/// Errors that can occur while validating a record file.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// Slug does not name an editable section.
    #[error("Unknown section area: {0}. Run `cms-cli areas` for the list")]
    UnknownArea(String),

    /// File could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// File is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// File is not valid YAML.
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File holds a rejected envelope.
    #[error("Record envelope: {0}")]
    Envelope(#[from] ApiError),

    /// The record failed validation.
    #[error("{0} validation error(s)")]
    Invalid(usize),
}

/// Validate the record in `file` against the schema of `area`.
///
/// # Errors
///
/// Returns `ValidateError::Invalid` when the record has validation errors,
/// after logging each of them.
pub fn run(area: &str, file: &Path) -> Result<(), ValidateError> {
    let content = std::fs::read_to_string(file).map_err(|source| ValidateError::Read {
        path: file.display().to_string(),
        source,
    })?;
    let errors = check(area, &content, is_yaml(file))?;

    if errors.is_empty() {
        tracing::info!("{} is valid for {area}", file.display());
        return Ok(());
    }
    for error in &errors {
        tracing::error!(path = %error.path, "{error}");
    }
    Err(ValidateError::Invalid(errors.len()))
}

/// Parse `content` and validate it against the schema of `area`.
fn check(area: &str, content: &str, yaml: bool) -> Result<Vec<ValidationError>, ValidateError> {
    let schema = ContentArea::from_slug(area)
        .and_then(ContentArea::section_schema)
        .ok_or_else(|| ValidateError::UnknownArea(area.to_owned()))?;

    let raw: Value = if yaml {
        serde_yaml::from_str(content)?
    } else {
        serde_json::from_str(content)?
    };
    let body = envelope::unwrap(envelope::ensure_accepted(raw)?)?;
    let record = ContentRecord::from_json(&schema, &body);

    Ok(validate(&schema, &record))
}

fn is_yaml(file: &Path) -> bool {
    file.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_json_envelope() {
        let json = r#"{"success": true, "data": {"email": "hello@example.org", "phone": "+1 555 0100", "address": "1 Main St"}}"#;
        let errors = check("contact-details", json, false).unwrap();
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn test_yaml_missing_required_field() {
        let yaml = "title: ''\nsubtitle: Hello\n";
        let errors = check("home-hero", yaml, true).unwrap();
        assert!(errors.iter().any(|e| e.path == "title"));
    }

    #[test]
    fn test_unknown_and_listing_areas_are_rejected() {
        assert!(matches!(
            check("nope", "{}", false),
            Err(ValidateError::UnknownArea(_))
        ));
        assert!(matches!(
            check("subscribers", "[]", false),
            Err(ValidateError::UnknownArea(_))
        ));
    }

    #[test]
    fn test_rejected_envelope() {
        let json = r#"{"success": false, "message": "nope"}"#;
        assert!(matches!(
            check("home-hero", json, false),
            Err(ValidateError::Envelope(_))
        ));
    }

    #[test]
    fn test_is_yaml() {
        assert!(is_yaml(Path::new("a.YML")));
        assert!(is_yaml(Path::new("dir/a.yaml")));
        assert!(!is_yaml(Path::new("a.json")));
    }
}
