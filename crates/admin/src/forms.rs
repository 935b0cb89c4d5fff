//! Section form submissions.
//!
//! Turns the multipart parts posted by `sections/edit.html` back into a
//! [`ContentRecord`] plus the requested [`FormAction`]. Uploaded images are
//! inlined as `data:<mime>;base64,...` URIs.

use std::collections::{BTreeMap, HashMap};

use axum::extract::Multipart;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value};

use cms_admin_core::{ContentRecord, FieldKind, FieldSpec, ListItem, ListItemId, SectionSchema};

use crate::components::form_field::{EXTRA_INPUT, FILE_SUFFIX};
use crate::error::AppError;

/// One multipart part.
#[derive(Debug, Clone, Default)]
pub struct RawPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl RawPart {
    /// A plain text part.
    #[must_use]
    pub fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            bytes: value.as_bytes().to_vec(),
            ..Self::default()
        }
    }

    /// A file part.
    #[must_use]
    pub fn file(name: &str, file_name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            file_name: Some(file_name.to_string()),
            content_type: Some(content_type.to_string()),
            bytes,
        }
    }

    fn is_empty_file(&self) -> bool {
        self.bytes.is_empty() && self.file_name.as_deref().is_none_or(str::is_empty)
    }
}

/// What the submit button asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Validate and save.
    Save,
    /// Validate and re-render without saving.
    Check,
    /// Append an empty item to a list.
    AddItem(String),
    /// Remove an item from a list.
    RemoveItem(String, ListItemId),
}

impl FormAction {
    /// Parse the `action` value; a missing value means save.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Option<Self> {
        let value = value.map(str::trim).unwrap_or("save");
        if value.is_empty() || value == "save" {
            return Some(Self::Save);
        }
        if value == "check" {
            return Some(Self::Check);
        }
        if let Some(list) = value.strip_prefix("add:") {
            return (!list.is_empty()).then(|| Self::AddItem(list.to_string()));
        }
        let rest = value.strip_prefix("remove:")?;
        let (list, id) = rest.rsplit_once(':')?;
        Some(Self::RemoveItem(list.to_string(), ListItemId::parse(id)?))
    }
}

/// A decoded section submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub record: ContentRecord,
    pub action: FormAction,
    /// Rejected uploads, as messages for the toast.
    pub upload_errors: Vec<String>,
}

impl Submission {
    /// Decode parts against the schema.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for an unknown action or a list the
    /// schema does not have.
    pub fn from_parts(
        schema: &SectionSchema,
        parts: Vec<RawPart>,
        max_image_bytes: usize,
    ) -> Result<Self, AppError> {
        let mut text: HashMap<String, String> = HashMap::new();
        let mut files: HashMap<String, RawPart> = HashMap::new();
        for part in parts {
            if part.file_name.is_some() || part.name.ends_with(FILE_SUFFIX) {
                if !part.is_empty_file() {
                    files.insert(part.name.clone(), part);
                }
            } else {
                let value = String::from_utf8_lossy(&part.bytes).into_owned();
                text.insert(part.name, value);
            }
        }

        let action = FormAction::parse(text.get("action").map(String::as_str))
            .ok_or_else(|| AppError::BadRequest("unknown form action".to_string()))?;
        match &action {
            FormAction::AddItem(list) | FormAction::RemoveItem(list, _)
                if schema.find_list(list).is_none() =>
            {
                return Err(AppError::BadRequest(format!("unknown list: {list}")));
            }
            _ => {}
        }

        let mut upload_errors = Vec::new();
        let mut read_field = |spec: &FieldSpec, name: &str| -> String {
            let value = text.get(name).cloned().unwrap_or_default();
            if spec.kind != FieldKind::Image {
                return value;
            }
            match files.get(&format!("{name}{FILE_SUFFIX}")) {
                Some(file) => match image_data_uri(file, max_image_bytes) {
                    Ok(uri) => uri,
                    Err(reason) => {
                        upload_errors.push(format!("{}: {reason}", spec.label));
                        value
                    }
                },
                None => value,
            }
        };

        let mut record = ContentRecord {
            extra: parse_extra(text.get(EXTRA_INPUT)),
            ..ContentRecord::default()
        };
        for spec in &schema.fields {
            let value = read_field(spec, &format!("f.{}", spec.key));
            record.fields.insert(spec.key.clone(), value);
        }

        for list in &schema.lists {
            let prefix = format!("l.{}.", list.key);
            let indexes: std::collections::BTreeSet<usize> = text
                .keys()
                .filter_map(|name| name.strip_prefix(&prefix))
                .filter_map(|rest| rest.split_once('.').map(|(index, _)| index))
                .filter_map(|index| index.parse().ok())
                .collect();

            let items = indexes
                .into_iter()
                .map(|index| {
                    let item_prefix = format!("{prefix}{index}");
                    let id = text
                        .get(&format!("{item_prefix}.__id"))
                        .and_then(|id| ListItemId::parse(id))
                        .unwrap_or_default();
                    let fields: BTreeMap<String, String> = list
                        .fields
                        .iter()
                        .map(|spec| {
                            let value = read_field(spec, &format!("{item_prefix}.{}", spec.key));
                            (spec.key.clone(), value)
                        })
                        .collect();
                    ListItem {
                        id,
                        fields,
                        extra: parse_extra(text.get(&format!("{item_prefix}.{EXTRA_INPUT}"))),
                    }
                })
                .collect();
            record.lists.insert(list.key.clone(), items);
        }

        Ok(Self {
            record: record.normalized(schema),
            action,
            upload_errors,
        })
    }

    /// Read every part of a multipart request.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the body is not valid multipart or
    /// exceeds the body limit.
    pub async fn read_parts(mut multipart: Multipart) -> Result<Vec<RawPart>, AppError> {
        let mut parts = Vec::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(String::from);
            let content_type = field.content_type().map(String::from);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            parts.push(RawPart {
                name,
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
        }
        Ok(parts)
    }
}

/// Encode an uploaded image as a data URI.
fn image_data_uri(file: &RawPart, max_bytes: usize) -> Result<String, String> {
    let mime = file
        .content_type
        .as_deref()
        .map(str::trim)
        .filter(|mime| mime.starts_with("image/"))
        .ok_or_else(|| "only image files can be uploaded".to_string())?;
    if file.bytes.is_empty() {
        return Err("the uploaded file is empty".to_string());
    }
    if file.bytes.len() > max_bytes {
        return Err(format!("images must be at most {} KiB", max_bytes / 1024));
    }
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(&file.bytes)))
}

fn parse_extra(raw: Option<&String>) -> Map<String, Value> {
    raw.and_then(|raw| serde_json::from_str::<Value>(raw).ok())
        .and_then(|value| match value {
            Value::Object(object) => Some(object),
            _ => None,
        })
        .unwrap_or_default()
}
