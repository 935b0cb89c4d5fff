//! Form view models rendered by `partials/field.html`.
//!
//! A [`SectionForm`] is built from a schema, the current record and the
//! validation errors; templates only read from it.
//!
//! # Input names
//!
//! ```text
//! f.<field>                      scalar field
//! f.<field>__file                image upload for a scalar field
//! l.<list>.<index>.<field>       list item field
//! l.<list>.<index>.<field>__file image upload for a list item field
//! l.<list>.<index>.__id          list item id
//! l.<list>.<index>.__extra       unknown backend keys of the item (JSON)
//! __extra                        unknown backend keys of the record (JSON)
//! action                         save | check | add:<list> | remove:<list>:<id>
//! ```

use std::collections::HashMap;

use serde_json::{Map, Value};

use cms_admin_core::content::validate::messages;
use cms_admin_core::{
    ContentRecord, FieldKind, FieldSpec, ListSpec, SectionSchema, ValidationError,
};

/// Suffix of the file input paired with an image field.
pub const FILE_SUFFIX: &str = "__file";

/// Name of the input carrying unknown backend keys.
pub const EXTRA_INPUT: &str = "__extra";

/// Option of a select field.
#[derive(Debug, Clone)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// One input.
#[derive(Debug, Clone)]
pub struct FieldView {
    /// Input name.
    pub name: String,
    /// DOM id.
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub value: String,
    pub required: bool,
    pub max_length: Option<usize>,
    pub options: Vec<OptionView>,
    pub help: Option<String>,
    pub error: Option<String>,
}

impl FieldView {
    fn new(spec: &FieldSpec, name: String, value: &str, error: Option<String>) -> Self {
        let options = spec
            .options
            .iter()
            .map(|o| OptionView {
                value: o.value.clone(),
                label: o.label.clone(),
                selected: o.value == value,
            })
            .collect();
        Self {
            id: name.replace('.', "-"),
            name,
            label: spec.label.clone(),
            kind: spec.kind,
            value: value.to_string(),
            required: spec.required,
            max_length: spec.max_length,
            options,
            help: spec.help.clone(),
            error,
        }
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        self.kind == FieldKind::Text
    }

    #[must_use]
    pub fn is_textarea(&self) -> bool {
        self.kind == FieldKind::TextArea
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.kind == FieldKind::Image
    }

    #[must_use]
    pub fn is_select(&self) -> bool {
        self.kind == FieldKind::Select
    }

    /// Name of the paired file input.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}{FILE_SUFFIX}", self.name)
    }

    /// Whether the value is an uploaded image held inline.
    #[must_use]
    pub fn has_inline_image(&self) -> bool {
        self.value.starts_with("data:image/")
    }

    /// Whether a preview can be shown.
    #[must_use]
    pub fn has_preview(&self) -> bool {
        self.is_image() && !self.value.trim().is_empty()
    }

    /// Whether no option matches the current value.
    #[must_use]
    pub fn nothing_selected(&self) -> bool {
        !self.options.iter().any(|o| o.selected)
    }
}

/// One item of a repeatable list.
#[derive(Debug, Clone)]
pub struct ListItemView {
    pub id: String,
    /// Heading, e.g. "Testimonial 2".
    pub heading: String,
    /// Input name prefix (`l.<list>.<index>`).
    pub prefix: String,
    pub fields: Vec<FieldView>,
    /// Unknown backend keys as JSON; empty when there are none.
    pub extra_json: String,
}

/// A repeatable list.
#[derive(Debug, Clone)]
pub struct ListView {
    pub key: String,
    pub label: String,
    pub item_label: String,
    pub items: Vec<ListItemView>,
    pub can_add: bool,
    pub can_remove: bool,
    /// List-level error (too few or too many items).
    pub error: Option<String>,
}

/// Everything the section template needs.
#[derive(Debug, Clone)]
pub struct SectionForm {
    pub fields: Vec<FieldView>,
    pub lists: Vec<ListView>,
    /// Unknown backend keys of the record as JSON; empty when there are none.
    pub extra_json: String,
    /// Whether the save button is enabled.
    pub can_submit: bool,
    /// Every error, in form order.
    pub errors: Vec<String>,
    /// Whether the form carries file inputs.
    pub multipart: bool,
}

impl SectionForm {
    /// Build the form for `record` with the given validation errors.
    #[must_use]
    pub fn build(
        schema: &SectionSchema,
        record: &ContentRecord,
        errors: &[ValidationError],
    ) -> Self {
        let by_path: HashMap<&str, String> = errors
            .iter()
            .map(|e| (e.path.as_str(), e.to_string()))
            .collect();

        let fields = schema
            .fields
            .iter()
            .map(|spec| {
                FieldView::new(
                    spec,
                    format!("f.{}", spec.key),
                    record.get(&spec.key),
                    by_path.get(spec.key.as_str()).cloned(),
                )
            })
            .collect();

        let lists = schema
            .lists
            .iter()
            .map(|list| list_view(list, record, &by_path))
            .collect();

        Self {
            fields,
            lists,
            extra_json: extra_json(&record.extra),
            can_submit: errors.is_empty(),
            errors: messages(errors),
            multipart: schema.has_images(),
        }
    }
}

fn list_view(list: &ListSpec, record: &ContentRecord, by_path: &HashMap<&str, String>) -> ListView {
    let items = record.items(&list.key);
    let views = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let prefix = format!("l.{}.{index}", list.key);
            let fields = list
                .fields
                .iter()
                .map(|spec| {
                    let path = format!("{}.{index}.{}", list.key, spec.key);
                    FieldView::new(
                        spec,
                        format!("{prefix}.{}", spec.key),
                        item.get(&spec.key),
                        by_path.get(path.as_str()).cloned(),
                    )
                })
                .collect();
            ListItemView {
                id: item.id.to_string(),
                heading: format!("{} {}", list.item_label, index + 1),
                prefix,
                fields,
                extra_json: extra_json(&item.extra),
            }
        })
        .collect();

    ListView {
        key: list.key.clone(),
        label: list.label.clone(),
        item_label: list.item_label.clone(),
        items: views,
        can_add: list.can_add(items.len()),
        can_remove: list.can_remove(items.len()),
        error: by_path.get(list.key.as_str()).cloned(),
    }
}

fn extra_json(extra: &Map<String, Value>) -> String {
    if extra.is_empty() {
        String::new()
    } else {
        Value::Object(extra.clone()).to_string()
    }
}
