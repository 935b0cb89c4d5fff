//! Field schemas describing each editable section.
//!
//! A [`SectionSchema`] is the single description of a form: which scalar
//! fields it has, which repeatable lists it has, and the `required` /
//! `max_length` constraints the validator enforces. The admin renders forms
//! from it and normalises backend records against it.

use serde::{Deserialize, Serialize};

use super::area::ContentArea;

/// Input type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text input.
    Text,
    /// Multi-line text area.
    TextArea,
    /// Image: uploaded file (stored as a data URI) or pasted URL.
    Image,
    /// Dropdown restricted to [`FieldSpec::options`].
    Select,
}

/// Option for select fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Value stored in the record.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl SelectOption {
    /// Create a new select option.
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// One named field of a section or of a list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Key in the backend record.
    pub key: String,
    /// Form label.
    pub label: String,
    /// Input type.
    pub kind: FieldKind,
    /// Whether a non-blank value is required.
    pub required: bool,
    /// Maximum length in characters.
    pub max_length: Option<usize>,
    /// Options for [`FieldKind::Select`].
    pub options: Vec<SelectOption>,
    /// Help text shown under the input.
    pub help: Option<String>,
}

impl FieldSpec {
    fn new(key: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            max_length: None,
            options: vec![],
            help: None,
        }
    }

    /// Single-line text field.
    #[must_use]
    pub fn text(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    /// Multi-line text field.
    #[must_use]
    pub fn textarea(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::TextArea)
    }

    /// Image field.
    #[must_use]
    pub fn image(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::Image)
    }

    /// Select field.
    #[must_use]
    pub fn select(key: &str, label: &str, options: Vec<SelectOption>) -> Self {
        Self {
            options,
            ..Self::new(key, label, FieldKind::Select)
        }
    }

    /// Mark the field as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Limit the field length.
    #[must_use]
    pub const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Attach help text.
    #[must_use]
    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }
}

/// A repeatable list of items inside a section (testimonials, key points...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSpec {
    /// Key of the array in the backend record.
    pub key: String,
    /// Heading for the list.
    pub label: String,
    /// Label for a single item ("Testimonial", "Link"...).
    pub item_label: String,
    /// Fields of every item.
    pub fields: Vec<FieldSpec>,
    /// Minimum number of items.
    pub min_items: usize,
    /// Maximum number of items.
    pub max_items: Option<usize>,
    /// Items are plain strings on the wire rather than objects.
    ///
    /// Only valid with exactly one field.
    pub scalar_items: bool,
}

impl ListSpec {
    /// Create a list of object items.
    #[must_use]
    pub fn new(key: &str, label: &str, item_label: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            item_label: item_label.to_string(),
            fields,
            min_items: 0,
            max_items: None,
            scalar_items: false,
        }
    }

    /// Create a list whose items are bare strings on the wire.
    #[must_use]
    pub fn scalar(key: &str, label: &str, item: FieldSpec) -> Self {
        let item_label = item.label.clone();
        Self {
            scalar_items: true,
            ..Self::new(key, label, &item_label, vec![item])
        }
    }

    /// Require at least `min` items.
    #[must_use]
    pub const fn min_items(mut self, min: usize) -> Self {
        self.min_items = min;
        self
    }

    /// Allow at most `max` items.
    #[must_use]
    pub const fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Whether another item may be added to a list of `len` items.
    #[must_use]
    pub fn can_add(&self, len: usize) -> bool {
        self.max_items.is_none_or(|max| len < max)
    }

    /// Whether an item may be removed from a list of `len` items.
    #[must_use]
    pub const fn can_remove(&self, len: usize) -> bool {
        len > self.min_items
    }
}

/// Complete form description for one editable content area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSchema {
    /// Area this schema describes.
    pub area: ContentArea,
    /// Scalar fields.
    pub fields: Vec<FieldSpec>,
    /// Repeatable lists.
    pub lists: Vec<ListSpec>,
}

impl SectionSchema {
    /// Create an empty schema for an area.
    #[must_use]
    pub const fn new(area: ContentArea) -> Self {
        Self {
            area,
            fields: vec![],
            lists: vec![],
        }
    }

    /// Add a scalar field.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a repeatable list.
    #[must_use]
    pub fn list(mut self, list: ListSpec) -> Self {
        self.lists.push(list);
        self
    }

    /// Find a scalar field by key.
    #[must_use]
    pub fn find_field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Find a list by key.
    #[must_use]
    pub fn find_list(&self, key: &str) -> Option<&ListSpec> {
        self.lists.iter().find(|l| l.key == key)
    }

    /// Whether any field, at any depth, is an image.
    #[must_use]
    pub fn has_images(&self) -> bool {
        self.fields
            .iter()
            .chain(self.lists.iter().flat_map(|l| l.fields.iter()))
            .any(|f| f.kind == FieldKind::Image)
    }

    /// Most image values one submission of this form can carry.
    ///
    /// Lists without `max_items` are counted as `unbounded_items` long.
    #[must_use]
    pub fn image_slots(&self, unbounded_items: usize) -> usize {
        let images = |fields: &[FieldSpec]| {
            fields.iter().filter(|f| f.kind == FieldKind::Image).count()
        };
        self.lists.iter().fold(images(&self.fields), |slots, list| {
            let items = list.max_items.unwrap_or(unbounded_items);
            slots.saturating_add(images(&list.fields).saturating_mul(items))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_builder() {
        let field = FieldSpec::text("title", "Title").required().max_length(80);
        assert_eq!(field.kind, FieldKind::Text);
        assert!(field.required);
        assert_eq!(field.max_length, Some(80));
    }

    #[test]
    fn test_scalar_list_takes_item_label() {
        let list = ListSpec::scalar("points", "Key points", FieldSpec::text("point", "Point"));
        assert!(list.scalar_items);
        assert_eq!(list.item_label, "Point");
        assert_eq!(list.fields.len(), 1);
    }

    #[test]
    fn test_list_bounds() {
        let list = ListSpec::new("items", "Items", "Item", vec![])
            .min_items(1)
            .max_items(3);
        assert!(list.can_add(2));
        assert!(!list.can_add(3));
        assert!(list.can_remove(2));
        assert!(!list.can_remove(1));
    }

    #[test]
    fn test_has_images_looks_inside_lists() {
        let schema = SectionSchema::new(ContentArea::Testimonials).list(ListSpec::new(
            "testimonials",
            "Testimonials",
            "Testimonial",
            vec![FieldSpec::image("photo", "Photo")],
        ));
        assert!(schema.has_images());
        assert!(!SectionSchema::new(ContentArea::Navigation).has_images());
    }

    #[test]
    fn test_image_slots_count_list_items() {
        let schema = SectionSchema::new(ContentArea::Testimonials)
            .field(FieldSpec::image("banner", "Banner"))
            .list(ListSpec::new(
                "testimonials",
                "Testimonials",
                "Testimonial",
                vec![FieldSpec::image("photo", "Photo"), FieldSpec::text("name", "Name")],
            ))
            .list(
                ListSpec::new("logos", "Logos", "Logo", vec![FieldSpec::image("logo", "Logo")])
                    .max_items(3),
            );
        assert_eq!(schema.image_slots(10), 1 + 10 + 3);
        assert_eq!(SectionSchema::new(ContentArea::Navigation).image_slots(10), 0);
    }
}
