//! Content records: the form state of one section.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::schema::{ListSpec, SectionSchema};
use crate::types::ListItemId;

/// One item of a repeatable list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Locally minted identity.
    pub id: ListItemId,
    /// Field values by key.
    pub fields: BTreeMap<String, String>,
    /// Backend keys the schema does not know about, sent back untouched.
    #[serde(default)]
    pub extra: Map<String, Value>,
}

impl ListItem {
    /// An item with every field of `list` set to `""`.
    #[must_use]
    pub fn empty(list: &ListSpec) -> Self {
        Self {
            id: ListItemId::new(),
            fields: list
                .fields
                .iter()
                .map(|f| (f.key.clone(), String::new()))
                .collect(),
            extra: Map::new(),
        }
    }

    /// Value of a field, `""` when absent.
    #[must_use]
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map_or("", String::as_str)
    }
}

/// Editable copy of one content area.
///
/// Records built through [`ContentRecord::from_json`] or
/// [`ContentRecord::normalized`] always contain every field and list the
/// schema names, so forms never see a missing value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Scalar field values by key.
    pub fields: BTreeMap<String, String>,
    /// Repeatable lists by key.
    pub lists: BTreeMap<String, Vec<ListItem>>,
    /// Backend keys the schema does not know about, sent back untouched.
    #[serde(default)]
    pub extra: Map<String, Value>,
}

impl ContentRecord {
    /// An empty, normalised record.
    #[must_use]
    pub fn empty(schema: &SectionSchema) -> Self {
        Self::default().normalized(schema)
    }

    /// Map a backend object onto the schema.
    ///
    /// Numbers and booleans become strings, `null` becomes `""`, anything
    /// that is not an object yields an empty record.
    #[must_use]
    pub fn from_json(schema: &SectionSchema, value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::empty(schema);
        };

        let mut record = Self::default();
        for (key, value) in object {
            if schema.find_field(key).is_some() {
                record.fields.insert(key.clone(), scalar_to_string(value));
            } else if let Some(list) = schema.find_list(key) {
                let items: Vec<ListItem> = value
                    .as_array()
                    .map(|items| items.iter().map(|item| item_from_json(list, item)).collect())
                    .unwrap_or_default();
                record.lists.insert(key.clone(), items);
            } else {
                record.extra.insert(key.clone(), value.clone());
            }
        }
        record.normalized(schema)
    }

    /// Serialise back to the shape the backend expects.
    #[must_use]
    pub fn to_json(&self, schema: &SectionSchema) -> Value {
        let mut object = self.extra.clone();
        for field in &schema.fields {
            object.insert(field.key.clone(), Value::String(self.get(&field.key).to_owned()));
        }
        for list in &schema.lists {
            let items = self
                .items(&list.key)
                .iter()
                .map(|item| item_to_json(list, item))
                .collect();
            object.insert(list.key.clone(), Value::Array(items));
        }
        Value::Object(object)
    }

    /// Fill in every field and list the schema names.
    #[must_use]
    pub fn normalized(mut self, schema: &SectionSchema) -> Self {
        for field in &schema.fields {
            self.fields.entry(field.key.clone()).or_default();
        }
        for list in &schema.lists {
            let items = self.lists.entry(list.key.clone()).or_default();
            for item in items.iter_mut() {
                for field in &list.fields {
                    item.fields.entry(field.key.clone()).or_default();
                }
            }
        }
        self
    }

    /// Value of a scalar field, `""` when absent.
    #[must_use]
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map_or("", String::as_str)
    }

    /// Set a scalar field.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.fields.insert(key.to_owned(), value.into());
    }

    /// Items of a list, empty when absent.
    #[must_use]
    pub fn items(&self, key: &str) -> &[ListItem] {
        self.lists.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Append an empty item to a list, honouring `max_items`.
    ///
    /// Returns the new item's id, or `None` when the list is full.
    pub fn add_item(&mut self, list: &ListSpec) -> Option<ListItemId> {
        let items = self.lists.entry(list.key.clone()).or_default();
        if !list.can_add(items.len()) {
            return None;
        }
        let item = ListItem::empty(list);
        let id = item.id;
        items.push(item);
        Some(id)
    }

    /// Remove an item from a list, honouring `min_items`.
    ///
    /// Returns `false` when the item does not exist or the list is at its minimum.
    pub fn remove_item(&mut self, list: &ListSpec, id: ListItemId) -> bool {
        let Some(items) = self.lists.get_mut(&list.key) else {
            return false;
        };
        if !list.can_remove(items.len()) {
            return false;
        }
        let before = items.len();
        items.retain(|item| item.id != id);
        items.len() != before
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn item_from_json(list: &ListSpec, value: &Value) -> ListItem {
    let mut item = ListItem {
        id: ListItemId::new(),
        fields: BTreeMap::new(),
        extra: Map::new(),
    };

    match value {
        Value::Object(object) => {
            for (key, value) in object {
                if list.fields.iter().any(|f| &f.key == key) {
                    item.fields.insert(key.clone(), scalar_to_string(value));
                } else {
                    item.extra.insert(key.clone(), value.clone());
                }
            }
        }
        scalar => {
            if let Some(field) = list.fields.first() {
                item.fields.insert(field.key.clone(), scalar_to_string(scalar));
            }
        }
    }
    item
}

fn item_to_json(list: &ListSpec, item: &ListItem) -> Value {
    if list.scalar_items {
        let value = list.fields.first().map_or("", |f| item.get(&f.key));
        return Value::String(value.to_owned());
    }

    let mut object = item.extra.clone();
    for field in &list.fields {
        object.insert(field.key.clone(), Value::String(item.get(&field.key).to_owned()));
    }
    Value::Object(object)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::content::area::ContentArea;
    use crate::content::schema::FieldSpec;

    fn about_schema() -> SectionSchema {
        SectionSchema::new(ContentArea::AboutUs)
            .field(FieldSpec::text("title", "Title").required())
            .field(FieldSpec::text("founded", "Founded"))
            .list(ListSpec::scalar("keyPoints", "Key points", FieldSpec::text("point", "Point")).max_items(2))
            .list(ListSpec::new(
                "team",
                "Team",
                "Member",
                vec![FieldSpec::text("name", "Name"), FieldSpec::image("photo", "Photo")],
            ))
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let schema = about_schema();
        let record = ContentRecord::from_json(&schema, &json!({ "title": "About" }));

        assert_eq!(record.get("title"), "About");
        assert_eq!(record.fields.get("founded").map(String::as_str), Some(""));
        assert!(record.lists.contains_key("keyPoints"));
        assert!(record.lists.contains_key("team"));
    }

    #[test]
    fn test_from_json_stringifies_scalars() {
        let schema = about_schema();
        let record = ContentRecord::from_json(&schema, &json!({ "title": null, "founded": 1998 }));
        assert_eq!(record.get("title"), "");
        assert_eq!(record.get("founded"), "1998");
    }

    #[test]
    fn test_from_json_normalises_list_items() {
        let schema = about_schema();
        let record = ContentRecord::from_json(
            &schema,
            &json!({ "team": [{ "name": "Ada", "_id": "x1" }], "keyPoints": ["Fast", "Local"] }),
        );

        let team = record.items("team");
        assert_eq!(team.len(), 1);
        assert_eq!(team[0].get("name"), "Ada");
        assert_eq!(team[0].fields.get("photo").map(String::as_str), Some(""));
        assert_eq!(team[0].extra.get("_id"), Some(&json!("x1")));

        let points = record.items("keyPoints");
        assert_eq!(points[1].get("point"), "Local");
    }

    #[test]
    fn test_to_json_preserves_unknown_keys_and_scalar_lists() {
        let schema = about_schema();
        let input = json!({
            "_id": "abc",
            "title": "About",
            "keyPoints": ["Fast"],
            "team": [{ "name": "Ada", "photo": "", "_id": "x1" }]
        });
        let output = ContentRecord::from_json(&schema, &input).to_json(&schema);

        assert_eq!(output["_id"], json!("abc"));
        assert_eq!(output["keyPoints"], json!(["Fast"]));
        assert_eq!(output["team"][0]["_id"], json!("x1"));
        assert_eq!(output["founded"], json!(""));
    }

    #[test]
    fn test_non_object_yields_empty_record() {
        let schema = about_schema();
        let record = ContentRecord::from_json(&schema, &json!([1, 2, 3]));
        assert_eq!(record, ContentRecord::empty(&schema));
    }

    #[test]
    fn test_add_item_respects_max() {
        let schema = about_schema();
        let list = schema.find_list("keyPoints").unwrap();
        let mut record = ContentRecord::empty(&schema);

        assert!(record.add_item(list).is_some());
        assert!(record.add_item(list).is_some());
        assert!(record.add_item(list).is_none());
        assert_eq!(record.items("keyPoints").len(), 2);
    }

    #[test]
    fn test_remove_item() {
        let schema = about_schema();
        let list = schema.find_list("team").unwrap();
        let mut record = ContentRecord::empty(&schema);
        let id = record.add_item(list).unwrap();

        assert!(!record.remove_item(list, ListItemId::new()));
        assert!(record.remove_item(list, id));
        assert!(record.items("team").is_empty());
    }
}
