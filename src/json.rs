//! [`Mappable`] view over `serde_json` values.
//!
//! Keys prefixed with `@` become attributes and `#text` becomes the tag text.
//! Every other key becomes child elements tagged with the key: objects
//! recurse, arrays produce one child per item, scalars become leaves.
//! `null` values are skipped.

use serde_json::Value;

use crate::error::Result;
use crate::schema::{AttributeRole, FieldValue, Mappable, Schema};
use crate::tree::Document;

const ATTRIBUTE_PREFIX: char = '@';
const TEXT_KEY: &str = "#text";

/// A JSON value presented as an element named `tag`.
#[derive(Debug, Clone, Copy)]
pub struct JsonElement<'a> {
    tag: &'a str,
    value: &'a Value,
}

impl<'a> JsonElement<'a> {
    pub fn new(tag: &'a str, value: &'a Value) -> Self {
        Self { tag, value }
    }

    pub fn tag(&self) -> &'a str {
        self.tag
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    fn child_value(&self, key: &'a str, value: &'a Value) -> FieldValue<'a> {
        match value {
            Value::Object(_) => FieldValue::Object(Box::new(JsonElement::new(key, value))),
            Value::Array(items) => {
                FieldValue::Sequence(items.iter().map(|item| self.child_value(key, item)).collect())
            }
            other => scalar(other),
        }
    }
}

fn scalar(value: &Value) -> FieldValue<'_> {
    match value {
        Value::Null => FieldValue::Null,
        Value::String(s) => FieldValue::Scalar(s.clone()),
        Value::Bool(b) => (*b).into(),
        Value::Number(n) => FieldValue::Scalar(n.to_string()),
        Value::Array(items) => FieldValue::Sequence(items.iter().map(scalar).collect()),
        Value::Object(_) => FieldValue::Object(Box::new(JsonElement::new("", value))),
    }
}

impl Mappable for JsonElement<'_> {
    fn type_name(&self) -> &str {
        self.tag
    }

    /// Only objects carry a schema.
    fn schema(&self) -> Option<Schema> {
        let map = self.value.as_object()?;
        let schema = map.keys().fold(Schema::new(self.tag), |schema, key| {
            if key == TEXT_KEY {
                schema.tag_text(key)
            } else if let Some(name) = key.strip_prefix(ATTRIBUTE_PREFIX) {
                schema.attribute_with(key, AttributeRole::new().name(name))
            } else {
                schema.element(key)
            }
        });
        Some(schema)
    }

    fn field_value(&self, field: &str) -> FieldValue<'_> {
        let Some((key, value)) = self.value.as_object().and_then(|map| map.get_key_value(field))
        else {
            return FieldValue::Null;
        };
        if key == TEXT_KEY || key.starts_with(ATTRIBUTE_PREFIX) {
            scalar(value)
        } else {
            self.child_value(key, value)
        }
    }
}

impl Document {
    /// Parses `json` and maps it under a root element named `tag`.
    pub fn from_json(tag: &str, json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let mut doc = Self::new();
        let root = doc.map_object(&JsonElement::new(tag, &value), None)?;
        doc.set_root(root)?;
        Ok(doc)
    }
}
