//! Schema-driven object → tree mapping.
//!
//! [`map`] first walks the whole object graph reachable through element
//! fields and checks every schema it meets, so configuration problems are
//! reported before the first node is created. Only the mapped object itself
//! must carry a schema; nested values without one become leaves. Construction itself is not
//! transactional: a validation error halfway leaves the nodes created so far
//! attached.

use log::{debug, trace, warn};

use crate::error::{ConfigurationError, MappingResult};
use crate::schema::{ElementRole, Field, FieldValue, Mappable, Role, Schema};
use crate::tree::{Document, NodeId};

/// Maps `object` into `doc`, attaching the resulting element to `parent`.
///
/// Returns the id of the element created for `object`.
pub fn map(doc: &mut Document, object: &dyn Mappable, parent: Option<NodeId>) -> MappingResult<NodeId> {
    let schema = validate(object)?;
    build(doc, object, &schema, parent)
}

/// Checks `object` and everything reachable from its element fields.
///
/// Returns the object's own schema on success.
pub fn validate(object: &dyn Mappable) -> Result<Schema, ConfigurationError> {
    let type_name = object.type_name();
    let schema = object
        .schema()
        .ok_or_else(|| ConfigurationError::MissingSchema {
            type_name: type_name.to_string(),
        })?;
    validate_described(object, &schema)?;
    Ok(schema)
}

fn validate_described(object: &dyn Mappable, schema: &Schema) -> Result<(), ConfigurationError> {
    validate_schema(object.type_name(), schema)?;
    validate_values(object, schema)
}

/// Role exclusivity and the single tag-text rule.
pub fn validate_schema(type_name: &str, schema: &Schema) -> Result<(), ConfigurationError> {
    if let Some(field) = schema.fields.iter().find(|f| f.roles.len() > 1) {
        return Err(ConfigurationError::ConflictingRoles {
            type_name: type_name.to_string(),
            field: field.name.clone(),
        });
    }
    let tag_text: Vec<String> = schema
        .fields
        .iter()
        .filter(|f| f.is_tag_text())
        .map(|f| f.name.clone())
        .collect();
    if tag_text.len() > 1 {
        return Err(ConfigurationError::MultipleTagText {
            type_name: type_name.to_string(),
            fields: tag_text,
        });
    }
    Ok(())
}

fn validate_values(object: &dyn Mappable, schema: &Schema) -> Result<(), ConfigurationError> {
    for field in &schema.fields {
        match field.single_role() {
            Some(Role::Attribute(_) | Role::TagText) => {
                let value = object.field_value(&field.name);
                if !matches!(value, FieldValue::Null | FieldValue::Scalar(_)) {
                    return Err(unsupported(object, field, &value));
                }
            }
            Some(Role::Element(_)) => validate_element_value(&object.field_value(&field.name))?,
            None => {}
        }
    }
    Ok(())
}

fn validate_element_value(value: &FieldValue<'_>) -> Result<(), ConfigurationError> {
    match value {
        FieldValue::Null | FieldValue::Scalar(_) => Ok(()),
        FieldValue::Object(object) => match object.schema() {
            Some(schema) => validate_described(&**object, &schema),
            None => Ok(()),
        },
        FieldValue::Sequence(items) => items.iter().try_for_each(validate_element_value),
    }
}

fn unsupported(object: &dyn Mappable, field: &Field, value: &FieldValue<'_>) -> ConfigurationError {
    ConfigurationError::UnsupportedValue {
        type_name: object.type_name().to_string(),
        field: field.name.clone(),
        found: value.kind(),
    }
}

fn build(
    doc: &mut Document,
    object: &dyn Mappable,
    schema: &Schema,
    parent: Option<NodeId>,
) -> MappingResult<NodeId> {
    let type_name = object.type_name();
    let tag = schema.element_tag_name(type_name);
    debug!("Mapping {type_name} as <{tag}>");
    let root = doc.create_node(tag, None, parent)?;

    for field in &schema.fields {
        let Some(role) = field.single_role() else {
            trace!("Skipping {type_name}.{} (no role)", field.name);
            continue;
        };
        match role {
            Role::Attribute(attribute) => {
                let Some(value) = scalar_value(object, field)? else {
                    continue;
                };
                let name = non_empty(attribute.name.as_deref()).unwrap_or(&field.name);
                let value = attribute.transform.apply(&value);
                if !doc.add_attribute(root, name, &value)? {
                    warn!("Attribute {name} already set on <{tag}>, ignoring {type_name}.{}", field.name);
                }
            }
            Role::TagText => {
                if let Some(value) = scalar_value(object, field)? {
                    let text = schema.tag_text_transform.apply(&value);
                    doc.set_text(root, Some(&text))?;
                }
            }
            Role::Element(element) => {
                let child_tag = non_empty(element.tag_name.as_deref()).unwrap_or(&field.name);
                let attach = if element.create_parent {
                    doc.create_node(child_tag, None, Some(root))?
                } else {
                    root
                };
                attach_value(doc, object.field_value(&field.name), child_tag, element, attach)?;
            }
        }
    }

    if let Some(order) = &schema.child_order {
        doc.sort_children(root, order);
    }
    for transform in &schema.post_build {
        transform.apply(doc, root)?;
    }
    Ok(root)
}

fn non_empty(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.is_empty())
}

fn scalar_value(object: &dyn Mappable, field: &Field) -> MappingResult<Option<String>> {
    match object.field_value(&field.name) {
        FieldValue::Null => Ok(None),
        FieldValue::Scalar(value) => Ok(Some(value)),
        other => Err(unsupported(object, field, &other).into()),
    }
}

fn attach_value(
    doc: &mut Document,
    value: FieldValue<'_>,
    tag: &str,
    role: &ElementRole,
    attach: NodeId,
) -> MappingResult<()> {
    match value {
        FieldValue::Null => {}
        FieldValue::Scalar(text) => leaf(doc, tag, Some(&text), role, attach)?,
        FieldValue::Object(object) => match object.schema() {
            Some(schema) => {
                build(doc, &*object, &schema, Some(attach))?;
            }
            None => {
                trace!("{} has no schema, mapping it as <{tag}> text", object.type_name());
                leaf(doc, tag, object.to_scalar().as_deref(), role, attach)?;
            }
        },
        FieldValue::Sequence(items) => {
            for item in items {
                attach_value(doc, item, tag, role, attach)?;
            }
        }
    }
    Ok(())
}

fn leaf(
    doc: &mut Document,
    tag: &str,
    text: Option<&str>,
    role: &ElementRole,
    attach: NodeId,
) -> MappingResult<()> {
    let text = text.map(|text| role.text_transform.apply(text));
    doc.create_node(tag, text.as_deref(), Some(attach))?;
    Ok(())
}

impl Document {
    /// Builds a document whose root is the mapping of `object`.
    pub fn from_mappable(object: &dyn Mappable) -> MappingResult<Self> {
        let mut doc = Self::new();
        let root = map(&mut doc, object, None)?;
        doc.set_root(root)?;
        Ok(doc)
    }

    /// Maps `object` under `parent`; see [`map`].
    pub fn map_object(&mut self, object: &dyn Mappable, parent: Option<NodeId>) -> MappingResult<NodeId> {
        map(self, object, parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MappingError;
    use crate::schema::AttributeRole;
    use crate::transform::StringTransform;

    struct Plain;

    impl Mappable for Plain {
        fn schema(&self) -> Option<Schema> {
            None
        }

        fn to_scalar(&self) -> Option<String> {
            Some("plain".to_string())
        }

        fn field_value(&self, _field: &str) -> FieldValue<'_> {
            FieldValue::Null
        }
    }

    struct Configured {
        schema: Schema,
    }

    impl Mappable for Configured {
        fn type_name(&self) -> &str {
            "Configured"
        }

        fn schema(&self) -> Option<Schema> {
            Some(self.schema.clone())
        }

        fn field_value(&self, field: &str) -> FieldValue<'_> {
            match field {
                "inner" => FieldValue::object(&Plain),
                "many" => FieldValue::sequence(["a", "b"]),
                _ => "value".into(),
            }
        }
    }

    fn configured(schema: Schema) -> Configured {
        Configured { schema }
    }

    #[test]
    fn test_missing_schema_creates_nothing() {
        let mut doc = Document::new();
        let err = map(&mut doc, &Plain, None).unwrap_err();
        assert_eq!(
            err,
            MappingError::Configuration(ConfigurationError::MissingSchema {
                type_name: "Plain".to_string()
            })
        );
        assert_eq!(doc.node_count(), 0);
    }

    #[test]
    fn test_conflicting_roles() {
        let schema = Schema::new("c").field(
            Field::new("nome")
                .role(Role::TagText)
                .role(AttributeRole::new()),
        );
        let mut doc = Document::new();
        let err = map(&mut doc, &configured(schema), None).unwrap_err();
        assert!(matches!(
            err,
            MappingError::Configuration(ConfigurationError::ConflictingRoles { ref field, .. }) if field == "nome"
        ));
        assert_eq!(doc.node_count(), 0);
    }

    #[test]
    fn test_multiple_tag_text() {
        let schema = Schema::new("c").tag_text("a").tag_text("b");
        let err = validate(&configured(schema)).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MultipleTagText {
                type_name: "Configured".to_string(),
                fields: vec!["a".to_string(), "b".to_string()],
            }
        );
    }

    #[test]
    fn test_nested_value_without_schema_becomes_leaf() {
        let schema = Schema::new("c").attribute("codigo").element_with(
            "inner",
            ElementRole::new()
                .tag_name("interno")
                .text_transform(StringTransform::new(|s| s.to_uppercase())),
        );
        let doc = Document::from_mappable(&configured(schema)).unwrap();
        assert_eq!(
            doc.render(doc.root().unwrap()),
            "<c codigo=\"value\">\n\t<interno>PLAIN</interno>\n</c>"
        );
    }

    #[test]
    fn test_empty_role_names_fall_back_to_field_name() {
        let schema = Schema::new("p")
            .attribute_with("codigo", AttributeRole::new().name(""))
            .element_with("nome", ElementRole::new().tag_name(""));
        let doc = Document::from_mappable(&configured(schema)).unwrap();
        assert_eq!(
            doc.render(doc.root().unwrap()),
            "<p codigo=\"value\">\n\t<nome>value</nome>\n</p>"
        );
    }

    #[test]
    fn test_empty_names_set_directly_fall_back() {
        let attribute = AttributeRole {
            name: Some(String::new()),
            ..AttributeRole::new()
        };
        let element = ElementRole {
            tag_name: Some(String::new()),
            ..ElementRole::new()
        };
        let schema = Schema::new("p")
            .attribute_with("codigo", attribute)
            .element_with("nome", element);
        let doc = Document::from_mappable(&configured(schema)).unwrap();
        assert_eq!(
            doc.render(doc.root().unwrap()),
            "<p codigo=\"value\">\n\t<nome>value</nome>\n</p>"
        );
    }

    #[test]
    fn test_sequence_as_attribute_is_rejected() {
        let schema = Schema::new("c").attribute("many");
        let err = validate(&configured(schema)).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::UnsupportedValue { found: "sequence", .. }
        ));
    }

    #[test]
    fn test_scalar_sequence_becomes_leaves() {
        let schema = Schema::new("c").element_with(
            "many",
            ElementRole::new().tag_name("item").create_parent(true),
        );
        let doc = Document::from_mappable(&configured(schema)).unwrap();
        assert_eq!(
            doc.render(doc.root().unwrap()),
            "<c>\n\t<item>\n\t\t<item>a</item>\n\t\t<item>b</item>\n\t</item>\n</c>"
        );
    }

    #[test]
    fn test_invalid_leaf_tag_is_not_rolled_back() {
        let schema = Schema::new("c")
            .element("ok")
            .element_with("bad", ElementRole::new().tag_name("bad tag"));
        let mut doc = Document::new();
        let err = map(&mut doc, &configured(schema), None).unwrap_err();
        assert!(matches!(err, MappingError::Validation(_)));
        // root and the first leaf stay allocated and linked
        assert_eq!(doc.node_count(), 2);
    }
}
