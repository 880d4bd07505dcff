//! Validated name/value pairs attached to nodes.

use std::fmt;

use crate::error::ValidationError;
use crate::tree::is_valid_tag_name;

/// An attribute of a node.
///
/// The name follows the tag-name grammar and the value is non-blank with no
/// double quote. Both may only be replaced through the owning `Document`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    name: String,
    value: String,
}

impl Attribute {
    /// Creates an attribute, validating both name and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let value = value.into();
        if !Self::is_valid_name(&name) {
            return Err(ValidationError::InvalidAttributeName(name));
        }
        if !Self::is_valid_value(&value) {
            return Err(ValidationError::InvalidAttributeValue(value));
        }
        Ok(Self { name, value })
    }

    /// Attribute names share the tag-name grammar.
    pub fn is_valid_name(name: &str) -> bool {
        is_valid_tag_name(name)
    }

    /// A value is valid iff it is non-blank and contains no `"`.
    pub fn is_valid_value(value: &str) -> bool {
        !value.trim().is_empty() && !value.contains('"')
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        if !Self::is_valid_name(name) {
            return Err(ValidationError::InvalidAttributeName(name.to_string()));
        }
        self.name = name.to_string();
        Ok(())
    }

    pub(crate) fn set_value(&mut self, value: &str) -> Result<(), ValidationError> {
        if !Self::is_valid_value(value) {
            return Err(ValidationError::InvalidAttributeValue(value.to_string()));
        }
        self.value = value.to_string();
        Ok(())
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=\"{}\"", self.name, self.value)
    }
}
