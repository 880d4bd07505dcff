//! Fluent construction of node trees.
//!
//! ```
//! use xml_forge::{Document, ElementBuilder};
//!
//! let doc = Document::from_builder(
//!     ElementBuilder::new("plano")
//!         .child(ElementBuilder::new("curso").text("Mestrado em Engenharia Informática"))
//!         .child(ElementBuilder::new("fuc").attribute("codigo", "M4310")),
//! )
//! .unwrap();
//! assert!(doc.to_string().contains("<fuc codigo=\"M4310\"/>"));
//! ```

use crate::error::ValidationError;
use crate::tree::{Document, NodeId};

/// A declarative description of an element and its subtree.
///
/// Nothing is validated until [`build`](Self::build).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementBuilder {
    tag: String,
    text: Option<String>,
    attributes: Vec<(String, String)>,
    children: Vec<ElementBuilder>,
}

impl ElementBuilder {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.children.push(child);
        self
    }

    pub fn children<I: IntoIterator<Item = ElementBuilder>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }

    /// Creates the described subtree under `parent`.
    ///
    /// Duplicate attribute names keep the first value. Stops at the first
    /// invalid tag, text or attribute; nodes created before it stay attached.
    pub fn build(&self, doc: &mut Document, parent: Option<NodeId>) -> Result<NodeId, ValidationError> {
        let id = doc.create_node(&self.tag, self.text.as_deref(), parent)?;
        for (name, value) in &self.attributes {
            doc.add_attribute(id, name, value)?;
        }
        for child in &self.children {
            child.build(doc, Some(id))?;
        }
        Ok(id)
    }
}

impl Document {
    /// Builds a new document rooted at the element described by `root`.
    pub fn from_builder(root: ElementBuilder) -> Result<Self, ValidationError> {
        let mut doc = Self::new();
        let id = root.build(&mut doc, None)?;
        doc.set_root(id)?;
        Ok(doc)
    }
}
