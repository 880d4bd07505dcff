//! Arena-based document tree.
//!
//! All nodes of a [`Document`] live in a single `Vec` owned by the document
//! and are addressed by [`NodeId`]. Parent links are plain indices, so a node
//! never keeps its ancestors alive and there are no reference cycles.
//!
//! Every structural mutation goes through `&mut Document`, which keeps the
//! parent/children links consistent in both directions.
//!
//! # Panics
//!
//! Accessors index the arena directly: passing a `NodeId` obtained from a
//! different `Document` panics or addresses an unrelated node.

use std::cmp::Ordering;
use std::fmt;

use crate::attribute::Attribute;
use crate::error::ValidationError;
use crate::serial;
use crate::transform::ChildComparator;

pub const DEFAULT_VERSION: &str = "1.0";
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// A typed index into the document's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Panics once the arena outgrows `u32` ids.
    fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("node arena exceeds u32::MAX entries"))
    }

    fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw arena index, stable for the lifetime of the document.
    #[must_use]
    pub fn into_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Storage for a single node in the arena.
#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    text: Option<String>,
    attributes: Vec<Attribute>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

/// Returns true if `tag` is a valid tag (or attribute) name.
///
/// Non-empty, starting with a letter or `_`, followed by letters, digits,
/// `.`, `_` or `-`.
pub fn is_valid_tag_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Returns true if `text` is acceptable tag text. Absent text is always valid.
pub fn is_valid_tag_text(text: Option<&str>) -> bool {
    text.is_none_or(|t| !t.trim().is_empty() && !t.contains('<'))
}

/// An XML-like document: a node arena, an optional root and the declaration
/// values emitted when rendering.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: Option<NodeId>,
    version: String,
    encoding: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty document with the default declaration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(16),
            root: None,
            version: DEFAULT_VERSION.to_string(),
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }

    /// Creates an empty document with an explicit declaration.
    pub fn with_declaration(version: &str, encoding: &str) -> Result<Self, ValidationError> {
        let mut doc = Self::new();
        doc.set_version(version)?;
        doc.set_encoding(encoding)?;
        Ok(doc)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Declaration values follow the attribute-value grammar.
    pub fn set_version(&mut self, version: &str) -> Result<(), ValidationError> {
        if !Attribute::is_valid_value(version) {
            return Err(ValidationError::InvalidAttributeValue(version.to_string()));
        }
        self.version = version.to_string();
        Ok(())
    }

    pub fn set_encoding(&mut self, encoding: &str) -> Result<(), ValidationError> {
        if !Attribute::is_valid_value(encoding) {
            return Err(ValidationError::InvalidAttributeValue(encoding.to_string()));
        }
        self.encoding = encoding.to_string();
        Ok(())
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Makes `id` the document root. The node must not have a parent.
    pub fn set_root(&mut self, id: NodeId) -> Result<(), ValidationError> {
        if self.parent(id).is_some() {
            return Err(ValidationError::NotARoot(id.into_raw()));
        }
        self.root = Some(id);
        Ok(())
    }

    /// Creates a parentless node and makes it the document root.
    pub fn create_root(&mut self, tag: &str, text: Option<&str>) -> Result<NodeId, ValidationError> {
        let id = self.create_node(tag, text, None)?;
        self.root = Some(id);
        Ok(id)
    }

    /// Number of nodes ever allocated, including detached ones.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Creates a node, validating tag and text.
    ///
    /// When `parent` is given the new node is appended to its children. On
    /// error nothing is allocated or attached.
    pub fn create_node(
        &mut self,
        tag: &str,
        text: Option<&str>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, ValidationError> {
        if !is_valid_tag_name(tag) {
            return Err(ValidationError::InvalidTagName(tag.to_string()));
        }
        if !is_valid_tag_text(text) {
            return Err(ValidationError::InvalidTagText(
                text.unwrap_or_default().to_string(),
            ));
        }

        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(NodeData {
            tag: tag.to_string(),
            text: text.map(str::to_string),
            attributes: Vec::new(),
            children: Vec::new(),
            parent,
        });
        if let Some(parent) = parent {
            self.data_mut(parent).children.push(id);
        }
        Ok(id)
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.index()]
    }

    /// Read-only view of a node.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { doc: self, id }
    }

    pub fn tag(&self, id: NodeId) -> &str {
        &self.data(id).tag
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.data(id).text.as_deref()
    }

    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        &self.data(id).attributes
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&Attribute> {
        self.data(id).attributes.iter().find(|a| a.name() == name)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.data(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).parent
    }

    pub fn set_tag(&mut self, id: NodeId, tag: &str) -> Result<(), ValidationError> {
        if !is_valid_tag_name(tag) {
            return Err(ValidationError::InvalidTagName(tag.to_string()));
        }
        self.data_mut(id).tag = tag.to_string();
        Ok(())
    }

    pub fn set_text(&mut self, id: NodeId, text: Option<&str>) -> Result<(), ValidationError> {
        if !is_valid_tag_text(text) {
            return Err(ValidationError::InvalidTagText(
                text.unwrap_or_default().to_string(),
            ));
        }
        self.data_mut(id).text = text.map(str::to_string);
        Ok(())
    }

    /// Appends an attribute.
    ///
    /// Returns `Ok(false)` without changes if the name is already present.
    pub fn add_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: &str,
    ) -> Result<bool, ValidationError> {
        let attribute = Attribute::new(name, value)?;
        let attributes = &mut self.data_mut(id).attributes;
        if attributes.iter().any(|a| a.name() == name) {
            return Ok(false);
        }
        attributes.push(attribute);
        Ok(true)
    }

    /// Renames an attribute in place, keeping its position.
    ///
    /// Returns `Ok(false)` if `old` is absent or `new` belongs to another
    /// attribute of the same node.
    pub fn rename_attribute(
        &mut self,
        id: NodeId,
        old: &str,
        new: &str,
    ) -> Result<bool, ValidationError> {
        if !Attribute::is_valid_name(new) {
            return Err(ValidationError::InvalidAttributeName(new.to_string()));
        }
        let attributes = &mut self.data_mut(id).attributes;
        let Some(position) = attributes.iter().position(|a| a.name() == old) else {
            return Ok(false);
        };
        if old != new && attributes.iter().any(|a| a.name() == new) {
            return Ok(false);
        }
        attributes[position].set_name(new)?;
        Ok(true)
    }

    /// Replaces the value of an existing attribute.
    pub fn set_attribute_value(
        &mut self,
        id: NodeId,
        name: &str,
        value: &str,
    ) -> Result<bool, ValidationError> {
        if !Attribute::is_valid_value(value) {
            return Err(ValidationError::InvalidAttributeValue(value.to_string()));
        }
        match self
            .data_mut(id)
            .attributes
            .iter_mut()
            .find(|a| a.name() == name)
        {
            Some(attribute) => {
                attribute.set_value(value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
        let attributes = &mut self.data_mut(id).attributes;
        match attributes.iter().position(|a| a.name() == name) {
            Some(position) => {
                attributes.remove(position);
                true
            }
            None => false,
        }
    }

    /// Detaches `child` from `parent`.
    ///
    /// Returns false if `child` is not a direct child of `parent`. The
    /// detached subtree keeps its own descendants.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let children = &mut self.data_mut(parent).children;
        let Some(position) = children.iter().position(|&c| c == child) else {
            return false;
        };
        children.remove(position);
        self.data_mut(child).parent = None;
        true
    }

    /// Stable sort of the direct children of `id`.
    pub fn sort_children(&mut self, id: NodeId, comparator: &ChildComparator) {
        self.sort_children_by(id, |a, b| comparator.compare(a, b));
    }

    pub fn sort_children_by<F>(&mut self, id: NodeId, mut compare: F)
    where
        F: FnMut(NodeRef<'_>, NodeRef<'_>) -> Ordering,
    {
        let mut children = std::mem::take(&mut self.data_mut(id).children);
        children.sort_by(|&a, &b| compare(self.node(a), self.node(b)));
        self.data_mut(id).children = children;
    }

    /// Height of the subtree rooted at `id`: 0 for a leaf.
    pub fn height(&self, id: NodeId) -> usize {
        self.children(id)
            .iter()
            .map(|&c| self.height(c) + 1)
            .max()
            .unwrap_or(0)
    }

    /// Every node of the subtree in post order: children left to right, each
    /// subtree before its root, `start` last.
    pub fn post_order(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        self.collect_post_order(start, &mut order);
        order
    }

    fn collect_post_order(&self, id: NodeId, order: &mut Vec<NodeId>) {
        for &child in self.children(id) {
            self.collect_post_order(child, order);
        }
        order.push(id);
    }

    /// Applies `visitor` to every node of the subtree in post order.
    ///
    /// The order is fixed before the first call, so the visitor may detach or
    /// rename nodes without disturbing the traversal.
    pub fn visit_post_order<F>(&mut self, start: NodeId, mut visitor: F)
    where
        F: FnMut(&mut Document, NodeId),
    {
        for id in self.post_order(start) {
            visitor(self, id);
        }
    }

    /// Fallible variant of [`visit_post_order`](Self::visit_post_order);
    /// stops at the first error.
    pub fn try_visit_post_order<F, E>(&mut self, start: NodeId, mut visitor: F) -> Result<(), E>
    where
        F: FnMut(&mut Document, NodeId) -> Result<(), E>,
    {
        for id in self.post_order(start) {
            visitor(self, id)?;
        }
        Ok(())
    }

    /// Canonical text form of the subtree rooted at `id`.
    pub fn render(&self, id: NodeId) -> String {
        serial::render(self, id)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serial::render_document(self))
    }
}

/// A borrowed, read-only view of one node.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tag(&self) -> &'a str {
        self.doc.tag(self.id)
    }

    pub fn text(&self) -> Option<&'a str> {
        self.doc.text(self.id)
    }

    pub fn attributes(&self) -> &'a [Attribute] {
        self.doc.attributes(self.id)
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.doc.attribute(self.id, name).map(Attribute::value)
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + use<'a> {
        let doc = self.doc;
        doc.children(self.id).iter().map(move |&id| doc.node(id))
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.doc.parent(self.id).map(|id| self.doc.node(id))
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("tag", &self.tag())
            .field("text", &self.text())
            .field("attributes", &self.attributes())
            .finish()
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.doc.render(self.id))
    }
}
