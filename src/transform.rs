//! Pluggable transforms used by schema descriptors.
//!
//! Each capability is a single closure behind an `Arc`, so schemas can be
//! cloned and shared across threads; there is no registry.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::error::ValidationError;
use crate::tree::{Document, NodeId, NodeRef};

type StringFn = dyn Fn(&str) -> String + Send + Sync;
type NodeFn = dyn Fn(&mut Document, NodeId) -> Result<(), ValidationError> + Send + Sync;
type CompareFn = dyn Fn(NodeRef<'_>, NodeRef<'_>) -> Ordering + Send + Sync;

/// Rewrites a string, e.g. an attribute value or tag text.
#[derive(Clone, Default)]
pub struct StringTransform(Option<Arc<StringFn>>);

impl StringTransform {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Some(Arc::new(f)))
    }

    pub fn identity() -> Self {
        Self(None)
    }

    /// Appends a fixed suffix, e.g. `"%"`.
    pub fn suffix(suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        Self::new(move |s| format!("{s}{suffix}"))
    }

    pub fn is_identity(&self) -> bool {
        self.0.is_none()
    }

    pub fn apply(&self, input: &str) -> String {
        match &self.0 {
            Some(f) => f(input),
            None => input.to_string(),
        }
    }
}

impl fmt::Debug for StringTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            f.write_str("StringTransform(identity)")
        } else {
            f.write_str("StringTransform(..)")
        }
    }
}

/// Mutates a fully built node in place.
#[derive(Clone)]
pub struct NodeTransform(Arc<NodeFn>);

impl NodeTransform {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Document, NodeId) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn noop() -> Self {
        Self::new(|_, _| Ok(()))
    }

    /// Sorts the node's direct children with `comparator`.
    pub fn sort_children(comparator: ChildComparator) -> Self {
        Self::new(move |doc, id| {
            doc.sort_children(id, &comparator);
            Ok(())
        })
    }

    pub fn apply(&self, doc: &mut Document, id: NodeId) -> Result<(), ValidationError> {
        (self.0)(doc, id)
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for NodeTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NodeTransform(..)")
    }
}

/// Orders sibling nodes. Used with a stable sort, so `Equal` keeps insertion
/// order.
#[derive(Clone)]
pub struct ChildComparator(Arc<CompareFn>);

impl ChildComparator {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(NodeRef<'_>, NodeRef<'_>) -> Ordering + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Treats every pair as equal.
    pub fn insertion_order() -> Self {
        Self::new(|_, _| Ordering::Equal)
    }

    /// Alphabetical by tag name.
    pub fn by_tag() -> Self {
        Self::new(|a, b| a.tag().cmp(b.tag()))
    }

    /// Orders by the position of each tag in `order`; tags not listed go
    /// last.
    pub fn by_tag_order<S: AsRef<str>>(order: &[S]) -> Self {
        let order: Vec<String> = order.iter().map(|s| s.as_ref().to_string()).collect();
        Self::new(move |a, b| {
            let rank = |tag: &str| order.iter().position(|t| t == tag).unwrap_or(order.len());
            rank(a.tag()).cmp(&rank(b.tag()))
        })
    }

    pub fn compare(&self, a: NodeRef<'_>, b: NodeRef<'_>) -> Ordering {
        (self.0)(a, b)
    }
}

impl Default for ChildComparator {
    fn default() -> Self {
        Self::insertion_order()
    }
}

impl fmt::Debug for ChildComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChildComparator(..)")
    }
}
