//! Slash-separated tag path search.
//!
//! `"fuc/avaliacao/componente"` matches every `componente` whose parent is an
//! `avaliacao` whose parent is a `fuc`, wherever that chain starts. A node
//! matching the last segment is collected and the chain stops there, while
//! every node also starts a fresh chain in its children. Results come back in
//! document order.

use crate::tree::{Document, NodeId};

/// Searches the document from its root.
pub fn find_by_path(doc: &Document, expression: &str) -> Vec<NodeId> {
    match doc.root() {
        Some(root) => find_by_path_from(doc, root, expression),
        None => Vec::new(),
    }
}

/// Searches the subtree rooted at `start`.
pub fn find_by_path_from(doc: &Document, start: NodeId, expression: &str) -> Vec<NodeId> {
    let segments: Vec<&str> = expression.split('/').collect();
    let mut matches = Vec::new();
    if expression.is_empty() {
        return matches;
    }
    search(doc, start, &segments, &[0], &mut matches);
    matches
}

fn search(doc: &Document, id: NodeId, segments: &[&str], active: &[usize], matches: &mut Vec<NodeId>) {
    let tag = doc.tag(id);
    let last = segments.len() - 1;

    let mut next = vec![0];
    let mut collected = false;
    for &index in active {
        if segments[index] != tag {
            continue;
        }
        if index == last {
            collected = true;
        } else if !next.contains(&(index + 1)) {
            next.push(index + 1);
        }
    }
    if collected {
        matches.push(id);
    }

    for &child in doc.children(id) {
        search(doc, child, segments, &next, matches);
    }
}

impl Document {
    /// See [`find_by_path`].
    pub fn find_by_path(&self, expression: &str) -> Vec<NodeId> {
        find_by_path(self, expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(doc: &Document, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|&id| doc.tag(id).to_string()).collect()
    }

    #[test]
    fn test_empty_expression() {
        let mut doc = Document::new();
        doc.create_root("a", None).unwrap();
        assert!(doc.find_by_path("").is_empty());
    }

    #[test]
    fn test_no_root() {
        assert!(Document::new().find_by_path("a").is_empty());
    }

    #[test]
    fn test_chain_can_start_below_a_partial_match() {
        // a -> a -> b: the chain "a/b" starts at the inner a
        let mut doc = Document::new();
        let outer = doc.create_root("a", None).unwrap();
        let inner = doc.create_node("a", None, Some(outer)).unwrap();
        let b = doc.create_node("b", None, Some(inner)).unwrap();
        assert_eq!(doc.find_by_path("a/b"), vec![b]);
        assert_eq!(doc.find_by_path("a/a"), vec![inner]);
    }

    #[test]
    fn test_no_duplicates_for_overlapping_chains() {
        // a -> a -> a with "a/a" yields both inner nodes exactly once
        let mut doc = Document::new();
        let a1 = doc.create_root("a", None).unwrap();
        let a2 = doc.create_node("a", None, Some(a1)).unwrap();
        let a3 = doc.create_node("a", None, Some(a2)).unwrap();
        assert_eq!(doc.find_by_path("a/a"), vec![a2, a3]);
        assert_eq!(doc.find_by_path("a"), vec![a1, a2, a3]);
    }

    #[test]
    fn test_interrupted_chain_does_not_match() {
        let mut doc = Document::new();
        let root = doc.create_root("fuc", None).unwrap();
        let other = doc.create_node("outro", None, Some(root)).unwrap();
        doc.create_node("avaliacao", None, Some(other)).unwrap();
        assert!(doc.find_by_path("fuc/avaliacao").is_empty());
        assert_eq!(tags(&doc, &doc.find_by_path("avaliacao")), ["avaliacao"]);
    }
}
