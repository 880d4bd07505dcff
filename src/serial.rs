//! Canonical text rendering.
//!
//! A render call computes the height `D` of the subtree it was invoked on once
//! and shares it with every recursive step. A childless, textless node gets
//! the `/>` shorthand only when its depth equals that shared `D`; shallower
//! empty nodes render as `<tag></tag>`.

use crate::tree::{Document, NodeId};

/// Renders the subtree rooted at `id`.
pub fn render(doc: &Document, id: NodeId) -> String {
    let max_depth = doc.height(id);
    let mut output = String::new();
    render_node(doc, id, 0, max_depth, &mut output);
    output
}

/// Renders the declaration line followed by the root, if any.
pub fn render_document(doc: &Document) -> String {
    let mut output = String::new();
    output.push_str("<?xml version=\"");
    output.push_str(doc.version());
    output.push_str("\" encoding=\"");
    output.push_str(doc.encoding());
    output.push_str("\"?>");
    if let Some(root) = doc.root() {
        output.push('\n');
        output.push_str(&render(doc, root));
    }
    output
}

fn render_node(doc: &Document, id: NodeId, depth: usize, max_depth: usize, output: &mut String) {
    let tag = doc.tag(id);
    let at_max_depth = depth == max_depth;

    push_indent(output, depth);
    output.push('<');
    output.push_str(tag);
    for attribute in doc.attributes(id) {
        output.push(' ');
        output.push_str(attribute.name());
        output.push_str("=\"");
        output.push_str(attribute.value());
        output.push('"');
    }
    if !at_max_depth {
        output.push('>');
    }

    let text = doc.text(id);
    if let Some(text) = text {
        if at_max_depth {
            output.push('>');
        }
        output.push_str(text);
    }

    let children = doc.children(id);
    if children.is_empty() {
        if at_max_depth && text.is_none() {
            output.push_str("/>");
        } else {
            push_close(output, tag);
        }
        return;
    }

    output.push('\n');
    for (i, &child) in children.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        render_node(doc, child, depth + 1, max_depth, output);
    }
    output.push('\n');
    push_indent(output, depth);
    push_close(output, tag);
}

fn push_indent(output: &mut String, depth: usize) {
    for _ in 0..depth {
        output.push('\t');
    }
}

fn push_close(output: &mut String, tag: &str) {
    output.push_str("</");
    output.push_str(tag);
    output.push('>');
}
