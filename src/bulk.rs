//! Document-wide edits.
//!
//! Each operation is a post-order visitor over the root's subtree. New names
//! and values are validated before the first node is touched; the return
//! value counts the nodes that changed.

use log::debug;

use crate::attribute::Attribute;
use crate::error::ValidationError;
use crate::tree::{Document, NodeId, is_valid_tag_name};

impl Document {
    /// Adds `name="value"` to every element tagged `tag` that lacks it.
    pub fn add_attribute_globally(
        &mut self,
        tag: &str,
        name: &str,
        value: &str,
    ) -> Result<usize, ValidationError> {
        Attribute::new(name, value)?;
        let mut changed = 0;
        self.try_visit_root(|doc, id| {
            if doc.tag(id) == tag && doc.add_attribute(id, name, value)? {
                changed += 1;
            }
            Ok(())
        })?;
        debug!("Added {name}=\"{value}\" to {changed} <{tag}> element(s)");
        Ok(changed)
    }

    /// Renames attribute `old` to `new` wherever `new` is not already taken.
    pub fn rename_attribute_globally(&mut self, old: &str, new: &str) -> Result<usize, ValidationError> {
        if !Attribute::is_valid_name(new) {
            return Err(ValidationError::InvalidAttributeName(new.to_string()));
        }
        let mut changed = 0;
        self.try_visit_root(|doc, id| {
            if old != new && doc.rename_attribute(id, old, new)? {
                changed += 1;
            }
            Ok(())
        })?;
        debug!("Renamed attribute {old} to {new} on {changed} element(s)");
        Ok(changed)
    }

    pub fn remove_attribute_globally(&mut self, name: &str) -> usize {
        let mut changed = 0;
        self.visit_root(|doc, id| {
            if doc.remove_attribute(id, name) {
                changed += 1;
            }
        });
        debug!("Removed attribute {name} from {changed} element(s)");
        changed
    }

    /// Retags every element tagged `tag`.
    pub fn rename_element_globally(&mut self, tag: &str, new: &str) -> Result<usize, ValidationError> {
        if !is_valid_tag_name(new) {
            return Err(ValidationError::InvalidTagName(new.to_string()));
        }
        let mut changed = 0;
        self.try_visit_root(|doc, id| {
            if doc.tag(id) == tag {
                doc.set_tag(id, new)?;
                changed += 1;
            }
            Ok(())
        })?;
        debug!("Renamed {changed} <{tag}> element(s) to <{new}>");
        Ok(changed)
    }

    /// Detaches every element tagged `tag` from its parent. The root itself
    /// is never removed.
    pub fn remove_element_globally(&mut self, tag: &str) -> usize {
        let mut removed = 0;
        self.visit_root(|doc, id| {
            let doomed: Vec<NodeId> = doc
                .children(id)
                .iter()
                .copied()
                .filter(|&child| doc.tag(child) == tag)
                .collect();
            for child in doomed {
                if doc.remove_child(id, child) {
                    removed += 1;
                }
            }
        });
        debug!("Removed {removed} <{tag}> element(s)");
        removed
    }

    fn visit_root<F>(&mut self, visitor: F)
    where
        F: FnMut(&mut Document, NodeId),
    {
        if let Some(root) = self.root() {
            self.visit_post_order(root, visitor);
        }
    }

    fn try_visit_root<F>(&mut self, visitor: F) -> Result<(), ValidationError>
    where
        F: FnMut(&mut Document, NodeId) -> Result<(), ValidationError>,
    {
        match self.root() {
            Some(root) => self.try_visit_post_order(root, visitor),
            None => Ok(()),
        }
    }
}
