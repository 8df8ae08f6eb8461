//! Ordered child storage.
//!
//! A [`ChildTable`] keeps a parent's children in explicit position order next to
//! a name index. Order lives only in the position vector, so re-keying a child
//! (rename) never moves it, and positional edits (indexed insert, reorder,
//! removal) never disturb the relative order of untouched siblings.

use std::collections::HashMap;

use super::NodeId;

/// Position-ordered children of one node, indexed by name.
///
/// The table does not enforce name uniqueness on its own; the tree resolves
/// collisions before calling [`insert`](Self::insert) or [`rename`](Self::rename).
#[derive(Debug, Default, Clone)]
pub struct ChildTable {
    order: Vec<NodeId>,
    by_name: HashMap<String, NodeId>,
}

impl ChildTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Child ids in iteration order.
    pub fn ids(&self) -> &[NodeId] {
        &self.order
    }

    /// The child registered under `name`.
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.order.contains(&id)
    }

    /// Current position of `id`.
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.order.iter().position(|child| *child == id)
    }

    /// Insert `id` under `name`, appended or spliced in at `index`
    /// (clamped to `[0, len]`). Returns the position it landed at.
    pub fn insert(&mut self, name: String, id: NodeId, index: Option<usize>) -> usize {
        let position = index.map_or(self.order.len(), |i| i.min(self.order.len()));
        self.order.insert(position, id);
        self.by_name.insert(name, id);
        position
    }

    /// Remove the child registered under `name`, returning it and its former position.
    pub fn remove(&mut self, name: &str) -> Option<(NodeId, usize)> {
        let id = self.by_name.remove(name)?;
        let position = self.position(id)?;
        self.order.remove(position);
        Some((id, position))
    }

    /// Re-key a child in place. Its position is untouched.
    pub fn rename(&mut self, old: &str, new: String) -> bool {
        match self.by_name.remove(old) {
            Some(id) => {
                self.by_name.insert(new, id);
                true
            }
            None => false,
        }
    }

    /// Move `id` to an absolute position; negative indices count from the end
    /// (`-1` is last). The target is clamped into range. Returns the new position.
    pub fn move_to(&mut self, id: NodeId, index: isize) -> Option<usize> {
        let current = self.position(id)?;
        let count = self.order.len() as isize;
        let target = if index < 0 { count + index } else { index };
        let target = target.clamp(0, count - 1) as usize;
        self.order.remove(current);
        self.order.insert(target, id);
        Some(target)
    }
}
