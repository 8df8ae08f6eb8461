//! Enumeration, search and structural comparison.

use tracing::debug;

use crate::{Result, value::Value};

use super::{NodeId, Tree};

impl Tree {
    /// Every node reachable below `id`, optionally starting with `id` itself.
    ///
    /// Depth-first order visits a node and then its whole subtree before the
    /// next sibling. Otherwise each level lists all of a node's direct children
    /// first, then the descendants of each child in turn.
    pub fn all_branches(&self, id: NodeId, include_self: bool, depth_first: bool) -> Vec<NodeId> {
        let mut found = Vec::new();
        if !self.contains_node(id) {
            return found;
        }
        if include_self {
            found.push(id);
        }
        if depth_first {
            self.collect_depth_first(id, &mut found);
        } else {
            self.collect_by_level(id, &mut found);
        }
        found
    }

    fn collect_depth_first(&self, id: NodeId, found: &mut Vec<NodeId>) {
        for &child in self.children(id) {
            found.push(child);
            self.collect_depth_first(child, found);
        }
    }

    fn collect_by_level(&self, id: NodeId, found: &mut Vec<NodeId>) {
        let children = self.children(id);
        found.extend_from_slice(children);
        for &child in children {
            self.collect_by_level(child, found);
        }
    }

    /// Descendants of `id` with no children of their own, in depth-first order.
    pub fn leaves(&self, id: NodeId) -> Vec<NodeId> {
        self.all_branches(id, false, true)
            .into_iter()
            .filter(|node| self.children(*node).is_empty())
            .collect()
    }

    /// Every node whose name contains `pattern`, in depth-first order.
    ///
    /// With `only_children` the search covers `id`'s descendants; otherwise `id`
    /// itself is checked as well. All matches are returned.
    pub fn search(&self, id: NodeId, pattern: &str, only_children: bool) -> Vec<NodeId> {
        self.all_branches(id, !only_children, true)
            .into_iter()
            .filter(|node| self.name(*node).is_some_and(|name| name.contains(pattern)))
            .collect()
    }

    /// Replace `search` with `replace` in names and text values.
    ///
    /// Renames go through [`set_name`](Self::set_name), so collisions are
    /// resolved and events fire as for any rename. Non-text values are left
    /// alone. Returns the number of names and values changed.
    pub fn search_replace(
        &mut self,
        id: NodeId,
        search: &str,
        replace: &str,
        names: bool,
        values: bool,
        recurse: bool,
    ) -> Result<usize> {
        self.node_ref(id)?;
        let targets = if recurse {
            self.all_branches(id, true, true)
        } else {
            vec![id]
        };
        let mut changed = 0;
        for target in targets {
            let node = self.node_ref(target)?;
            let new_name = (names && node.name().contains(search))
                .then(|| node.name().replace(search, replace));
            let new_value = match node.raw_value() {
                Some(Value::Text(text)) if values && text.contains(search) => {
                    Some(text.replace(search, replace))
                }
                _ => None,
            };
            if let Some(name) = new_name {
                self.set_name(target, name)?;
                changed += 1;
            }
            if let Some(text) = new_value {
                self.set_value(target, text)?;
                changed += 1;
            }
        }
        debug!("Search-replace of '{search}' changed {changed} names and values");
        Ok(changed)
    }

    /// Structural equivalence of two nodes in this tree.
    pub fn is_equivalent(&self, a: NodeId, b: NodeId) -> bool {
        self.equivalent_across(self, a, b)
    }

    /// Structural equivalence of `a` in this tree and `b` in `other`.
    ///
    /// Compares name, effective value, extras and class tag, then the children
    /// pairwise in order. Identity is ignored.
    pub fn equivalent_across(&self, other: &Tree, a: NodeId, b: NodeId) -> bool {
        let (Some(left), Some(right)) = (self.node(a), other.node(b)) else {
            return false;
        };
        left.name() == right.name()
            && left.effective_value() == right.effective_value()
            && left.extras() == right.extras()
            && left.class().tag() == right.class().tag()
            && left.children().len() == right.children().len()
            && left
                .children()
                .iter()
                .zip(right.children())
                .all(|(l, r)| self.equivalent_across(other, *l, *r))
    }
}
