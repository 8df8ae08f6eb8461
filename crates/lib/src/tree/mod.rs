//! The tree engine.
//!
//! A [`Tree`] is an arena that owns every [`Node`]. Nodes refer to each other by
//! [`NodeId`]: a parent's [`ChildTable`](children::ChildTable) lists the ids it
//! owns, and a child's `parent` is a plain id used only for navigation. Every
//! structural edit goes through the tree, which keeps these invariants:
//!
//! 1. No two children of one parent share a name.
//! 2. Every node is owned by exactly one parent's child table, or is a root.
//! 3. Walking `parent` links always ends at a root.
//! 4. Child order only changes by explicit append, indexed insert, reorder or removal.
//! 5. A node's id never changes and is never reused.
//!
//! The arena can hold more than one root: the tree's main root plus any subtree
//! that was removed and not yet re-attached or [discarded](Tree::discard).
//!
//! # Events
//!
//! Mutations fire synchronously on the node's [`NodeSignals`] and relay up
//! through every ancestor. Handlers receive only the event, never the tree, so
//! they cannot mutate the tree mid-operation; connect an
//! [`EventQueue`](crate::signal::EventQueue) to react with further mutations
//! after the triggering call returns.
//!
//! # Usage
//!
//! ```
//! use fractree::{Tree, Value};
//!
//! let mut tree = Tree::new("testRoot");
//! let root = tree.root();
//! tree.set_at(root, "branchA", "first branch")?;
//! tree.set_at(root, "branchA.leafA", "first leaf")?;
//! tree.set_at(root, ["branchB"], 2)?;
//!
//! let leaf = tree.resolve(root, "branchA.leafA")?;
//! assert_eq!(tree.string_address(leaf), "branchA.leafA");
//! assert_eq!(tree.get(root, "branchB"), Some(&Value::Int(2)));
//! assert_eq!(tree.resolve(leaf, "^.^.branchB")?, tree.resolve(root, "branchB")?);
//! # Ok::<(), fractree::Error>(())
//! ```

use std::{collections::HashMap, rc::Rc};

use tracing::{debug, trace, warn};

use crate::{
    Result,
    config::TreeConfig,
    constants::{EXTRA_ACTIVE, EXTRA_BREAKPOINT, EXTRA_DEFAULT, EXTRA_READ_ONLY},
    signal::Signal,
    types::NodeClass,
    value::{Extras, Value},
};

pub mod address;
mod children;
mod errors;
pub mod events;
mod id;
mod names;
mod options;
mod traverse;

pub use address::IntoAddress;
pub use errors::TreeError;
pub use events::{NameChanged, NodeSignals, StructureChanged, StructureEvent, ValueChanged};
pub use id::NodeId;
pub use names::increment_name;
pub use options::CreateOptions;

use children::ChildTable;

/// One element of a tree: a name, an optional value, ordered children and extras.
///
/// Nodes are owned by their [`Tree`] and read through it; all mutation goes
/// through `Tree` methods so the structural invariants and events hold.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    name: String,
    value: Option<Value>,
    parent: Option<NodeId>,
    children: ChildTable,
    extras: Extras,
    class: Rc<NodeClass>,
    signals: NodeSignals,
}

impl Node {
    fn new(id: NodeId, name: String, class: Rc<NodeClass>) -> Self {
        Self {
            id,
            name,
            value: None,
            parent: None,
            children: ChildTable::new(),
            extras: Extras::new(),
            class,
            signals: NodeSignals::default(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The stored value, without falling back to the `default` extra.
    pub fn raw_value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// The stored value, or the `default` extra while unset.
    pub fn effective_value(&self) -> Option<&Value> {
        self.value
            .as_ref()
            .or_else(|| self.extras.get(EXTRA_DEFAULT))
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Child ids in order.
    pub fn children(&self) -> &[NodeId] {
        self.children.ids()
    }

    /// The child named `name`.
    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.children.get(name)
    }

    pub fn extras(&self) -> &Extras {
        &self.extras
    }

    pub fn class(&self) -> &Rc<NodeClass> {
        &self.class
    }

    pub fn signals(&self) -> &NodeSignals {
        &self.signals
    }

    fn flag(&self, key: &str, default: bool) -> bool {
        self.extras.get(key).map_or(default, |v| v.as_bool_or(default))
    }
}

fn value_channel(signals: &NodeSignals) -> &Signal<ValueChanged> {
    &signals.value_changed
}

fn name_channel(signals: &NodeSignals) -> &Signal<NameChanged> {
    &signals.name_changed
}

fn structure_channel(signals: &NodeSignals) -> &Signal<StructureChanged> {
    &signals.structure_changed
}

/// An arena of nodes with one main root.
#[derive(Debug)]
pub struct Tree {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    config: TreeConfig,
    default_class: Rc<NodeClass>,
    metadata: Extras,
}

impl Tree {
    /// Create a tree whose main root is named `name`, using the default address syntax.
    pub fn new(name: impl Into<String>) -> Self {
        let default_class = NodeClass::base();
        let root = NodeId::new();
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::new(root, name.into(), Rc::clone(&default_class)));
        Self {
            nodes,
            root,
            config: TreeConfig::default(),
            default_class,
            metadata: Extras::new(),
        }
    }

    /// Create a tree with its own address syntax.
    pub fn with_config(name: impl Into<String>, config: TreeConfig) -> Result<Self> {
        config.validate()?;
        let mut tree = Self::new(name);
        tree.config = config;
        Ok(tree)
    }

    /// Use `class` as the default class: for the main root, for implicitly
    /// created children of non-inheriting classes, and as the deserialization fallback.
    pub fn with_default_class(mut self, class: Rc<NodeClass>) -> Self {
        if let Some(root) = self.nodes.get_mut(&self.root) {
            root.class = Rc::clone(&class);
        }
        self.default_class = class;
        self
    }

    /// The main root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Switch this tree to another address syntax.
    pub fn set_config(&mut self, config: TreeConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn default_class(&self) -> &Rc<NodeClass> {
        &self.default_class
    }

    /// Whole-tree metadata, written as `ROOT_DATA` when the main root is serialized.
    pub fn metadata(&self) -> &Extras {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Extras {
        &mut self.metadata
    }

    /// Number of nodes held, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its main root.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Every parentless node other than the main root.
    pub fn detached_roots(&self) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|node| node.parent.is_none() && node.id != self.root)
            .map(|node| node.id)
            .collect()
    }

    pub(crate) fn node_ref(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(&id)
            .ok_or_else(|| TreeError::UnknownNode { id }.into())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| TreeError::UnknownNode { id }.into())
    }

    // ===== CREATION =====

    /// Create a detached node of the default class.
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        let class = Rc::clone(&self.default_class);
        self.create_node_of(class, name)
    }

    /// Create a detached node of `class`.
    pub fn create_node_of(&mut self, class: Rc<NodeClass>, name: impl Into<String>) -> NodeId {
        let id = NodeId::new();
        self.nodes.insert(id, Node::new(id, name.into(), class));
        id
    }

    pub(crate) fn set_class(&mut self, id: NodeId, class: Rc<NodeClass>) -> Result<()> {
        self.node_mut(id)?.class = class;
        Ok(())
    }

    /// Free a node and its whole subtree, detaching it first.
    ///
    /// Returns the number of nodes freed. The main root cannot be discarded.
    pub fn discard(&mut self, id: NodeId) -> Result<usize> {
        self.node_ref(id)?;
        if id == self.root {
            warn!("Refusing to discard the main root of the tree");
            return Ok(0);
        }
        self.detach(id);
        let doomed = self.all_branches(id, true, true);
        for node in &doomed {
            self.nodes.remove(node);
        }
        debug!("Discarded {} nodes under {id}", doomed.len());
        Ok(doomed.len())
    }

    // ===== NAVIGATION =====

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).map(Node::name)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(Node::parent)
    }

    /// Child ids of `id` in order; empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(Node::children).unwrap_or_default()
    }

    /// The direct child of `parent` named `name`.
    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.nodes.get(&parent).and_then(|node| node.child(name))
    }

    /// Whether `parent` has a direct child named `name`.
    pub fn contains(&self, parent: NodeId, name: &str) -> bool {
        self.child(parent, name).is_some()
    }

    /// The root reached by walking parent links from `id`.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Whether `ancestor` lies strictly above `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Names from the root down to `id`, the root itself excluded.
    pub fn address(&self, id: NodeId) -> Vec<String> {
        let mut segments = Vec::new();
        let mut current = id;
        while let Some(node) = self.nodes.get(&current) {
            let Some(parent) = node.parent else { break };
            segments.push(node.name.clone());
            current = parent;
        }
        segments.reverse();
        segments
    }

    /// [`address`](Self::address) joined with this tree's separator.
    pub fn string_address(&self, id: NodeId) -> String {
        address::join_address(&self.address(id), &self.config.separator)
    }

    /// The other children of `id`'s parent, in order.
    pub fn siblings(&self, id: NodeId) -> Vec<NodeId> {
        match self.parent(id) {
            Some(parent) => self
                .children(parent)
                .iter()
                .copied()
                .filter(|sibling| *sibling != id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Position of `id` among its siblings; `None` for roots.
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.nodes.get(&parent)?.children.position(id)
    }

    /// Position of the child named `name` under `parent`.
    pub fn child_index(&self, parent: NodeId, name: &str) -> Option<usize> {
        let node = self.nodes.get(&parent)?;
        node.children.position(node.children.get(name)?)
    }

    // ===== VALUES AND EXTRAS =====

    /// The node's value. An unset value materializes the `default` extra,
    /// caching it as the node's own value without firing `valueChanged`.
    pub fn value(&mut self, id: NodeId) -> Result<Option<&Value>> {
        let node = self.node_mut(id)?;
        if node.value.is_none()
            && let Some(default) = node.extras.get(EXTRA_DEFAULT)
        {
            node.value = Some(default.clone());
        }
        Ok(node.value.as_ref())
    }

    /// The node's value, falling back to the `default` extra, without caching it.
    pub fn peek_value(&self, id: NodeId) -> Option<&Value> {
        self.nodes.get(&id).and_then(Node::effective_value)
    }

    /// Set the node's value; fires `valueChanged` when it differs from the old one.
    pub fn set_value(&mut self, id: NodeId, value: impl Into<Value>) -> Result<()> {
        self.replace_value(id, Some(value.into())).map(|_| ())
    }

    /// Unset the node's value, returning the old one.
    pub fn clear_value(&mut self, id: NodeId) -> Result<Option<Value>> {
        self.replace_value(id, None)
    }

    fn replace_value(&mut self, id: NodeId, new: Option<Value>) -> Result<Option<Value>> {
        let node = self.node_mut(id)?;
        let old = std::mem::replace(&mut node.value, new.clone());
        if old != new {
            let event = ValueChanged {
                node: id,
                old: old.clone(),
                new,
            };
            self.emit(id, &event, value_channel);
        }
        Ok(old)
    }

    pub fn extras(&self, id: NodeId) -> Option<&Extras> {
        self.nodes.get(&id).map(Node::extras)
    }

    /// Set one extra, returning the previous entry.
    pub fn set_extra(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        Ok(self.node_mut(id)?.extras.insert(key.into(), value.into()))
    }

    pub fn remove_extra(&mut self, id: NodeId, key: &str) -> Result<Option<Value>> {
        Ok(self.node_mut(id)?.extras.remove(key))
    }

    /// Set the value reported while the node's own value is unset.
    pub fn set_default(&mut self, id: NodeId, value: impl Into<Value>) -> Result<()> {
        self.set_extra(id, EXTRA_DEFAULT, value).map(|_| ())
    }

    pub fn is_read_only(&self, id: NodeId) -> bool {
        self.nodes
            .get(&id)
            .is_some_and(|node| node.flag(EXTRA_READ_ONLY, false))
    }

    pub fn set_read_only(&mut self, id: NodeId, read_only: bool) -> Result<()> {
        self.set_extra(id, EXTRA_READ_ONLY, read_only).map(|_| ())
    }

    /// Advisory; nodes are active unless marked otherwise.
    pub fn is_active(&self, id: NodeId) -> bool {
        self.nodes
            .get(&id)
            .is_some_and(|node| node.flag(EXTRA_ACTIVE, true))
    }

    pub fn set_active(&mut self, id: NodeId, active: bool) -> Result<()> {
        self.set_extra(id, EXTRA_ACTIVE, active).map(|_| ())
    }

    /// Advisory breakpoint marker.
    pub fn is_breakpoint(&self, id: NodeId) -> bool {
        self.nodes
            .get(&id)
            .is_some_and(|node| node.flag(EXTRA_BREAKPOINT, false))
    }

    pub fn set_breakpoint(&mut self, id: NodeId, breakpoint: bool) -> Result<()> {
        self.set_extra(id, EXTRA_BREAKPOINT, breakpoint).map(|_| ())
    }

    // ===== STRUCTURE =====

    /// Append `child` to `parent`. See [`attach`](Self::attach).
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        self.attach(parent, child, None, false)
    }

    /// Insert `child` at `index` among `parent`'s children. See [`attach`](Self::attach).
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<NodeId> {
        self.attach(parent, child, Some(index), false)
    }

    /// Attach `child` under `parent`.
    ///
    /// - Re-adding an existing child is a no-op returning it unchanged.
    /// - A child still attached elsewhere is detached from its old parent first.
    /// - On a name collision the child is renamed with [`increment_name`], unless
    ///   `force` is set: then the same-named sibling is evicted (left as a detached
    ///   root, with a `removed` event) and the child takes its position when no
    ///   `index` is given.
    /// - `index` is clamped to `[0, len]`; `None` appends.
    ///
    /// Fires `structureChanged(child, parent, Added)` from `parent`.
    pub fn attach(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: Option<usize>,
        force: bool,
    ) -> Result<NodeId> {
        self.node_ref(parent)?;
        let current_parent = self.node_ref(child)?.parent;
        if current_parent == Some(parent) {
            debug!("Node {child} is already a child of {parent}");
            return Ok(child);
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(TreeError::WouldCycle {
                node: child,
                parent,
            }
            .into());
        }
        if current_parent.is_some() {
            self.detach(child);
        }

        let mut index = index;
        let name = self.node_ref(child)?.name.clone();
        let existing = self.node_ref(parent)?.children.get(&name);
        if let Some(existing) = existing {
            if force {
                warn!("Force-adding '{name}' evicts the existing child of that name");
                if let Some((_, position)) = self.detach(existing) {
                    index = index.or(Some(position));
                }
            } else {
                let siblings = &self.node_ref(parent)?.children;
                let unique = increment_name(&name, |n| siblings.contains_name(n));
                debug!("Cannot add duplicate child named '{name}', renaming to '{unique}'");
                self.rename_unchecked(child, unique)?;
            }
        }

        let name = self.node_ref(child)?.name.clone();
        let position = self.node_mut(parent)?.children.insert(name, child, index);
        let node = self.node_mut(child)?;
        node.parent = Some(parent);
        node.signals.relay_to(Some(parent));
        debug!("Attached {child} under {parent} at position {position}");

        let event = StructureChanged {
            node: child,
            parent,
            kind: StructureEvent::Added,
        };
        self.emit(parent, &event, structure_channel);
        Ok(child)
    }

    /// Detach `id` from its parent, leaving its subtree intact as a new root.
    ///
    /// Roots are left alone. Fires `structureChanged(id, parent, Removed)` from the parent.
    pub fn remove(&mut self, id: NodeId) -> Result<NodeId> {
        self.node_ref(id)?;
        self.detach(id);
        Ok(id)
    }

    /// Look `address` up from `from` without creating anything, then remove it.
    pub fn remove_at(&mut self, from: NodeId, address: impl IntoAddress) -> Result<NodeId> {
        let target = self.lookup(from, address)?;
        self.remove(target)
    }

    /// Returns the old parent and position.
    fn detach(&mut self, id: NodeId) -> Option<(NodeId, usize)> {
        let node = self.nodes.get(&id)?;
        let parent = node.parent?;
        let name = node.name.clone();
        let (_, position) = self.nodes.get_mut(&parent)?.children.remove(&name)?;
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = None;
            node.signals.relay_to(None);
        }
        debug!("Detached {id} from {parent}");

        let event = StructureChanged {
            node: id,
            parent,
            kind: StructureEvent::Removed,
        };
        self.emit(parent, &event, structure_channel);
        Some((parent, position))
    }

    /// Rename `id`, resolving collisions among its siblings.
    ///
    /// The node keeps its position. Returns the name actually assigned and fires
    /// `nameChanged` when it differs from the old one.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) -> Result<String> {
        let name = name.into();
        let node = self.node_ref(id)?;
        if node.name == name {
            return Ok(name);
        }
        let unique = match node.parent {
            Some(parent) => {
                let own = node.name.as_str();
                let siblings = &self.node_ref(parent)?.children;
                increment_name(&name, |n| n != own && siblings.contains_name(n))
            }
            None => name,
        };
        self.rename_unchecked(id, unique.clone())?;
        Ok(unique)
    }

    /// Re-key `id` in its parent's table and fire `nameChanged`; the caller
    /// has already made `name` unique.
    fn rename_unchecked(&mut self, id: NodeId, name: String) -> Result<()> {
        let node = self.node_ref(id)?;
        if node.name == name {
            return Ok(());
        }
        let old = node.name.clone();
        if let Some(parent) = node.parent {
            self.node_mut(parent)?.children.rename(&old, name.clone());
        }
        self.node_mut(id)?.name = name.clone();
        debug!("Renamed '{old}' to '{name}'");

        let event = NameChanged {
            node: id,
            old,
            new: name,
        };
        self.emit(id, &event, name_channel);
        Ok(())
    }

    /// Move `id` to an absolute position among its siblings; negative indices
    /// count from the end. A no-op for roots.
    pub fn set_index(&mut self, id: NodeId, index: isize) -> Result<()> {
        let Some(parent) = self.node_ref(id)?.parent else {
            return Ok(());
        };
        if let Some(position) = self.node_mut(parent)?.children.move_to(id, index) {
            debug!("Moved {id} to position {position}");
        }
        Ok(())
    }

    // ===== PATH RESOLUTION =====

    /// Resolve `address` from `from`, creating missing nodes. See [`resolve_with`](Self::resolve_with).
    pub fn resolve(&mut self, from: NodeId, address: impl IntoAddress) -> Result<NodeId> {
        self.resolve_with(from, address, &CreateOptions::default())
    }

    /// Resolve `address` from `from`, creating missing nodes.
    ///
    /// Each token either names a child, or is the parent token and moves to the
    /// parent (failing with [`TreeError::NoParent`] on a root). A missing child is
    /// created unless the node being walked is read-only
    /// ([`TreeError::ReadOnly`]). New nodes take the walking node's class if that
    /// class has `branches_inherit`, the tree's default class otherwise, and get
    /// `options` written into their extras. An empty address returns `from`.
    pub fn resolve_with(
        &mut self,
        from: NodeId,
        address: impl IntoAddress,
        options: &CreateOptions,
    ) -> Result<NodeId> {
        let tokens = address.into_tokens(&self.config.separator);
        let mut current = from;
        self.node_ref(current)?;
        for token in tokens {
            trace!("Resolving token '{token}'");
            if token == self.config.parent_token {
                current = self.parent_or_err(current)?;
                continue;
            }
            let node = self.node_ref(current)?;
            if let Some(child) = node.children.get(&token) {
                current = child;
                continue;
            }
            if node.flag(EXTRA_READ_ONLY, false) {
                return Err(TreeError::ReadOnly {
                    node: node.name.clone(),
                    token,
                }
                .into());
            }
            let class = if node.class.branches_inherit() {
                Rc::clone(&node.class)
            } else {
                Rc::clone(&self.default_class)
            };
            let child = self.create_node_of(class, token);
            options.apply(&mut self.node_mut(child)?.extras);
            current = self.attach(current, child, None, false)?;
        }
        Ok(current)
    }

    fn parent_or_err(&self, id: NodeId) -> Result<NodeId> {
        let node = self.node_ref(id)?;
        node.parent.ok_or_else(|| {
            TreeError::NoParent {
                node: node.name.clone(),
            }
            .into()
        })
    }

    fn walk(&self, from: NodeId, tokens: &[String]) -> Result<NodeId> {
        let mut current = from;
        self.node_ref(current)?;
        for token in tokens {
            if *token == self.config.parent_token {
                current = self.parent_or_err(current)?;
                continue;
            }
            current = self.node_ref(current)?.children.get(token).ok_or_else(|| {
                TreeError::NotFound {
                    address: address::join_address(tokens, &self.config.separator),
                }
            })?;
        }
        Ok(current)
    }

    /// Resolve without creating; fails with [`TreeError::NotFound`].
    pub fn lookup(&self, from: NodeId, address: impl IntoAddress) -> Result<NodeId> {
        let tokens = address.into_tokens(&self.config.separator);
        self.walk(from, &tokens)
    }

    /// Resolve without creating; `None` when absent.
    pub fn find(&self, from: NodeId, address: impl IntoAddress) -> Option<NodeId> {
        self.lookup(from, address).ok()
    }

    /// The effective value at `address`, without creating anything.
    pub fn get(&self, from: NodeId, address: impl IntoAddress) -> Option<&Value> {
        self.peek_value(self.find(from, address)?)
    }

    /// The first value found at `address` from `from`, then from each ancestor in turn.
    pub fn get_inherited(&self, from: NodeId, address: impl IntoAddress) -> Option<&Value> {
        let tokens = address.into_tokens(&self.config.separator);
        let mut current = Some(from);
        while let Some(id) = current {
            if let Some(value) = self
                .walk(id, &tokens)
                .ok()
                .and_then(|found| self.peek_value(found))
            {
                return Some(value);
            }
            current = self.parent(id);
        }
        None
    }

    /// Resolve `address` (creating as needed) and set its value.
    pub fn set_at(
        &mut self,
        from: NodeId,
        address: impl IntoAddress,
        value: impl Into<Value>,
    ) -> Result<NodeId> {
        let target = self.resolve(from, address)?;
        self.set_value(target, value)?;
        Ok(target)
    }

    // ===== SIGNALS =====

    pub fn signals(&self, id: NodeId) -> Option<&NodeSignals> {
        self.nodes.get(&id).map(Node::signals)
    }

    /// Channels of `id`, for connecting and disconnecting subscribers.
    pub fn signals_mut(&mut self, id: NodeId) -> Option<&mut NodeSignals> {
        self.nodes.get_mut(&id).map(|node| &mut node.signals)
    }

    /// Mute all of a node's channels; its events are neither delivered nor relayed.
    pub fn mute_signals(&mut self, id: NodeId) -> Result<()> {
        self.node_mut(id)?.signals.mute();
        Ok(())
    }

    pub fn activate_signals(&mut self, id: NodeId) -> Result<()> {
        self.node_mut(id)?.signals.activate();
        Ok(())
    }

    /// Deliver `event` on `origin`'s channel, then follow relay edges upward.
    fn emit<E: Clone>(&self, origin: NodeId, event: &E, channel: fn(&NodeSignals) -> &Signal<E>) {
        let mut current = Some(origin);
        while let Some(id) = current {
            let Some(node) = self.nodes.get(&id) else {
                break;
            };
            let signal = channel(&node.signals);
            signal.emit(event);
            current = signal.relay();
        }
    }
}
