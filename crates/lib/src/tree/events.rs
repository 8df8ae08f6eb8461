//! Change events and the per-node channel bundle.
//!
//! Every node owns one [`Signal`] per event kind. While a node is attached, each
//! of its channels relays to the matching channel of its parent, so a subscriber
//! on the root observes every mutation in the tree exactly once, and a
//! subscriber on any node observes mutations in that node's subtree.

use crate::{signal::Signal, value::Value};

use super::NodeId;

/// A node's value changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChanged {
    pub node: NodeId,
    pub old: Option<Value>,
    pub new: Option<Value>,
}

/// A node was renamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameChanged {
    pub node: NodeId,
    pub old: String,
    pub new: String,
}

/// Kind of structural change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureEvent {
    Added,
    Removed,
}

/// A node was attached to or detached from `parent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureChanged {
    pub node: NodeId,
    pub parent: NodeId,
    pub kind: StructureEvent,
}

/// The three channels of a node.
#[derive(Debug, Default)]
pub struct NodeSignals {
    pub value_changed: Signal<ValueChanged>,
    pub name_changed: Signal<NameChanged>,
    pub structure_changed: Signal<StructureChanged>,
}

impl NodeSignals {
    /// Mute all three channels.
    pub fn mute(&mut self) {
        self.value_changed.mute();
        self.name_changed.mute();
        self.structure_changed.mute();
    }

    /// Re-activate all three channels.
    pub fn activate(&mut self) {
        self.value_changed.activate();
        self.name_changed.activate();
        self.structure_changed.activate();
    }

    /// Point (or clear) every channel's relay edge.
    pub(crate) fn relay_to(&mut self, parent: Option<NodeId>) {
        self.value_changed.set_relay(parent);
        self.name_changed.set_relay(parent);
        self.structure_changed.set_relay(parent);
    }
}
