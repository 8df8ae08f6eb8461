//! Node identity.
//!
//! The `NodeId` type wraps a random v4 UUID assigned when a node is created.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Process-unique, immutable identity of a tree node.
///
/// Two handles are the same node exactly when their ids are equal; ids are never
/// reused, even after the node they named has been discarded. Renaming a node or
/// changing its value never changes its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Allocates a fresh identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
