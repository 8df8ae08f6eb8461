//! Error types for tree operations.
//!
//! This module defines structured error types for path resolution, lookups and
//! structural mutation of a [`Tree`](super::Tree).

use thiserror::Error;

use super::NodeId;

/// Errors that can occur during tree operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TreeError {
    /// Path resolution needed to create a child under a read-only node.
    #[error("read-only node '{node}' has no child '{token}'")]
    ReadOnly {
        /// Name of the read-only node
        node: String,
        /// The token that would have been created
        token: String,
    },

    /// A non-creating lookup found nothing at the address.
    #[error("no node at address '{address}'")]
    NotFound {
        /// The address, joined with the tree separator
        address: String,
    },

    /// The parent token was used on a node that has no parent.
    #[error("node '{node}' has no parent to navigate to")]
    NoParent {
        /// Name of the parentless node
        node: String,
    },

    /// The id does not name a node held by this tree.
    #[error("unknown node {id}")]
    UnknownNode {
        /// The stale or foreign id
        id: NodeId,
    },

    /// Attaching the node would make it its own ancestor.
    #[error("cannot attach node {node} beneath itself or its descendant {parent}")]
    WouldCycle {
        /// The node being attached
        node: NodeId,
        /// The requested parent
        parent: NodeId,
    },
}

impl TreeError {
    /// Check if this error indicates a failed lookup or navigation.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TreeError::NotFound { .. } | TreeError::NoParent { .. } | TreeError::UnknownNode { .. }
        )
    }

    /// Check if this error is the read-only refusal of implicit creation.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, TreeError::ReadOnly { .. })
    }

    /// Check if this error rejected a structural change.
    pub fn is_structural(&self) -> bool {
        matches!(self, TreeError::WouldCycle { .. })
    }
}

// Conversion from TreeError to the main Error type
impl From<TreeError> for crate::Error {
    fn from(err: TreeError) -> Self {
        crate::Error::Tree(err)
    }
}
