//!
//! fractree: a mutable, hierarchical key/value tree.
//! Every node carries both a name and a value, is addressable by dotted paths,
//! emits change notifications that bubble toward the root, and can serialize
//! and restore itself losslessly, including node class information.
//!
//! ## Core Concepts
//!
//! * **Tree (`tree::Tree`)**: The arena that owns every node. All mutation goes through it.
//! * **Nodes (`tree::Node`, `tree::NodeId`)**: One element of the tree, with a name unique
//!   among its siblings, an optional [`Value`], ordered children and an `extras` map.
//! * **Addresses (`tree::address`)**: Separator-joined strings or token sequences that
//!   resolve (and lazily create) nodes, including the parent-navigation token.
//! * **Signals (`signal::Signal`)**: Mute-able multicast channels holding weak subscribers.
//!   Each node owns three of them (value, name, structure) and relays to its parent's.
//! * **Classes (`types::NodeClass`)**: Heterogeneous node "subtypes", tagged in the
//!   serialized form only where a child's class differs from its parent's.
//! * **Records (`serial::Record`)**: The versioned, tagged interchange form.

pub mod config;
pub mod constants;
pub mod serial;
pub mod signal;
pub mod tree;
pub mod types;
pub mod value;

/// Re-export the `Tree` struct for easier access.
pub use tree::{Node, NodeId, Tree};
pub use value::Value;

/// Result type used throughout the fractree library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the fractree library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured tree errors from the tree module
    #[error(transparent)]
    Tree(tree::TreeError),

    /// Structured record errors from the serial module
    #[error(transparent)]
    Serial(serial::SerialError),

    /// Structured configuration errors from the config module
    #[error(transparent)]
    Config(config::ConfigError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Tree(_) => "tree",
            Error::Serial(_) => "serial",
            Error::Config(_) => "config",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a node or address was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Tree(tree_err) => tree_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates a read-only node refused implicit creation.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Error::Tree(tree_err) => tree_err.is_permission_denied(),
            _ => false,
        }
    }

    /// Check if this error came from reading or writing the serialized form.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::Serialize(_) | Error::Serial(_))
    }
}
