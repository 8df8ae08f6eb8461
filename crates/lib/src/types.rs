//! Node classes and type-tag resolution.
//!
//! Nodes in one tree may belong to different classes. A class is described by a
//! [`NodeClass`] and identified on the wire by its [`TypeTag`]. Records only
//! carry a tag where a node's class differs from its parent's, so restoring a
//! tree needs a [`TypeResolver`] that maps tags back to classes.
//!
//! The resolver is an injected capability. [`TypeRegistry`] is the stock
//! implementation; any `Fn(&TypeTag) -> Option<Rc<NodeClass>>` works as well.
//!
//! ```
//! use fractree::types::{NodeClass, TypeRegistry, TypeResolver, TypeTag};
//!
//! let mut registry = TypeRegistry::new();
//! let custom = registry.register(NodeClass::new("CustomTree", "myapp.nodes").inheriting());
//!
//! let tag: TypeTag = "CustomTree|@|myapp.nodes".parse()?;
//! assert_eq!(registry.resolve(&tag), Some(custom));
//! # Ok::<(), fractree::serial::SerialError>(())
//! ```

use std::{collections::HashMap, fmt, rc::Rc, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{constants::TYPE_TAG_SEPARATOR, serial::SerialError};

/// Serialized identity of a node class: class name plus a logical module/namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag {
    class: String,
    module: String,
}

impl TypeTag {
    pub fn new(class: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            module: module.into(),
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn module(&self) -> &str {
        &self.module
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{TYPE_TAG_SEPARATOR}{}", self.class, self.module)
    }
}

impl FromStr for TypeTag {
    type Err = SerialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(TYPE_TAG_SEPARATOR) {
            Some((class, module)) if !class.is_empty() => Ok(TypeTag::new(class, module)),
            _ => Err(SerialError::InvalidTypeTag { tag: s.to_string() }),
        }
    }
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A node class.
///
/// Classes are shared behind `Rc` and compared by tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeClass {
    tag: TypeTag,
    branches_inherit: bool,
}

impl NodeClass {
    /// Class name of the engine's default node class.
    pub const BASE_CLASS: &'static str = "Tree";
    /// Module of the engine's default node class.
    pub const BASE_MODULE: &'static str = "fractree";

    pub fn new(class: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            tag: TypeTag::new(class, module),
            branches_inherit: false,
        }
    }

    /// The engine's default node class.
    pub fn base() -> Rc<Self> {
        Rc::new(Self::new(Self::BASE_CLASS, Self::BASE_MODULE))
    }

    /// Children created implicitly under nodes of this class take this class
    /// rather than the tree's default class.
    pub fn inheriting(mut self) -> Self {
        self.branches_inherit = true;
        self
    }

    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    pub fn branches_inherit(&self) -> bool {
        self.branches_inherit
    }
}

/// Resolves a serialized [`TypeTag`] to a constructible class.
pub trait TypeResolver {
    /// Returns `None` when the tag is unknown.
    fn resolve(&self, tag: &TypeTag) -> Option<Rc<NodeClass>>;
}

impl<F> TypeResolver for F
where
    F: Fn(&TypeTag) -> Option<Rc<NodeClass>>,
{
    fn resolve(&self, tag: &TypeTag) -> Option<Rc<NodeClass>> {
        self(tag)
    }
}

/// A map from tags to registered classes.
///
/// A new registry already knows the base class.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    classes: HashMap<TypeTag, Rc<NodeClass>>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            classes: HashMap::new(),
        };
        registry.register(NodeClass::new(NodeClass::BASE_CLASS, NodeClass::BASE_MODULE));
        registry
    }

    /// Register a class, replacing any class with the same tag.
    pub fn register(&mut self, class: NodeClass) -> Rc<NodeClass> {
        let class = Rc::new(class);
        self.register_shared(Rc::clone(&class));
        class
    }

    /// Register an already shared class.
    pub fn register_shared(&mut self, class: Rc<NodeClass>) {
        if let Some(previous) = self.classes.insert(class.tag().clone(), class) {
            tracing::debug!("Replaced registered node class {}", previous.tag());
        }
    }

    pub fn get(&self, tag: &TypeTag) -> Option<Rc<NodeClass>> {
        self.classes.get(tag).cloned()
    }

    pub fn contains(&self, tag: &TypeTag) -> bool {
        self.classes.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl TypeResolver for TypeRegistry {
    fn resolve(&self, tag: &TypeTag) -> Option<Rc<NodeClass>> {
        self.get(tag)
    }
}
