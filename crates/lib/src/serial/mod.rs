//! The versioned record format.
//!
//! A [`Record`] is the interchange form of one node and its subtree:
//!
//! ```json
//! {
//!   "?NAME": "root",
//!   "?FORMAT_VERSION": 0,
//!   "?CHILDREN": [
//!     { "?NAME": "branch", "?VALUE": 3 },
//!     { "?NAME": "custom", "?TYPE": "CustomTree|@|app.nodes" }
//!   ]
//! }
//! ```
//!
//! Keys are omitted when empty. A child record only carries `?TYPE` when its
//! class differs from its parent's, so a uniform tree carries no tags at all.
//! The top-level record is tagged when its class is not the base class, and
//! carries `?FORMAT_VERSION` plus, for a tree's main root, the tree metadata
//! under `?ROOT_DATA`.
//!
//! Restoring is lenient below the top level: empty child records are skipped,
//! unknown tags fall back to the tree's default class, and a later child with
//! a duplicate name replaces the earlier one. Each of these is logged.

use std::rc::Rc;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::{
    Result,
    constants::FORMAT_VERSION,
    tree::{NodeId, Tree},
    types::{NodeClass, TypeRegistry, TypeResolver, TypeTag},
    value::{Extras, Value},
};

mod errors;

pub use errors::SerialError;

/// Serialized form of one node and its subtree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "?NAME", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// `Some(Value::Null)` when the key is present with a null value.
    #[serde(
        rename = "?VALUE",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_value"
    )]
    pub value: Option<Value>,

    #[serde(rename = "?CHILDREN", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Record>,

    #[serde(rename = "?EXTRAS", default, skip_serializing_if = "Extras::is_empty")]
    pub extras: Extras,

    /// Raw `class|@|module` string; parsed when the record is restored.
    #[serde(rename = "?TYPE", default, skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<String>,

    #[serde(
        rename = "?FORMAT_VERSION",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub format_version: Option<u32>,

    #[serde(rename = "?ROOT_DATA", default, skip_serializing_if = "Option::is_none")]
    pub root_data: Option<Extras>,
}

fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Record {
    /// A record with no name, value or children describes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.as_deref().is_none_or(str::is_empty)
            && self.value.is_none()
            && self.children.is_empty()
    }

    /// Number of records in this subtree, this one included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Record::count).sum::<usize>()
    }

    /// Parse a record from JSON of any nesting depth.
    ///
    /// Each tree level costs two JSON levels (the record object and its
    /// `?CHILDREN` array), so the parser's recursion limit is lifted and the
    /// stack grows on the heap instead.
    pub fn from_json(json: &str) -> std::result::Result<Record, serde_json::Error> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        deserializer.disable_recursion_limit();
        let record = Record::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
        deserializer.end()?;
        Ok(record)
    }

    /// Reject records that cannot be restored at the top level.
    pub fn validate_top_level(&self) -> std::result::Result<(), SerialError> {
        if let Some(found) = self.format_version
            && found > FORMAT_VERSION
        {
            return Err(SerialError::UnsupportedVersion {
                found,
                supported: FORMAT_VERSION,
            });
        }
        if self.is_empty() {
            return Err(SerialError::EmptyRecord);
        }
        Ok(())
    }
}

impl Tree {
    /// Serialize `id` and its subtree.
    pub fn to_record(&self, id: NodeId) -> Result<Record> {
        let node = self.node_ref(id)?;
        let base = NodeClass::base();
        let mut record = self.build_record(id, base.tag())?;
        record.format_version = Some(FORMAT_VERSION);
        if id == self.root() && !self.metadata().is_empty() {
            record.root_data = Some(self.metadata().clone());
        }
        debug!(
            "Serialized '{}' into {} records",
            node.name(),
            record.count()
        );
        Ok(record)
    }

    fn build_record(&self, id: NodeId, parent_tag: &TypeTag) -> Result<Record> {
        let node = self.node_ref(id)?;
        let tag = node.class().tag();
        let children = node
            .children()
            .iter()
            .map(|child| self.build_record(*child, tag))
            .collect::<Result<Vec<_>>>()?;
        Ok(Record {
            name: Some(node.name().to_string()),
            value: node.effective_value().cloned(),
            children,
            extras: node.extras().clone(),
            type_tag: (tag != parent_tag).then(|| tag.to_string()),
            format_version: None,
            root_data: None,
        })
    }

    /// Serialize `id` to compact JSON.
    pub fn to_json(&self, id: NodeId) -> Result<String> {
        Ok(serde_json::to_string(&self.to_record(id)?)?)
    }

    /// Pretty-printed JSON of `id`'s record.
    pub fn display(&self, id: NodeId) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_record(id)?)?)
    }

    /// Restore a tree whose main root is `record`.
    ///
    /// `resolver` maps `?TYPE` tags to classes; unresolvable tags fall back to
    /// the base class with a warning.
    pub fn from_record(record: &Record, resolver: &dyn TypeResolver) -> Result<Tree> {
        record.validate_top_level()?;
        let mut tree = Tree::new(record.name.clone().unwrap_or_default());
        let root = tree.root();
        let class = tree.top_level_class(record, resolver);
        tree.set_class(root, class)?;
        tree.fill_node(root, record, resolver)?;
        if let Some(metadata) = &record.root_data {
            *tree.metadata_mut() = metadata.clone();
        }
        debug!("Restored tree of {} nodes", tree.len());
        Ok(tree)
    }

    /// Parse JSON and restore it with [`from_record`](Self::from_record).
    ///
    /// Nesting depth is unbounded, so anything [`to_json`](Self::to_json)
    /// writes can be read back.
    pub fn from_json(json: &str, resolver: &dyn TypeResolver) -> Result<Tree> {
        let record = Record::from_json(json)?;
        Self::from_record(&record, resolver)
    }

    /// Restore `record` as a new child of `parent`.
    ///
    /// The record is read as a top-level record. A child of `parent` with the
    /// same name is replaced and discarded.
    pub fn insert_record(
        &mut self,
        parent: NodeId,
        record: &Record,
        resolver: &dyn TypeResolver,
    ) -> Result<NodeId> {
        let detached = self.restore_detached(record, resolver)?;
        self.attach_replacing(parent, detached)
    }

    /// Restore `record` as a new detached root in this tree.
    pub fn restore_detached(
        &mut self,
        record: &Record,
        resolver: &dyn TypeResolver,
    ) -> Result<NodeId> {
        record.validate_top_level()?;
        let class = self.top_level_class(record, resolver);
        let id = self.create_node_of(class, record.name.clone().unwrap_or_default());
        self.fill_node(id, record, resolver)?;
        Ok(id)
    }

    /// Deep copy of `id` and its subtree as a new detached root.
    ///
    /// The copy is structurally equivalent to the original, with fresh identities.
    pub fn duplicate(&mut self, id: NodeId) -> Result<NodeId> {
        let record = self.to_record(id)?;
        let mut classes = TypeRegistry::new();
        for node in self.all_branches(id, true, true) {
            classes.register_shared(Rc::clone(self.node_ref(node)?.class()));
        }
        self.restore_detached(&record, &classes)
    }

    fn top_level_class(&self, record: &Record, resolver: &dyn TypeResolver) -> Rc<NodeClass> {
        match record.type_tag.as_deref() {
            Some(raw) => self.resolve_class(raw, resolver),
            None => NodeClass::base(),
        }
    }

    /// Unparsable and unknown tags fall back to the default class.
    fn resolve_class(&self, raw: &str, resolver: &dyn TypeResolver) -> Rc<NodeClass> {
        let resolved = match raw.parse::<TypeTag>() {
            Ok(tag) => resolver.resolve(&tag),
            Err(err) => {
                warn!("{err}");
                None
            }
        };
        resolved.unwrap_or_else(|| {
            warn!(
                "Unknown node class '{raw}', falling back to {}",
                self.default_class().tag()
            );
            Rc::clone(self.default_class())
        })
    }

    fn fill_node(&mut self, id: NodeId, record: &Record, resolver: &dyn TypeResolver) -> Result<()> {
        if let Some(value) = &record.value {
            self.set_value(id, value.clone())?;
        }
        for (key, value) in &record.extras {
            self.set_extra(id, key.clone(), value.clone())?;
        }
        let class = Rc::clone(self.node_ref(id)?.class());
        for child in &record.children {
            if child.is_empty() {
                warn!("Skipping empty child record under {id}");
                continue;
            }
            let child_class = match child.type_tag.as_deref() {
                Some(raw) => self.resolve_class(raw, resolver),
                None => Rc::clone(&class),
            };
            let child_id =
                self.create_node_of(child_class, child.name.clone().unwrap_or_default());
            self.fill_node(child_id, child, resolver)?;
            self.attach_replacing(id, child_id)?;
        }
        Ok(())
    }

    /// Attach `child`, evicting and discarding a same-named sibling.
    fn attach_replacing(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        let name = self.node_ref(child)?.name().to_string();
        let existing = self.child(parent, &name);
        let attached = self.attach(parent, child, None, existing.is_some())?;
        if let Some(evicted) = existing {
            warn!("Replacing existing child '{name}' while restoring records");
            self.discard(evicted)?;
        }
        Ok(attached)
    }
}
