//! Subcommand implementations.

use std::{fs, path::Path, rc::Rc};

use fractree::{
    Tree,
    config::TreeConfig,
    types::{NodeClass, TypeTag},
};

pub mod inspect;
pub mod validate;

/// Accept every tag as its own class so records keep their tags when re-serialized.
fn any_class(tag: &TypeTag) -> Option<Rc<NodeClass>> {
    Some(Rc::new(NodeClass::new(tag.class(), tag.module())))
}

/// Read a record file into a tree using the command line address syntax.
pub fn load_tree(path: &Path, config: &TreeConfig) -> Result<Tree, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(path)?;
    let mut tree = Tree::from_json(&json, &any_class)?;
    tree.set_config(config.clone())?;
    tracing::debug!("Loaded {} nodes from {}", tree.len(), path.display());
    Ok(tree)
}
