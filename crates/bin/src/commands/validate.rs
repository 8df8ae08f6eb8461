//! Round-trip validation of a record file.

use std::rc::Rc;

use fractree::{Tree, config::TreeConfig, types::TypeRegistry};

use crate::cli::FileArgs;
use crate::commands::load_tree;
use crate::output::OutputFormat;

/// Run the validate command
pub fn run(
    args: &FileArgs,
    config: &TreeConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let tree = load_tree(&args.file, config)?;
    let root = tree.root();

    let json = tree.to_json(root)?;
    let mut classes = TypeRegistry::new();
    for id in tree.all_branches(root, true, true) {
        if let Some(node) = tree.node(id) {
            classes.register_shared(Rc::clone(node.class()));
        }
    }
    let restored = Tree::from_json(&json, &classes)?;
    let equivalent = tree.equivalent_across(&restored, root, restored.root());

    match format {
        OutputFormat::Human => {
            println!("Nodes:       {}", tree.len());
            println!("Leaves:      {}", tree.leaves(root).len());
            println!(
                "Round trip:  {}",
                if equivalent { "ok" } else { "MISMATCH" }
            );
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "nodes": tree.len(),
                "leaves": tree.leaves(root).len(),
                "round_trip": equivalent,
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }

    if !equivalent {
        tracing::warn!("{} does not round-trip", args.file.display());
        return Err(format!("{} does not round-trip", args.file.display()).into());
    }
    Ok(())
}
