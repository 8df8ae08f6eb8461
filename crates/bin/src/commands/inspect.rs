//! Read-only inspection commands: show, get, search and leaves.

use fractree::{NodeId, Tree, config::TreeConfig};

use crate::cli::{FileArgs, GetArgs, SearchArgs};
use crate::commands::load_tree;
use crate::output::{OutputFormat, print_outline, print_table, value_cell};

/// Run the show command
pub fn show(
    args: &FileArgs,
    config: &TreeConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let tree = load_tree(&args.file, config)?;

    match format {
        OutputFormat::Human => print_outline(&tree, tree.root(), 0),
        OutputFormat::Json => println!("{}", tree.display(tree.root())?),
    }

    Ok(())
}

/// Run the get command
pub fn get(
    args: &GetArgs,
    config: &TreeConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let tree = load_tree(&args.file, config)?;
    let node = tree.lookup(tree.root(), args.address.as_str())?;

    match format {
        OutputFormat::Human => println!("{}", value_cell(&tree, node)),
        OutputFormat::Json => {
            let value = serde_json::json!({
                "address": tree.string_address(node),
                "value": tree.peek_value(node),
                "children": tree.children(node).len(),
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }

    Ok(())
}

/// Run the search command
pub fn search(
    args: &SearchArgs,
    config: &TreeConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let tree = load_tree(&args.file, config)?;
    let found = tree.search(tree.root(), &args.pattern, !args.include_root);
    print_nodes(&tree, &found, format, "No matching nodes found.")
}

/// Run the leaves command
pub fn leaves(
    args: &FileArgs,
    config: &TreeConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let tree = load_tree(&args.file, config)?;
    let found = tree.leaves(tree.root());
    print_nodes(&tree, &found, format, "The root has no children.")
}

fn print_nodes(
    tree: &Tree,
    nodes: &[NodeId],
    format: OutputFormat,
    empty_message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Human => {
            if nodes.is_empty() {
                println!("{empty_message}");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = nodes
                .iter()
                .map(|id| vec![tree.string_address(*id), value_cell(tree, *id)])
                .collect();
            print_table(&["ADDRESS", "VALUE"], &rows);
        }
        OutputFormat::Json => {
            let entries: Vec<_> = nodes
                .iter()
                .map(|id| {
                    serde_json::json!({
                        "address": tree.string_address(*id),
                        "value": tree.peek_value(*id),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string(&entries)?);
        }
    }

    Ok(())
}
