//! Output formatting helpers for human-readable and JSON output.

use clap::ValueEnum;
use fractree::{NodeId, Tree};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Print a table with aligned columns in human-readable format.
///
/// `headers` and each row in `rows` must have the same length.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    // Calculate column widths (max of header and all row values)
    let col_count = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(col_count) {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:<width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_line.join("  "));

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .take(col_count)
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect();
        println!("{}", line.join("  "));
    }
}

/// Value column text; unset values show as `-`.
pub fn value_cell(tree: &Tree, id: NodeId) -> String {
    tree.peek_value(id)
        .map_or_else(|| "-".to_string(), ToString::to_string)
}

/// Print `id` and its subtree as an indented outline.
pub fn print_outline(tree: &Tree, id: NodeId, depth: usize) {
    let name = tree.name(id).unwrap_or_default();
    match tree.peek_value(id) {
        Some(value) => println!("{:indent$}{name} = {value}", "", indent = depth * 2),
        None => println!("{:indent$}{name}", "", indent = depth * 2),
    }
    for child in tree.children(id) {
        print_outline(tree, *child, depth + 1);
    }
}
