//! CLI argument definitions for the fractree binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fractree::config::TreeConfig;

use crate::output::OutputFormat;

/// Inspect serialized fractree records
#[derive(Parser, Debug)]
#[command(name = "fractree")]
#[command(about = "fractree: inspect hierarchical key/value tree records")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(short, long, global = true, default_value = "human", env = "FRACTREE_FORMAT")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub syntax: SyntaxArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tree as an indented outline
    Show(FileArgs),
    /// Print the value at an address
    Get(GetArgs),
    /// List nodes whose name contains a pattern
    Search(SearchArgs),
    /// List nodes without children
    Leaves(FileArgs),
    /// Check that a record survives a serialize/restore round trip
    Validate(FileArgs),
}

/// Address syntax used to read addresses given on the command line
#[derive(clap::Args, Debug)]
pub struct SyntaxArgs {
    /// Address separator
    #[arg(long, global = true, default_value = ".", env = "FRACTREE_SEPARATOR")]
    pub separator: String,

    /// Token that navigates to the parent node
    #[arg(long, global = true, default_value = "^", env = "FRACTREE_PARENT_TOKEN")]
    pub parent_token: String,
}

impl SyntaxArgs {
    pub fn to_config(&self) -> TreeConfig {
        TreeConfig::new(self.separator.clone(), self.parent_token.clone())
    }
}

/// Arguments for commands that only need a record file
#[derive(clap::Args, Debug)]
pub struct FileArgs {
    /// JSON record file to read
    pub file: PathBuf,
}

/// Arguments for the get command
#[derive(clap::Args, Debug)]
pub struct GetArgs {
    /// JSON record file to read
    pub file: PathBuf,

    /// Address relative to the root
    pub address: String,
}

/// Arguments for the search command
#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// JSON record file to read
    pub file: PathBuf,

    /// Substring to look for in node names
    pub pattern: String,

    /// Check the root's own name as well
    #[arg(long)]
    pub include_root: bool,
}
