use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fractree=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.syntax.to_config();
    config.validate()?;

    match &cli.command {
        Commands::Show(args) => commands::inspect::show(args, &config, cli.format),
        Commands::Get(args) => commands::inspect::get(args, &config, cli.format),
        Commands::Search(args) => commands::inspect::search(args, &config, cli.format),
        Commands::Leaves(args) => commands::inspect::leaves(args, &config, cli.format),
        Commands::Validate(args) => commands::validate::run(args, &config, cli.format),
    }
}
