use clap::{Parser, Subcommand};
use msafeat::{features, inspect};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all database searches for a query and write its features.
    Features(features::Cli),
    /// Parse one raw search output and summarise it.
    Inspect(inspect::Cli),
}

fn main() -> anyhow::Result<()> {
    match Cli::parse().command {
        Command::Features(cli) => features::cli(cli),
        Command::Inspect(cli) => inspect::cli(cli),
    }
}
