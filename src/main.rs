use anyhow::Result;
use clap::Parser;

use openmander_flow::cli::{Cli, Commands};
use openmander_flow::commands::{flows, grid, init_logging};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match &cli.command {
        Commands::Flows(args) => flows::run(&cli, args),
        Commands::Grid(args) => grid::run(&cli, args),
    }
}
