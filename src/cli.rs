use std::path::PathBuf;

/// Feasible flow CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "openmander-flow", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Build feasible Shirabe flows for a partition document
    Flows(FlowsArgs),

    /// Write a partition document for a grid split into horizontal bands
    Grid(GridArgs),
}

#[derive(clap::Args, Debug)]
pub struct FlowsArgs {
    /// Input partition document (JSON)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output flow file, defaults to "./flows.json"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Flow configuration file (JSON)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Use seeded random spanning trees instead of minimum spanning trees
    #[arg(long, value_name = "SEED")]
    pub random_tree: Option<u64>,

    /// Process districts one at a time
    #[arg(long)]
    pub sequential: bool,

    /// Fail when a district is outside the population tolerance
    #[arg(long)]
    pub enforce_balance: bool,

    /// Population tolerance as a fraction of the ideal district total
    #[arg(long)]
    pub balance_threshold: Option<f64>,
}

#[derive(clap::Args, Debug)]
pub struct GridArgs {
    /// Number of rows
    pub rows: usize,

    /// Number of columns
    pub cols: usize,

    /// Number of districts (at most one per row)
    #[arg(short, long)]
    pub districts: usize,

    /// Output partition document, defaults to "./grid.json"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
