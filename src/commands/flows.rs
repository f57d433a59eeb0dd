use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::{FlowBuilder, FlowConfig, PartitionDocument, SpanningTreeMethod, write_json};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::FlowsArgs) -> Result<()> {
    let out_path = &args.output.clone().unwrap_or("./flows.json".into());
    let config = resolve_config(args)?;

    info!("[flows] loading partition from {}", args.input.display());
    let partition = PartitionDocument::read_from_json_file(&args.input)?
        .to_partition()
        .with_context(|| format!("Invalid partition document: {}", args.input.display()))?;

    info!("[flows] building flows for {} districts over {} nodes", partition.num_districts(), partition.num_nodes());
    let flows = FlowBuilder::new(config).build(&partition)?;
    flows.verify(&partition)?;

    info!("[flows] writing {} flow entries to {}", flows.nonzero_count(), out_path.display());
    write_json(Path::new(out_path), &flows.to_output(partition.graph()))?;

    Ok(())
}

/// Config file values, overridden by command line flags.
fn resolve_config(args: &crate::cli::FlowsArgs) -> Result<FlowConfig> {
    let mut config = match &args.config {
        Some(path) => FlowConfig::from_json_file(path)?,
        None => FlowConfig::default(),
    };

    if let Some(seed) = args.random_tree { config.spanning_tree = SpanningTreeMethod::Random { seed } }
    if args.sequential { config.parallel = false }
    if args.enforce_balance { config.enforce_balance = true }
    if let Some(threshold) = args.balance_threshold { config.balance_threshold = threshold }

    Ok(config)
}
