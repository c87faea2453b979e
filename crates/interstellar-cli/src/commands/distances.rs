//! Distances command handler: shortest distance from one planet to all others.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use interstellar_lib::{shortest_paths_from, DistanceTable};

use crate::commands::load_snapshot_for;
use crate::output::{to_json, OutputFormat};

/// Arguments for the distances command.
#[derive(Args, Debug, Clone)]
pub struct DistancesCommandArgs {
    /// Source planet id or name.
    #[arg(long = "from")]
    pub from: String,
    /// Treat every route as traversable in both directions.
    #[arg(long)]
    pub undirected: bool,
    /// Add recorded traffic delays to route weights.
    #[arg(long)]
    pub traffic: bool,
}

/// Handle the distances subcommand.
pub fn handle_distances_command(
    target_path: Option<&Path>,
    format: OutputFormat,
    args: &DistancesCommandArgs,
) -> Result<()> {
    let snapshot = load_snapshot_for(target_path)?;
    let paths = shortest_paths_from(&snapshot, &args.from, args.undirected, args.traffic)
        .with_context(|| format!("failed to compute distances from {}", args.from))?;
    let table = DistanceTable::from_paths(&snapshot.vertices, &paths);

    match format {
        OutputFormat::Json => println!("{}", to_json(&table)?),
        OutputFormat::Plain => {
            for entry in &table.entries {
                let distance = entry
                    .distance
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "inf".to_string());
                println!("{}\t{}\t{}", entry.id, entry.name, distance);
            }
        }
        OutputFormat::Text => print!("{}", table.render()),
    }
    Ok(())
}
