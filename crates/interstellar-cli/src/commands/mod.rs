// Module exports for CLI subcommands
//
// Each module handles one subcommand. main.rs parses arguments and dispatches
// to these handlers.

pub mod distances;
pub mod planets;
pub mod route;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use interstellar_lib::{load_dataset_file, resolve_dataset_path, Snapshot};

/// Resolve the dataset location and read its snapshot.
pub fn load_snapshot_for(target: Option<&Path>) -> Result<Snapshot> {
    let path = resolve_dataset_path(target).context("failed to resolve the dataset location")?;
    let snapshot = load_dataset_file(&path)
        .with_context(|| format!("failed to load dataset from {}", path.display()))?;
    debug!(
        path = %path.display(),
        planets = snapshot.vertices.len(),
        routes = snapshot.edges.len(),
        "dataset ready"
    );
    Ok(snapshot)
}
