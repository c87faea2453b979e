use std::path::Path;

use anyhow::Result;

use crate::commands::load_snapshot_for;
use crate::output::{render_planets, OutputFormat};

/// Handle the planets subcommand: list vertices in collection order.
pub fn handle_planets_command(target_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let snapshot = load_snapshot_for(target_path)?;
    print!("{}", render_planets(&snapshot.vertices, format)?);
    Ok(())
}
