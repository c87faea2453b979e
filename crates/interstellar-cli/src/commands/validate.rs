//! Validate command handler: audit every record of the dataset.

use std::path::Path;

use anyhow::{bail, Result};
use tracing::info;

use interstellar_lib::audit_snapshot;

use crate::commands::load_snapshot_for;
use crate::output::{error_count, render_findings, OutputFormat};
use crate::terminal::ColorPalette;

/// Handle the validate subcommand.
///
/// Findings are always printed; the command fails when any of them is an
/// error so scripts can gate on the exit code.
pub fn handle_validate_command(target_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let snapshot = load_snapshot_for(target_path)?;
    let findings = audit_snapshot(&snapshot);
    info!(findings = findings.len(), "audited dataset");

    let rendered = render_findings(&findings, format, ColorPalette::detect())?;
    if format == OutputFormat::Json {
        println!("{rendered}");
    } else {
        print!("{rendered}");
    }

    let errors = error_count(&findings);
    if errors > 0 {
        bail!("dataset validation failed with {errors} error(s)");
    }
    Ok(())
}
