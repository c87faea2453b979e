//! Route command handler for computing the cheapest path between two planets.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use interstellar_lib::{
    plan_route, Error as RouteError, RouteRequest, RouteSummary, PATH_UNAVAILABLE,
};

use crate::commands::load_snapshot_for;
use crate::output::{render_route, OutputFormat};

/// Arguments for the route command.
#[derive(Args, Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting planet id or name.
    #[arg(long = "from")]
    pub from: String,
    /// Destination planet id or name.
    #[arg(long = "to")]
    pub to: String,
    /// Treat every route as traversable in both directions.
    #[arg(long)]
    pub undirected: bool,
    /// Add recorded traffic delays to route weights.
    #[arg(long)]
    pub traffic: bool,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest::new(&self.from, &self.to)
            .with_undirected(self.undirected)
            .with_traffic(self.traffic)
    }
}

/// Handle the route subcommand.
///
/// An unreachable destination prints the unavailable marker (outside JSON
/// mode) and then fails with the routing error.
pub fn handle_route_command(
    target_path: Option<&Path>,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let snapshot = load_snapshot_for(target_path)?;
    let request = args.to_request();

    let plan = match plan_route(&snapshot, &request) {
        Ok(plan) => plan,
        Err(err @ RouteError::RouteNotFound { .. }) => {
            if format != OutputFormat::Json {
                println!("{PATH_UNAVAILABLE}");
            }
            return Err(err).context("failed to plan route");
        }
        Err(err) => return Err(err).context("failed to plan route"),
    };

    let summary = RouteSummary::from_plan(&plan);
    let rendered = render_route(&summary, format)?;
    println!("{}", rendered.trim_end_matches('\n'));
    Ok(())
}
