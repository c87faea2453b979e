use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use interstellar_cli::commands::distances::{handle_distances_command, DistancesCommandArgs};
use interstellar_cli::commands::planets::handle_planets_command;
use interstellar_cli::commands::route::{handle_route_command, RouteCommandArgs};
use interstellar_cli::commands::validate::handle_validate_command;
use interstellar_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Interstellar route graph utilities")]
struct Cli {
    /// Override the dataset file or directory path.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the cheapest route between two planets.
    Route(RouteCommandArgs),
    /// Show the distance from one planet to every other planet.
    Distances(DistancesCommandArgs),
    /// List the planets in the dataset.
    Planets,
    /// Audit the dataset records.
    Validate,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let target = cli.data.as_deref();

    match &cli.command {
        Command::Route(args) => handle_route_command(target, cli.format, args),
        Command::Distances(args) => handle_distances_command(target, cli.format, args),
        Command::Planets => handle_planets_command(target, cli.format),
        Command::Validate => handle_validate_command(target, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
