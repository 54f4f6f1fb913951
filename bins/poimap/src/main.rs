//! poimap - search and reduce point-of-interest datasets from the terminal
//!
//! Runs the same search, viewport and clustering logic the map viewer uses
//! against a local dataset file.

use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use poimap_core::{config::Config, exit_codes};
use poimap_geo::Bounds;
use poimap_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod output;

use commands::{cluster_radius, config, distance, search, view, viewport, Context};

/// Search and reduce point-of-interest datasets
#[derive(Parser)]
#[command(name = "poimap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to .poimap.toml or poimap.toml when present)
    #[arg(short, long, global = true, env = "POIMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Dataset location shared by the dataset commands
#[derive(clap::Args)]
struct DatasetArgs {
    /// Dataset JSON file
    dataset: PathBuf,

    /// URL the dataset is served from; checked against the source policy and
    /// used to resolve relative paths
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fuzzy-search a dataset
    Search {
        #[command(flatten)]
        source: DatasetArgs,

        /// Search query
        query: String,

        /// Compare case-sensitively
        #[arg(long)]
        case_sensitive: bool,

        /// Disable the edit-distance fallback
        #[arg(long)]
        exact: bool,
    },

    /// Records worth rendering in a viewport
    Viewport {
        #[command(flatten)]
        source: DatasetArgs,

        /// Southern edge
        #[arg(long, allow_hyphen_values = true)]
        south: f64,

        /// Western edge
        #[arg(long, allow_hyphen_values = true)]
        west: f64,

        /// Northern edge
        #[arg(long, allow_hyphen_values = true)]
        north: f64,

        /// Eastern edge
        #[arg(long, allow_hyphen_values = true)]
        east: f64,

        /// Zoom level
        #[arg(short, long)]
        zoom: Option<f64>,

        /// Search query applied first
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// What the viewer shows for a query and viewport
    View {
        #[command(flatten)]
        source: DatasetArgs,

        /// Search query
        #[arg(short, long, default_value = "")]
        query: String,

        /// Viewport as SOUTH,WEST,NORTH,EAST (defaults to all records)
        #[arg(short, long, value_parser = parse_bounds, allow_hyphen_values = true)]
        bounds: Option<Bounds>,

        /// Zoom level
        #[arg(short, long)]
        zoom: Option<f64>,
    },

    /// Levenshtein distance between two strings
    Distance {
        a: String,
        b: String,
    },

    /// Cluster radius for a record count
    ClusterRadius {
        count: usize,
    },

    /// Print the effective configuration
    Config,
}

fn parse_bounds(value: &str) -> Result<Bounds, String> {
    let edges: Vec<f64> = value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid number in bounds: {e}"))?;

    match edges.as_slice() {
        [south, west, north, east] => {
            Bounds::try_new(*south, *west, *north, *east).map_err(|e| e.to_string())
        }
        _ => Err(format!("expected SOUTH,WEST,NORTH,EAST, got {} values", edges.len())),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return report(&anyhow::Error::new(e)),
    };

    let logging = &config.schema.logging;
    let telemetry = TelemetryConfig {
        log_level: if cli.verbose {
            "debug".to_string()
        } else {
            logging.level.clone()
        },
        show_target: logging.show_target,
        ..TelemetryConfig::default()
    };
    if let Err(e) = poimap_telemetry::init_with_config(telemetry) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    let ctx = Context {
        config,
        format: cli.format,
        verbose: cli.verbose,
    };

    let result = match cli.command {
        Commands::Search {
            source,
            query,
            case_sensitive,
            exact,
        } => search::run(&ctx, &source.dataset, source.base_url.as_deref(), &query, case_sensitive, exact),

        Commands::Viewport {
            source,
            south,
            west,
            north,
            east,
            zoom,
            query,
        } => viewport::run(
            &ctx,
            &source.dataset,
            source.base_url.as_deref(),
            [south, west, north, east],
            zoom,
            &query,
        ),

        Commands::View {
            source,
            query,
            bounds,
            zoom,
        } => view::run(&ctx, &source.dataset, source.base_url.as_deref(), &query, bounds, zoom),

        Commands::Distance { a, b } => distance::run(&ctx, &a, &b),

        Commands::ClusterRadius { count } => cluster_radius::run(&ctx, count),

        Commands::Config => config::run(&ctx),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

/// Print an error and pick the exit code from its category
fn report(err: &anyhow::Error) -> ExitCode {
    eprintln!("{} {}", "Error:".red().bold(), err);

    let code = err
        .downcast_ref::<poimap_core::Error>()
        .map_or(exit_codes::FAILURE, |e| exit_codes::for_code(e.code));
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_bounds() {
        assert_eq!(parse_bounds("-1, -2, 3, 4").unwrap(), Bounds::new(-1.0, -2.0, 3.0, 4.0));
        assert!(parse_bounds("1,2,3").is_err());
        assert!(parse_bounds("3,0,1,4").is_err());
        assert!(parse_bounds("a,b,c,d").is_err());
    }
}
