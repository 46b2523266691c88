//! # simpleschema CLI entry point
//!
//! Parses command-line arguments, loads configuration, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use simpleschema_cli::build::{run_build, BuildArgs};
use simpleschema_cli::config::CliConfig;
use simpleschema_cli::inspect::{run_inspect, InspectArgs};
use simpleschema_cli::types::{run_types, TypesArgs};

/// SimpleSchema — compact type expressions to JSON Schema.
///
/// Converts field definitions such as `"[]Person | required=true"` into
/// the structural schemas Kubernetes-style API validators consume.
#[derive(Parser, Debug)]
#[command(name = "simpleschema", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the schema for a field definition file.
    Build(BuildArgs),

    /// Resolve a single type expression and print its schema.
    Inspect(InspectArgs),

    /// List the types registered by a set of type definition files.
    Types(TypesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match CliConfig::discover(cli.config.as_deref(), &cwd) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };
    tracing::debug!(?config, "resolved configuration");

    let result = match cli.command {
        Commands::Build(args) => run_build(&args, &config),
        Commands::Inspect(args) => run_inspect(&args, &config),
        Commands::Types(args) => run_types(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
