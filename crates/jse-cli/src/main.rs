//! # jse CLI entry point
//!
//! Parses command-line arguments, installs logging, loads the optional
//! config file, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use jse_cli::config::Config;
use jse_cli::enforce::{run_enforce, EnforceArgs};
use jse_cli::patch::{run_patch, PatchArgs};
use jse_cli::schema::{run_schema, SchemaArgs};
use jse_cli::EXIT_ERROR;

/// JSON schema enforcer.
///
/// Completes JSON documents with schema-declared defaults, validates them,
/// and reports every deviation in a form a caller can act on.
#[derive(Parser, Debug)]
#[command(name = "jse", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log line format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Complete a JSON document with schema defaults and validate it.
    Enforce(EnforceArgs),

    /// Write JSON content to a file only if it is valid.
    Patch(PatchArgs),

    /// Load a schema and print its outline.
    Schema(SchemaArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match cli.log_format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }

    tracing::debug!("jse v{} starting", env!("CARGO_PKG_VERSION"));

    let result = Config::load(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Enforce(args) => run_enforce(args, &config),
        Commands::Patch(args) => run_patch(args, &config),
        Commands::Schema(args) => run_schema(args),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
