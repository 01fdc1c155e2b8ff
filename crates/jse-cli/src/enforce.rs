//! # Enforce Subcommand
//!
//! Completes a JSON document with schema defaults and validates it. The
//! completed document is printed on success; otherwise the report tells the
//! caller exactly what to fix before trying again.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use jse_schema::{EnforceOptions, Enforcer};

use crate::config::Config;
use crate::report::{write_outcome, ReportFormat};

/// Arguments for the `jse enforce` subcommand.
#[derive(Args, Debug)]
pub struct EnforceArgs {
    /// The raw JSON document. Read from stdin when no input flag is given.
    #[arg(long, conflicts_with = "input_file")]
    pub input: Option<String>,

    /// Read the raw JSON document from a file.
    #[arg(long, value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Schema file (defaults to the config value, then assets/schema.json).
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Apply heuristic repair to malformed input.
    #[arg(long)]
    pub repair: bool,

    /// Print the completed document on a single line.
    #[arg(long)]
    pub compact: bool,

    /// Format of the violation report.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub report: ReportFormat,
}

/// Execute the enforce subcommand.
///
/// Returns exit code: 0 completed, 1 schema violations, 2 malformed input.
pub fn run_enforce(args: &EnforceArgs, config: &Config) -> Result<u8> {
    let schema_path = crate::resolve_schema_path(args.schema.as_deref(), config.schema.as_deref());
    let schema = crate::load_schema(&schema_path)?;
    let options = EnforceOptions {
        repair: args.repair || config.repair,
    };
    let raw = read_input(args)?;

    let outcome = Enforcer::with_options(schema, options).enforce(&raw);
    tracing::info!(
        schema = %schema_path.display(),
        outcome = outcome.label(),
        "enforced document"
    );

    write_outcome(
        &outcome,
        args.compact || config.compact,
        args.report,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )
}

fn read_input(args: &EnforceArgs) -> Result<String> {
    if let Some(raw) = &args.input {
        return Ok(raw.clone());
    }
    if let Some(path) = &args.input_file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("reading input file {}", path.display()));
    }
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("reading input from stdin")?;
    Ok(raw)
}
