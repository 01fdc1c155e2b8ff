//! # Patch Subcommand
//!
//! Writes new JSON content to a file only if the content is valid: parseable
//! and, when a schema is given, conforming after defaults are merged in. On
//! failure the target file is left untouched and the caller gets the same
//! located report as `jse enforce`, so it can correct the content and retry.
//!
//! The file is replaced atomically: the document goes to a uniquely named
//! temp file in the target's directory, is synced, and is renamed over the
//! target.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use jse_core::{parse_document, parse_document_with_repair};
use jse_schema::{EnforceOptions, EnforceOutcome, Enforcer};
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::config::Config;
use crate::report::{render_document, render_parse_error, write_outcome, ReportFormat};
use crate::{EXIT_OK, EXIT_PARSE_FAILED};

/// Arguments for the `jse patch` subcommand.
#[derive(Args, Debug)]
pub struct PatchArgs {
    /// File to write.
    #[arg(long, value_name = "FILE")]
    pub filepath: PathBuf,

    /// New JSON content for the file.
    #[arg(long)]
    pub content: String,

    /// Enforce the content against this schema before writing.
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Apply heuristic repair to malformed content.
    #[arg(long)]
    pub repair: bool,
}

/// Execute the patch subcommand.
///
/// Returns exit code: 0 written, 1 schema violations, 2 malformed content.
pub fn run_patch(args: &PatchArgs, config: &Config) -> Result<u8> {
    let repair = args.repair || config.repair;
    let mut stderr = std::io::stderr().lock();

    let document = match args.schema.as_deref().or(config.schema.as_deref()) {
        Some(schema_path) => {
            let schema = crate::load_schema(schema_path)?;
            match Enforcer::with_options(schema, EnforceOptions { repair }).enforce(&args.content) {
                EnforceOutcome::Completed(value) => value,
                failed => {
                    return write_outcome(
                        &failed,
                        false,
                        ReportFormat::Text,
                        &mut std::io::sink(),
                        &mut stderr,
                    );
                }
            }
        }
        None => match parse_content(&args.content, repair) {
            Ok(Some(value)) => value,
            Ok(None) => {
                writeln!(stderr, "JSON_ERROR: content is empty")?;
                return Ok(EXIT_PARSE_FAILED);
            }
            Err(report) => {
                writeln!(stderr, "{report}")?;
                return Ok(EXIT_PARSE_FAILED);
            }
        },
    };

    write_atomic(&args.filepath, &render_document(&document, false)?)?;
    tracing::info!(path = %args.filepath.display(), "patched file");
    println!("SUCCESS: Valid JSON saved to {}", args.filepath.display());
    Ok(EXIT_OK)
}

fn parse_content(content: &str, repair: bool) -> std::result::Result<Option<Value>, String> {
    let parsed = if repair {
        parse_document_with_repair(content)
    } else {
        parse_document(content)
    };
    parsed.map_err(|e| render_parse_error(&e))
}

/// Replace `path` with `contents` via a synced, uniquely named temp file in
/// the same directory. The temp file is removed on every failure path.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
            parent
        }
        None => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to create temp file in {}", parent.display()))?;
    temp.write_all(contents.as_bytes())
        .and_then(|()| temp.write_all(b"\n"))
        .and_then(|()| temp.as_file().sync_all())
        .with_context(|| format!("failed to write temp file: {}", temp.path().display()))?;
    temp.persist(path)
        .with_context(|| format!("failed to replace {}", path.display()))?;

    if let Ok(dir) = File::open(parent) {
        let _ = dir.sync_all();
    }
    Ok(())
}
