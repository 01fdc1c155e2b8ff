//! # jse-cli: Command-Line Front End for the JSON Schema Enforcer
//!
//! Provides the `jse` binary. The subcommands are thin: they read input,
//! call into `jse-schema`, and render the outcome in a line-oriented format
//! that a calling process (often an automated generator) can feed back into
//! its next attempt.
//!
//! ## Subcommands
//!
//! - `jse enforce`: complete a document with schema defaults and validate it.
//! - `jse patch`: write a JSON file only if the new content is valid.
//! - `jse schema`: load a schema and print its outline.
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | completed / written |
//! | 1 | schema violations |
//! | 2 | malformed JSON input |
//! | 3 | schema, config, or I/O error |
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from handler logic.
//! - Reports go to stderr; stdout carries only the completed document.

pub mod config;
pub mod enforce;
pub mod patch;
pub mod report;
pub mod schema;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jse_schema::SchemaNode;

/// Schema used when neither a flag nor the config file names one.
pub const DEFAULT_SCHEMA_PATH: &str = "assets/schema.json";

pub const EXIT_OK: u8 = 0;
pub const EXIT_VIOLATED: u8 = 1;
pub const EXIT_PARSE_FAILED: u8 = 2;
pub const EXIT_ERROR: u8 = 3;

/// Pick the schema path: command-line flag, then config, then the default.
pub fn resolve_schema_path(flag: Option<&Path>, configured: Option<&Path>) -> PathBuf {
    flag.or(configured)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCHEMA_PATH))
}

/// Load a schema file, attaching the path to any failure.
pub fn load_schema(path: &Path) -> Result<SchemaNode> {
    SchemaNode::from_file(path).with_context(|| format!("loading schema {}", path.display()))
}
