//! # Schema Subcommand
//!
//! Loads a schema the same way `enforce` does and prints its outline, one
//! node per line. A schema that fails to load is reported with the pointer
//! of the offending node and exit code 3.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use jse_schema::OutlineEntry;

use crate::EXIT_OK;

/// Arguments for the `jse schema` subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Schema file to inspect.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Print the outline as a JSON array.
    #[arg(long)]
    pub json: bool,
}

/// Execute the schema subcommand.
pub fn run_schema(args: &SchemaArgs) -> Result<u8> {
    let schema = crate::load_schema(&args.path)?;
    let outline = schema.outline();
    tracing::info!(path = %args.path.display(), nodes = outline.len(), "schema loaded");
    write_outline(&outline, args.json, &mut std::io::stdout().lock())?;
    Ok(EXIT_OK)
}

pub fn write_outline(outline: &[OutlineEntry], json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(outline)?)?;
    } else {
        for entry in outline {
            writeln!(out, "{entry}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jse_schema::SchemaNode;
    use serde_json::json;

    fn outline() -> Vec<OutlineEntry> {
        SchemaNode::from_value(&json!({
            "type": "object",
            "properties": {
                "host": {"type": "string"},
                "port": {"type": "integer", "default": 8080}
            },
            "required": ["host"]
        }))
        .unwrap()
        .outline()
    }

    #[test]
    fn text_outline_is_one_line_per_node() {
        let mut out = Vec::new();
        write_outline(&outline(), false, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "(root) object required\n/host string required\n/port integer default=8080\n"
        );
    }

    #[test]
    fn json_outline_lists_entries() {
        let mut out = Vec::new();
        write_outline(&outline(), true, &mut out).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[1], json!({"path": "/host", "kind": "string", "required": true, "default": null}));
        assert_eq!(parsed[2]["default"], json!(8080));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = SchemaArgs {
            path: dir.path().join("nope.json"),
            json: false,
        };
        assert!(run_schema(&args).is_err());
    }
}
