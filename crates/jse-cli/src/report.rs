//! # Outcome Rendering
//!
//! Formats engine outcomes for a calling process. The completed document
//! goes to stdout; violation reports and parse diagnostics go to stderr in
//! a fixed line format:
//!
//! ```text
//! [SCHEMA ENFORCER REPORT]
//! - /port: expected integer, found string ("8080")
//! ```
//!
//! ```text
//! JSON_ERROR: EOF while parsing a value
//! LOCATION: Line 1, Column 8
//! SNIPPET: ...{"host":...
//! ```

use std::io::Write;

use anyhow::Result;
use jse_core::ParseError;
use jse_schema::{EnforceOutcome, Violations};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::{EXIT_OK, EXIT_PARSE_FAILED, EXIT_VIOLATED};

/// How violation reports are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// `[SCHEMA ENFORCER REPORT]` followed by one `- ` line per violation.
    #[default]
    Text,
    /// One JSON array of tagged violation objects.
    Json,
}

/// Serialize a completed document, 4-space indented unless `compact`.
pub fn render_document(value: &Value, compact: bool) -> Result<String> {
    if compact {
        return Ok(serde_json::to_string(value)?);
    }
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

pub fn render_violations(violations: &Violations, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => {
            let mut text = String::from("[SCHEMA ENFORCER REPORT]");
            for violation in violations {
                text.push_str("\n- ");
                text.push_str(&violation.to_string());
            }
            Ok(text)
        }
        ReportFormat::Json => Ok(serde_json::to_string(violations)?),
    }
}

pub fn render_parse_error(err: &ParseError) -> String {
    format!(
        "JSON_ERROR: {}\nLOCATION: Line {}, Column {}\nSNIPPET: ...{}...",
        err.message, err.line, err.column, err.snippet
    )
}

/// Write `outcome` to the given streams and return its exit code.
pub fn write_outcome(
    outcome: &EnforceOutcome,
    compact: bool,
    format: ReportFormat,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<u8> {
    match outcome {
        EnforceOutcome::Completed(value) => {
            writeln!(out, "{}", render_document(value, compact)?)?;
            Ok(EXIT_OK)
        }
        EnforceOutcome::SchemaViolated(violations) => {
            writeln!(err, "{}", render_violations(violations, format)?)?;
            Ok(EXIT_VIOLATED)
        }
        EnforceOutcome::ParseFailed(parse) => {
            writeln!(err, "{}", render_parse_error(parse))?;
            Ok(EXIT_PARSE_FAILED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jse_schema::{enforce, ObjectSchema, SchemaNode};
    use serde_json::json;

    fn schema() -> SchemaNode {
        ObjectSchema::new()
            .required("host", SchemaNode::string())
            .required("port", SchemaNode::integer().with_default(json!(8080)))
            .into()
    }

    fn run(raw: &str) -> (u8, String, String) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = write_outcome(&enforce(&schema(), raw), false, ReportFormat::Text, &mut out, &mut err)
            .unwrap();
        (code, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn pretty_output_uses_four_spaces() {
        let text = render_document(&json!({"a": [1]}), false).unwrap();
        assert_eq!(text, "{\n    \"a\": [\n        1\n    ]\n}");
        assert_eq!(render_document(&json!({"a": [1]}), true).unwrap(), r#"{"a":[1]}"#);
    }

    #[test]
    fn completed_goes_to_stdout() {
        let (code, out, err) = run(r#"{"host": "h"}"#);
        assert_eq!(code, EXIT_OK);
        assert_eq!(out, "{\n    \"host\": \"h\",\n    \"port\": 8080\n}\n");
        assert!(err.is_empty());
    }

    #[test]
    fn violations_go_to_stderr() {
        let (code, out, err) = run(r#"{"host": "h", "port": "80", "x": 1}"#);
        assert_eq!(code, EXIT_VIOLATED);
        assert!(out.is_empty());
        assert_eq!(
            err,
            "[SCHEMA ENFORCER REPORT]\n\
             - /port: expected integer, found string (\"80\")\n\
             - /x: unknown field\n"
        );
    }

    #[test]
    fn parse_failure_reports_location() {
        let (code, out, err) = run(r#"{"host":"#);
        assert_eq!(code, EXIT_PARSE_FAILED);
        assert!(out.is_empty());
        let lines: Vec<&str> = err.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("JSON_ERROR: "));
        assert_eq!(lines[1], "LOCATION: Line 1, Column 8");
        assert_eq!(lines[2], r#"SNIPPET: ...{"host":..."#);
    }

    #[test]
    fn json_report_is_machine_readable() {
        let outcome = enforce(&schema(), r#"{"port": 1}"#);
        let text = render_violations(outcome.violations().unwrap(), ReportFormat::Json).unwrap();
        assert_eq!(
            serde_json::from_str::<Value>(&text).unwrap(),
            json!([{"violation": "missing_required_field", "path": "/host"}])
        );
    }
}
