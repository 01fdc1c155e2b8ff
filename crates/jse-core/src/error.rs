//! # Error Types
//!
//! Errors raised before a document ever reaches the schema stage. Schema
//! load errors live with the schema model in `jse-schema`.

use thiserror::Error;

/// The raw input is not well-formed JSON.
///
/// Terminal for the call that produced it: there is no value to merge or
/// validate. Carries enough location context for a caller to correct the
/// text and try again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at line {line}, column {column}")]
pub struct ParseError {
    /// Parser message without the location suffix.
    pub message: String,
    /// 1-based line of the offending byte.
    pub line: usize,
    /// 1-based column of the offending byte.
    pub column: usize,
    /// Byte offset of the offending byte, clamped to the input length.
    pub offset: usize,
    /// Up to 20 characters either side of `offset`.
    pub snippet: String,
}

impl ParseError {
    /// Build a located parse error from a `serde_json` failure on `raw`.
    pub fn from_serde(err: &serde_json::Error, raw: &str) -> Self {
        let line = err.line();
        let column = err.column();
        let full = err.to_string();
        let suffix = format!(" at line {line} column {column}");
        let message = full
            .strip_suffix(suffix.as_str())
            .unwrap_or(full.as_str())
            .to_string();

        let (line, column) = settle_position(raw, line, column);
        let offset = byte_offset(raw, line, column);
        Self {
            message,
            line,
            column,
            offset,
            snippet: snippet_around(raw, offset, 20),
        }
    }
}

/// `serde_json` reports column 0 once it has consumed a newline. Move such a
/// position back onto that newline so both coordinates stay 1-based and
/// point at the line the offending token is on.
fn settle_position(raw: &str, line: usize, column: usize) -> (usize, usize) {
    if column > 0 {
        return (line, column);
    }
    if line <= 1 {
        return (1, 1);
    }
    let previous = raw.split('\n').nth(line - 2).unwrap_or("");
    (line - 1, previous.len() + 1)
}

/// Translate a 1-based line and column into a byte offset within `raw`.
fn byte_offset(raw: &str, line: usize, column: usize) -> usize {
    let line_start = if line <= 1 {
        0
    } else {
        raw.match_indices('\n')
            .nth(line - 2)
            .map(|(i, _)| i + 1)
            .unwrap_or(raw.len())
    };
    (line_start + column.saturating_sub(1)).min(raw.len())
}

/// Take up to `radius` characters on each side of `offset`.
fn snippet_around(raw: &str, offset: usize, radius: usize) -> String {
    let mut at = offset.min(raw.len());
    while !raw.is_char_boundary(at) {
        at -= 1;
    }
    let (before, after) = raw.split_at(at);
    let head: String = {
        let mut chars: Vec<char> = before.chars().rev().take(radius).collect();
        chars.reverse();
        chars.into_iter().collect()
    };
    let tail: String = after.chars().take(radius).collect();
    format!("{head}{tail}")
}
