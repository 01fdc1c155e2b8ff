//! # Document Parsing
//!
//! Turns raw caller text into a value the schema engine can walk.
//!
//! Three outcomes: a present value, an absent document, or a located
//! [`ParseError`]. Blank input and the literal `None` are treated as an
//! absent document so the engine can complete it purely from defaults. The
//! literal `null` is a present Null value.

use serde_json::Value;

use crate::error::ParseError;
use crate::repair::repair;

/// Text that callers send to mean "no document".
const ABSENT_MARKER: &str = "None";

/// Parse raw input into an optional document.
///
/// # Errors
///
/// Returns a [`ParseError`] locating the first syntax error.
pub fn parse_document(raw: &str) -> Result<Option<Value>, ParseError> {
    if is_absent(raw) {
        return Ok(None);
    }
    serde_json::from_str(raw)
        .map(Some)
        .map_err(|e| ParseError::from_serde(&e, raw))
}

/// Parse raw input, retrying once on [`repair`]ed text if it is malformed.
///
/// When the repaired text still does not parse, the error reported is the
/// one for the caller's original text, so its location refers to what the
/// caller actually sent.
pub fn parse_document_with_repair(raw: &str) -> Result<Option<Value>, ParseError> {
    let original_err = match parse_document(raw) {
        Ok(doc) => return Ok(doc),
        Err(e) => e,
    };

    tracing::debug!(error = %original_err, "malformed document, attempting heuristic repair");
    let repaired = repair(raw);
    match parse_document(&repaired) {
        Ok(doc) => {
            tracing::debug!("document repaired");
            Ok(doc)
        }
        Err(_) => Err(original_err),
    }
}

fn is_absent(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed == ABSENT_MARKER
}
