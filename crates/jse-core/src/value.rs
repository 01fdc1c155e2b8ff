//! # Value Kinds
//!
//! The runtime shape of a JSON value, as the schema engine sees it.
//!
//! Documents are held as `serde_json::Value`, which is already a closed sum
//! type over the six JSON shapes. The workspace enables `preserve_order`, so
//! `Map` keeps insertion order for stable output while its equality stays
//! key-order-insensitive.
//!
//! `ValueKind` splits JSON numbers into `Integer` and `Number` because the
//! schema language declares them as distinct kinds: a number whose textual
//! form was an integer (`8080`) is an `Integer`; anything with a fraction or
//! exponent (`8080.0`, `1e3`) is a `Number`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum length of a value preview before truncation.
const PREVIEW_LIMIT: usize = 40;

/// The runtime kind of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => ValueKind::Integer,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Lowercase name used in reports and schema documents.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compact single-line JSON rendering of `value`, truncated for reports.
///
/// Truncation happens on a character boundary and is marked with `...`.
pub fn preview(value: &Value) -> String {
    let rendered = value.to_string();
    if rendered.chars().count() <= PREVIEW_LIMIT {
        return rendered;
    }
    let mut cut: String = rendered.chars().take(PREVIEW_LIMIT).collect();
    cut.push_str("...");
    cut
}
