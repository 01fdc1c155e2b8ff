//! # Schema Load Errors
//!
//! Failures detected while turning a schema document into a
//! [`SchemaNode`](crate::SchemaNode) tree. These abort before any merge or
//! validation is attempted, so they never appear mixed with document
//! violations.
//!
//! Every structural error names the schema pointer (`at`) where it was
//! detected, e.g. `/properties/database/required`.

use thiserror::Error;

use jse_core::ParseError;

use crate::validate::Violations;

/// The schema document is unreadable, malformed, or structurally invalid.
#[derive(Error, Debug)]
pub enum SchemaLoadError {
    /// The schema file could not be read.
    #[error("cannot read schema file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The schema text is not well-formed JSON.
    #[error("schema is not valid JSON: {0}")]
    Parse(#[from] ParseError),

    /// A schema node is not a JSON object.
    #[error("schema node at {at} is not an object")]
    NotAnObject { at: String },

    /// A schema node has no `type`.
    #[error("schema node at {at} has no 'type'")]
    MissingType { at: String },

    /// A schema node names a type outside the supported set.
    #[error("schema node at {at} has unsupported type '{found}'")]
    UnknownType { at: String, found: String },

    /// A keyword holds the wrong kind of JSON value.
    #[error("'{keyword}' at {at} must be {expected}")]
    InvalidKeyword {
        at: String,
        keyword: &'static str,
        expected: &'static str,
    },

    /// An array node has no `items`.
    #[error("array schema at {at} has no 'items'")]
    MissingItems { at: String },

    /// A required name is not declared under `properties`.
    #[error("required field '{field}' at {at} is not declared in 'properties'")]
    UnknownRequiredField { at: String, field: String },

    /// A default does not conform to the node that declares it.
    #[error("default at {at} does not conform to its schema:\n{violations}")]
    InvalidDefault { at: String, violations: Violations },

    /// A `$ref` does not point at anything in this document.
    #[error("unresolved reference '{reference}' at {at}")]
    UnresolvedReference { at: String, reference: String },

    /// A `$ref` chain leads back to a definition still being expanded.
    #[error("cyclic schema reference: {}", chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    /// The schema nests deeper than the loader allows.
    #[error("schema at {at} nests deeper than {limit} levels")]
    TooDeep { at: String, limit: usize },
}
