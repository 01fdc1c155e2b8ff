//! # jse-schema: Schema Model, Merge, Validate, Enforce
//!
//! Turns a JSON Schema subset into an immutable [`SchemaNode`] tree, then
//! uses that tree to complete documents with declared defaults and to report
//! every remaining deviation.
//!
//! ## Pipeline
//!
//! 1. [`loader`] reads a schema document (`type`, `properties`, `required`,
//!    `items`, `default`, `additionalProperties`, local `$ref`) and verifies
//!    it once, at load time.
//! 2. [`merge`] injects defaults wherever the input is absent, at any depth.
//! 3. [`validate`] walks the completed value and accumulates violations
//!    with JSON Pointer paths.
//! 4. [`engine`] wires the three together behind [`Enforcer::enforce`],
//!    which ends in exactly one [`EnforceOutcome`].
//!
//! ```
//! use jse_schema::{Enforcer, EnforceOutcome, SchemaNode};
//!
//! let schema = SchemaNode::from_json_str(
//!     r#"{"type": "object",
//!         "properties": {"host": {"type": "string"},
//!                        "port": {"type": "integer", "default": 8080}},
//!         "required": ["host"]}"#,
//! )
//! .unwrap();
//! let outcome = Enforcer::new(schema).enforce(r#"{"host": "10.0.0.5"}"#);
//! assert!(matches!(outcome, EnforceOutcome::Completed(_)));
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `jse-core` internally.
//! - Schema trees are immutable after load and safe to share across threads.
//! - Malformed input and schema violations are reported as distinct
//!   outcomes; a malformed schema is a [`SchemaLoadError`] and never reaches
//!   a document.

pub mod engine;
pub mod error;
pub mod loader;
pub mod merge;
pub mod node;
pub mod validate;

pub use engine::{enforce, EnforceOptions, EnforceOutcome, Enforcer};
pub use error::SchemaLoadError;
pub use loader::MAX_SCHEMA_DEPTH;
pub use merge::{merge, merge_retaining};
pub use node::{
    ArraySchema, Field, ObjectSchema, OutlineEntry, PrimitiveKind, PrimitiveSchema, SchemaKind,
    SchemaNode,
};
pub use validate::{validate, Violation, Violations};
