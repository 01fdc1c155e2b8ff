//! # jse-core: Foundational Types for the JSON Schema Enforcer
//!
//! Leaf crate of the workspace. Everything the schema engine needs to talk
//! about a JSON document lives here; nothing here knows about schemas.
//!
//! ## Contents
//!
//! - [`value`]: the closed [`ValueKind`] classification over
//!   `serde_json::Value` (compiled with `preserve_order`, so mappings keep
//!   insertion order) and compact value previews for reports.
//! - [`pointer`]: [`JsonPointer`], the RFC 6901 address of a position in a
//!   document. Every violation is reported against one.
//! - [`document`]: [`parse_document`], which turns raw caller text into a
//!   value, an absent document, or a located [`ParseError`].
//! - [`repair`]: opt-in heuristic repair of the syntax mistakes that
//!   generated JSON commonly contains.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jse-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod pointer;
pub mod repair;
pub mod value;

pub use document::{parse_document, parse_document_with_repair};
pub use error::ParseError;
pub use pointer::JsonPointer;
pub use repair::repair;
pub use value::{preview, ValueKind};
