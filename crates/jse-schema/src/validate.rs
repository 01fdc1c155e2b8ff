//! # Validator
//!
//! Walks a schema node and a (normally already merged) value together and
//! collects every deviation in one pass. It never stops at the first error:
//! the caller gets the full diagnostic picture in a single round trip and
//! can correct everything before trying again.
//!
//! ## Ordering
//!
//! Violation order is deterministic. Within an object: missing required
//! fields in `required` order, then declared fields present in the value in
//! declaration order (recursing), then undeclared keys in document order.
//! Arrays are walked in index order.

use std::fmt;

use jse_core::{preview, JsonPointer, ValueKind};
use serde::Serialize;
use serde_json::Value;

use crate::node::{SchemaKind, SchemaNode};

/// One deviation of a value from its schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum Violation {
    /// The runtime kind at `path` differs from the declared kind.
    TypeMismatch {
        path: JsonPointer,
        expected: SchemaKind,
        actual: ValueKind,
        /// Compact preview of the offending value.
        found: String,
    },
    /// A required field is absent even after defaults were merged in.
    MissingRequiredField { path: JsonPointer },
    /// A field is present that a closed object does not declare.
    UnknownField { path: JsonPointer },
}

impl Violation {
    pub fn path(&self) -> &JsonPointer {
        match self {
            Violation::TypeMismatch { path, .. }
            | Violation::MissingRequiredField { path }
            | Violation::UnknownField { path } => path,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::TypeMismatch {
                path,
                expected,
                actual,
                found,
            } => write!(f, "{path}: expected {expected}, found {actual} ({found})"),
            Violation::MissingRequiredField { path } => write!(f, "{path}: missing required field"),
            Violation::UnknownField { path } => write!(f, "{path}: unknown field"),
        }
    }
}

/// Every violation found in one document, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.0
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {v}")?;
        }
        Ok(())
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Check `value` against `schema`, reporting paths relative to `path`.
pub fn validate(schema: &SchemaNode, value: &Value, path: &JsonPointer) -> Violations {
    let mut found = Vec::new();
    walk(schema, value, path, &mut found);
    Violations(found)
}

fn walk(schema: &SchemaNode, value: &Value, path: &JsonPointer, out: &mut Vec<Violation>) {
    match schema {
        SchemaNode::Primitive(primitive) => {
            if !primitive.kind.accepts(ValueKind::of(value)) {
                out.push(mismatch(path, schema.kind(), value));
            }
        }
        SchemaNode::Object(object) => {
            let Value::Object(map) = value else {
                out.push(mismatch(path, SchemaKind::Object, value));
                return;
            };
            for name in &object.required {
                if !map.contains_key(name) {
                    out.push(Violation::MissingRequiredField {
                        path: path.child_key(name),
                    });
                }
            }
            for field in &object.fields {
                if let Some(present) = map.get(&field.name) {
                    walk(&field.node, present, &path.child_key(&field.name), out);
                }
            }
            if !object.allow_additional {
                for key in map.keys() {
                    if object.field(key).is_none() {
                        out.push(Violation::UnknownField {
                            path: path.child_key(key),
                        });
                    }
                }
            }
        }
        SchemaNode::Array(array) => {
            let Value::Array(items) = value else {
                out.push(mismatch(path, SchemaKind::Array, value));
                return;
            };
            for (index, item) in items.iter().enumerate() {
                walk(&array.items, item, &path.child_index(index), out);
            }
        }
    }
}

fn mismatch(path: &JsonPointer, expected: SchemaKind, value: &Value) -> Violation {
    Violation::TypeMismatch {
        path: path.clone(),
        expected,
        actual: ValueKind::of(value),
        found: preview(value),
    }
}
