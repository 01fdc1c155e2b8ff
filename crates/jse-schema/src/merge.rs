//! # Merger
//!
//! Walks a schema node and a possibly absent input together and produces a
//! completed value: schema-declared defaults are injected wherever the input
//! is absent, at every depth, and present values pass through unchanged.
//!
//! The merger never fails and never type-checks. A present value whose shape
//! does not match the schema (a string where an object is declared, a
//! mistyped primitive) is passed through as-is for the validator to report.
//!
//! ## Absent positions
//!
//! - A node with a default yields that default, itself merged over the node
//!   so nested defaults inside it still fill.
//! - An object without a default yields a new object built field by field.
//! - An array without a default yields `[]`.
//! - A primitive without a default yields nothing: a value cannot be
//!   invented.
//!
//! Inside an object, an absent declared field is written only when it is
//! required or its sub-schema carries a default somewhere. Optional fields
//! with nothing to inject stay absent, which keeps merging idempotent.
//!
//! ## Key order
//!
//! Declared fields come first in declaration order, followed by undeclared
//! input keys in input order when the object allows them.

use serde_json::{Map, Value};

use crate::node::{ObjectSchema, SchemaNode};

/// Complete `input` against `schema`.
///
/// Undeclared keys under a closed object are dropped. Returns `None` only
/// when `input` is absent and `schema` is a primitive without a default.
pub fn merge(schema: &SchemaNode, input: Option<&Value>) -> Option<Value> {
    Merger {
        retain_undeclared: false,
    }
    .merge(schema, input)
}

/// Like [`merge`], but undeclared keys under closed objects are kept (after
/// the declared ones) so that validation can report them.
pub fn merge_retaining(schema: &SchemaNode, input: Option<&Value>) -> Option<Value> {
    Merger {
        retain_undeclared: true,
    }
    .merge(schema, input)
}

#[derive(Debug, Clone, Copy)]
struct Merger {
    retain_undeclared: bool,
}

impl Merger {
    fn merge(self, schema: &SchemaNode, input: Option<&Value>) -> Option<Value> {
        match input {
            Some(value) => Some(self.merge_present(schema, value)),
            None => self.fill(schema),
        }
    }

    /// Value for an absent position.
    fn fill(self, schema: &SchemaNode) -> Option<Value> {
        if let Some(default) = schema.default() {
            return Some(self.merge_present(schema, default));
        }
        match schema {
            SchemaNode::Primitive(_) => None,
            SchemaNode::Array(_) => Some(Value::Array(Vec::new())),
            SchemaNode::Object(object) => Some(Value::Object(self.merge_fields(object, None))),
        }
    }

    fn merge_present(self, schema: &SchemaNode, value: &Value) -> Value {
        match (schema, value) {
            (SchemaNode::Object(object), Value::Object(map)) => {
                Value::Object(self.merge_fields(object, Some(map)))
            }
            (SchemaNode::Array(array), Value::Array(items)) => Value::Array(
                items
                    .iter()
                    .map(|item| self.merge_present(&array.items, item))
                    .collect(),
            ),
            // Primitives and shape mismatches pass through for the validator.
            _ => value.clone(),
        }
    }

    fn merge_fields(self, object: &ObjectSchema, input: Option<&Map<String, Value>>) -> Map<String, Value> {
        let mut out = Map::new();

        for field in &object.fields {
            match input.and_then(|map| map.get(&field.name)) {
                Some(present) => {
                    out.insert(field.name.clone(), self.merge_present(&field.node, present));
                }
                None => {
                    if !object.is_required(&field.name) && !field.node.carries_default() {
                        continue;
                    }
                    if let Some(filled) = self.fill(&field.node) {
                        out.insert(field.name.clone(), filled);
                    }
                }
            }
        }

        if let Some(map) = input {
            if object.allow_additional || self.retain_undeclared {
                for (key, value) in map {
                    if object.field(key).is_none() {
                        out.insert(key.clone(), value.clone());
                    }
                }
            }
        }

        out
    }
}
