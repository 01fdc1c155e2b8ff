//! # Schema Model
//!
//! A schema is a tree of [`SchemaNode`]s: primitives, objects with ordered
//! fields, and arrays with a single item schema. Any node may carry a
//! default value that the merger injects where the input is absent.
//!
//! Trees are built once, either by the loader from a schema document or
//! programmatically with the builder methods below, and are read-only
//! afterwards. They hold no reference to any document they validate, so a
//! single tree can be shared across threads without locking.
//!
//! Builder-made trees skip the load-time checks until [`SchemaNode::verify`]
//! is called; the loader always calls it.

use std::fmt;

use jse_core::{JsonPointer, ValueKind};
use serde::Serialize;
use serde_json::Value;

use crate::error::SchemaLoadError;
use crate::merge::merge_retaining;
use crate::validate::validate;

/// Declared kind of a primitive node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    String,
    Integer,
    Number,
    Boolean,
}

impl PrimitiveKind {
    /// Whether a value of runtime kind `actual` satisfies this declaration.
    ///
    /// No coercion: `"8080"` is never an integer and `8080.0` is never an
    /// integer. An integer does satisfy `number`, since every JSON integer is
    /// a number; the reverse narrowing is not allowed.
    pub fn accepts(self, actual: ValueKind) -> bool {
        match self {
            PrimitiveKind::String => actual == ValueKind::String,
            PrimitiveKind::Integer => actual == ValueKind::Integer,
            PrimitiveKind::Number => matches!(actual, ValueKind::Number | ValueKind::Integer),
            PrimitiveKind::Boolean => actual == ValueKind::Boolean,
        }
    }
}

/// Declared kind of any node, as named in schema documents and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

impl SchemaKind {
    pub fn name(self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Integer => "integer",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
        }
    }
}

impl From<PrimitiveKind> for SchemaKind {
    fn from(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::String => SchemaKind::String,
            PrimitiveKind::Integer => SchemaKind::Integer,
            PrimitiveKind::Number => SchemaKind::Number,
            PrimitiveKind::Boolean => SchemaKind::Boolean,
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A primitive node.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveSchema {
    pub kind: PrimitiveKind,
    pub default: Option<Value>,
}

/// A named field of an object node.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub node: SchemaNode,
}

/// An object node: ordered fields, a required list, and a policy for
/// undeclared keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    /// Declared fields in declaration order.
    pub fields: Vec<Field>,
    /// Required field names, each present in `fields`, first occurrence kept.
    pub required: Vec<String>,
    /// Whether undeclared keys are allowed. Closed by default.
    pub allow_additional: bool,
    pub default: Option<Value>,
}

impl ObjectSchema {
    /// A closed object with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required field.
    pub fn required(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        let name = name.into();
        if !self.required.contains(&name) {
            self.required.push(name.clone());
        }
        self.fields.push(Field { name, node });
        self
    }

    /// Declare an optional field.
    pub fn optional(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        self.fields.push(Field {
            name: name.into(),
            node,
        });
        self
    }

    /// Set the policy for undeclared keys.
    pub fn allow_additional(mut self, allow: bool) -> Self {
        self.allow_additional = allow;
        self
    }

    /// Sub-schema of a declared field.
    pub fn field(&self, name: &str) -> Option<&SchemaNode> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.node)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// An array node: one item schema for every element.
#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema {
    pub items: Box<SchemaNode>,
    pub default: Option<Value>,
}

/// One node of a schema tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Primitive(PrimitiveSchema),
    Object(ObjectSchema),
    Array(ArraySchema),
}

impl SchemaNode {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        SchemaNode::Primitive(PrimitiveSchema {
            kind,
            default: None,
        })
    }

    pub fn string() -> Self {
        Self::primitive(PrimitiveKind::String)
    }

    pub fn integer() -> Self {
        Self::primitive(PrimitiveKind::Integer)
    }

    pub fn number() -> Self {
        Self::primitive(PrimitiveKind::Number)
    }

    pub fn boolean() -> Self {
        Self::primitive(PrimitiveKind::Boolean)
    }

    pub fn array(items: SchemaNode) -> Self {
        SchemaNode::Array(ArraySchema {
            items: Box::new(items),
            default: None,
        })
    }

    /// Attach (or replace) this node's default.
    pub fn with_default(mut self, value: Value) -> Self {
        match &mut self {
            SchemaNode::Primitive(p) => p.default = Some(value),
            SchemaNode::Object(o) => o.default = Some(value),
            SchemaNode::Array(a) => a.default = Some(value),
        }
        self
    }

    pub fn kind(&self) -> SchemaKind {
        match self {
            SchemaNode::Primitive(p) => p.kind.into(),
            SchemaNode::Object(_) => SchemaKind::Object,
            SchemaNode::Array(_) => SchemaKind::Array,
        }
    }

    pub fn default(&self) -> Option<&Value> {
        match self {
            SchemaNode::Primitive(p) => p.default.as_ref(),
            SchemaNode::Object(o) => o.default.as_ref(),
            SchemaNode::Array(a) => a.default.as_ref(),
        }
    }

    /// Whether merging this node over an absent input would inject at least
    /// one schema-declared default: its own, or (for objects) one declared
    /// anywhere among its fields.
    pub fn carries_default(&self) -> bool {
        if self.default().is_some() {
            return true;
        }
        match self {
            SchemaNode::Object(o) => o.fields.iter().any(|f| f.node.carries_default()),
            SchemaNode::Primitive(_) | SchemaNode::Array(_) => false,
        }
    }

    /// Check the structural invariants the loader guarantees.
    ///
    /// - every required name is a declared field;
    /// - every default, once merged over its own node, validates against it.
    ///
    /// Defaults are checked here, once, rather than on every merge, because
    /// a tree is reused across calls.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant, located by schema pointer.
    pub fn verify(&self) -> Result<(), SchemaLoadError> {
        self.verify_at(&JsonPointer::root())
    }

    fn verify_at(&self, at: &JsonPointer) -> Result<(), SchemaLoadError> {
        match self {
            SchemaNode::Primitive(_) => {}
            SchemaNode::Object(o) => {
                if let Some(name) = o.required.iter().find(|r| o.field(r).is_none()) {
                    return Err(SchemaLoadError::UnknownRequiredField {
                        at: at.child_key("required").to_string(),
                        field: name.clone(),
                    });
                }
                let properties = at.child_key("properties");
                for field in &o.fields {
                    field.node.verify_at(&properties.child_key(&field.name))?;
                }
            }
            SchemaNode::Array(a) => a.items.verify_at(&at.child_key("items"))?,
        }

        if let Some(default) = self.default() {
            let completed = merge_retaining(self, Some(default)).unwrap_or(Value::Null);
            let violations = validate(self, &completed, &JsonPointer::root());
            if !violations.is_empty() {
                return Err(SchemaLoadError::InvalidDefault {
                    at: at.child_key("default").to_string(),
                    violations,
                });
            }
        }
        Ok(())
    }

    /// Flatten the tree into one entry per node, parents before children.
    pub fn outline(&self) -> Vec<OutlineEntry> {
        let mut entries = Vec::new();
        self.outline_into(JsonPointer::root(), true, &mut entries);
        entries
    }

    fn outline_into(&self, path: JsonPointer, required: bool, out: &mut Vec<OutlineEntry>) {
        out.push(OutlineEntry {
            path: path.clone(),
            kind: self.kind(),
            required,
            default: self.default().cloned(),
        });
        match self {
            SchemaNode::Primitive(_) => {}
            SchemaNode::Object(o) => {
                for field in &o.fields {
                    field.node.outline_into(
                        path.child_key(&field.name),
                        o.is_required(&field.name),
                        out,
                    );
                }
            }
            SchemaNode::Array(a) => a.items.outline_into(path.child_key("*"), false, out),
        }
    }
}

impl From<ObjectSchema> for SchemaNode {
    fn from(object: ObjectSchema) -> Self {
        SchemaNode::Object(object)
    }
}

/// One line of a schema outline. Array items appear under a `*` segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineEntry {
    pub path: JsonPointer,
    pub kind: SchemaKind,
    pub required: bool,
    pub default: Option<Value>,
}

impl fmt::Display for OutlineEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{}",
            self.path,
            self.kind,
            if self.required { " required" } else { "" }
        )?;
        if let Some(default) = &self.default {
            write!(f, " default={}", jse_core::preview(default))?;
        }
        Ok(())
    }
}
