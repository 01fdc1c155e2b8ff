//! # Schema Loader
//!
//! Builds a [`SchemaNode`] tree from a schema document:
//!
//! ```json
//! {
//!   "type": "object",
//!   "properties": {
//!     "host": { "type": "string" },
//!     "port": { "type": "integer", "default": 8080 },
//!     "tags": { "type": "array", "items": { "type": "string" }, "default": [] }
//!   },
//!   "required": ["host", "port", "tags"],
//!   "additionalProperties": false
//! }
//! ```
//!
//! Recognised keywords: `type`, `properties`, `required`,
//! `additionalProperties` (boolean, defaults to `false`), `items`, `default`
//! and `$ref`. Annotation keywords such as `title` or `description` are
//! ignored; `definitions`/`$defs` are only read through `$ref`.
//!
//! ## References
//!
//! `$ref` must be a local pointer (`#/definitions/address`,
//! `#/$defs/address`, or any `#/...` pointer into the same document). The
//! target is expanded in place; errors inside it are located at the
//! target's own pointer. Each target is loaded once and reused at every
//! use site. A chain of references that returns to a
//! definition still being expanded is a cyclic schema and is rejected: the
//! schema model has no recursive nodes.
//!
//! After building, [`SchemaNode::verify`] checks every default against its
//! own node, so a loaded tree never injects a default that would fail
//! validation.

use std::collections::HashMap;
use std::path::Path;

use jse_core::{parse_document, JsonPointer};
use serde_json::{Map, Value};

use crate::error::SchemaLoadError;
use crate::node::{ArraySchema, Field, ObjectSchema, PrimitiveKind, PrimitiveSchema, SchemaNode};

/// Maximum nesting depth of a schema, references included.
pub const MAX_SCHEMA_DEPTH: usize = 64;

impl SchemaNode {
    /// Build a tree from a parsed schema document.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaLoadError`] naming the schema pointer of the first
    /// structural defect found.
    pub fn from_value(document: &Value) -> Result<Self, SchemaLoadError> {
        let mut loader = Loader {
            root: document,
            expanding: Vec::new(),
            loaded: HashMap::new(),
            deepest: 0,
        };
        let node = loader.load(document, &JsonPointer::root(), 0)?;
        node.verify()?;
        Ok(node)
    }

    /// Build a tree from schema text.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaLoadError::Parse`] for malformed JSON, or any
    /// structural error from [`SchemaNode::from_value`].
    pub fn from_json_str(text: &str) -> Result<Self, SchemaLoadError> {
        match parse_document(text)? {
            Some(document) => Self::from_value(&document),
            None => Err(SchemaLoadError::NotAnObject {
                at: JsonPointer::root().to_string(),
            }),
        }
    }

    /// Read and build a tree from a schema file.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaLoadError::Io`] if the file cannot be read, otherwise
    /// as [`SchemaNode::from_json_str`].
    pub fn from_file(path: &Path) -> Result<Self, SchemaLoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| SchemaLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let node = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), kind = %node.kind(), "loaded schema");
        Ok(node)
    }
}

struct Loader<'a> {
    root: &'a Value,
    /// References currently being expanded, outermost first.
    expanding: Vec<String>,
    /// Expanded targets by reference, with how many levels each spans.
    loaded: HashMap<String, (SchemaNode, usize)>,
    /// Deepest level reached by the current load.
    deepest: usize,
}

impl<'a> Loader<'a> {
    fn load(&mut self, node: &'a Value, at: &JsonPointer, depth: usize) -> Result<SchemaNode, SchemaLoadError> {
        self.deepest = self.deepest.max(depth);
        if depth > MAX_SCHEMA_DEPTH {
            return Err(SchemaLoadError::TooDeep {
                at: at.to_string(),
                limit: MAX_SCHEMA_DEPTH,
            });
        }
        let obj = node.as_object().ok_or_else(|| SchemaLoadError::NotAnObject {
            at: at.to_string(),
        })?;

        if let Some(reference) = obj.get("$ref") {
            return self.load_reference(reference, at, depth);
        }

        let ty = obj
            .get("type")
            .ok_or_else(|| SchemaLoadError::MissingType { at: at.to_string() })?
            .as_str()
            .ok_or_else(|| invalid(at, "type", "a string"))?;
        let default = obj.get("default").cloned();

        let kind = match ty {
            "string" => PrimitiveKind::String,
            "integer" => PrimitiveKind::Integer,
            "number" => PrimitiveKind::Number,
            "boolean" => PrimitiveKind::Boolean,
            "object" => return self.load_object(obj, default, at, depth),
            "array" => return self.load_array(obj, default, at, depth),
            other => {
                return Err(SchemaLoadError::UnknownType {
                    at: at.to_string(),
                    found: other.to_string(),
                })
            }
        };
        Ok(SchemaNode::Primitive(PrimitiveSchema { kind, default }))
    }

    fn load_reference(&mut self, reference: &Value, at: &JsonPointer, depth: usize) -> Result<SchemaNode, SchemaLoadError> {
        let reference = reference
            .as_str()
            .ok_or_else(|| invalid(at, "$ref", "a string"))?;

        if self.expanding.iter().any(|r| r == reference) {
            let mut chain = self.expanding.clone();
            chain.push(reference.to_string());
            return Err(SchemaLoadError::CyclicReference { chain });
        }

        let depth = depth + 1;
        if let Some((node, span)) = self.loaded.get(reference) {
            if depth + span > MAX_SCHEMA_DEPTH {
                return Err(SchemaLoadError::TooDeep {
                    at: at.to_string(),
                    limit: MAX_SCHEMA_DEPTH,
                });
            }
            self.deepest = self.deepest.max(depth + span);
            return Ok(node.clone());
        }

        let root = self.root;
        let (location, target) = reference
            .strip_prefix('#')
            .and_then(|fragment| Some((JsonPointer::parse(fragment)?, root.pointer(fragment)?)))
            .ok_or_else(|| SchemaLoadError::UnresolvedReference {
                at: at.to_string(),
                reference: reference.to_string(),
            })?;

        let outer = std::mem::replace(&mut self.deepest, depth);
        self.expanding.push(reference.to_string());
        let node = self.load(target, &location, depth);
        self.expanding.pop();
        let span = self.deepest - depth;
        self.deepest = self.deepest.max(outer);

        let node = node?;
        self.loaded.insert(reference.to_string(), (node.clone(), span));
        Ok(node)
    }

    fn load_object(
        &mut self,
        obj: &'a Map<String, Value>,
        default: Option<Value>,
        at: &JsonPointer,
        depth: usize,
    ) -> Result<SchemaNode, SchemaLoadError> {
        let mut fields = Vec::new();
        if let Some(properties) = obj.get("properties") {
            let properties = properties
                .as_object()
                .ok_or_else(|| invalid(at, "properties", "an object"))?;
            let base = at.child_key("properties");
            for (name, sub) in properties {
                let node = self.load(sub, &base.child_key(name), depth + 1)?;
                fields.push(Field {
                    name: name.clone(),
                    node,
                });
            }
        }

        let mut required: Vec<String> = Vec::new();
        if let Some(list) = obj.get("required") {
            let list = list
                .as_array()
                .ok_or_else(|| invalid(at, "required", "an array of strings"))?;
            for entry in list {
                let name = entry
                    .as_str()
                    .ok_or_else(|| invalid(at, "required", "an array of strings"))?;
                if !fields.iter().any(|f| f.name == name) {
                    return Err(SchemaLoadError::UnknownRequiredField {
                        at: at.child_key("required").to_string(),
                        field: name.to_string(),
                    });
                }
                if !required.iter().any(|r| r == name) {
                    required.push(name.to_string());
                }
            }
        }

        let allow_additional = match obj.get("additionalProperties") {
            None => false,
            Some(Value::Bool(allow)) => *allow,
            Some(_) => return Err(invalid(at, "additionalProperties", "a boolean")),
        };

        Ok(SchemaNode::Object(ObjectSchema {
            fields,
            required,
            allow_additional,
            default,
        }))
    }

    fn load_array(
        &mut self,
        obj: &'a Map<String, Value>,
        default: Option<Value>,
        at: &JsonPointer,
        depth: usize,
    ) -> Result<SchemaNode, SchemaLoadError> {
        let items = obj
            .get("items")
            .ok_or_else(|| SchemaLoadError::MissingItems { at: at.to_string() })?;
        if !items.is_object() {
            return Err(invalid(at, "items", "an object"));
        }
        let items = self.load(items, &at.child_key("items"), depth + 1)?;
        Ok(SchemaNode::Array(ArraySchema {
            items: Box::new(items),
            default,
        }))
    }
}

fn invalid(at: &JsonPointer, keyword: &'static str, expected: &'static str) -> SchemaLoadError {
    SchemaLoadError::InvalidKeyword {
        at: at.to_string(),
        keyword,
        expected,
    }
}
