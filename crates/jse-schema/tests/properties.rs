//! Property tests for merge and validate over arbitrary input documents.

use jse_core::{JsonPointer, ValueKind};
use jse_schema::{merge, merge_retaining, validate, Enforcer, SchemaKind, SchemaNode, Violation};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn schema_document() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "host": {"type": "string"},
            "port": {"type": "integer", "default": 8080},
            "ratio": {"type": "number"},
            "tags": {"type": "array", "items": {"type": "string"}, "default": []},
            "database": {
                "type": "object",
                "properties": {
                    "host": {"type": "string", "default": "localhost"},
                    "port": {"type": "integer", "default": 5432},
                    "replicas": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "host": {"type": "string"},
                                "weight": {"type": "integer", "default": 1}
                            },
                            "required": ["host", "weight"]
                        }
                    }
                }
            },
            "debug": {"type": "boolean", "default": false}
        },
        "required": ["host", "port"]
    })
}

fn schema() -> SchemaNode {
    SchemaNode::from_value(&schema_document()).unwrap()
}

/// A schema whose every leaf carries a default.
fn fully_defaulted() -> SchemaNode {
    SchemaNode::from_value(&serde_json::json!({
        "type": "object",
        "properties": {
            "name": {"type": "string", "default": "svc"},
            "limits": {
                "type": "object",
                "properties": {
                    "cpu": {"type": "number", "default": 0.5},
                    "memory": {"type": "integer", "default": 512}
                },
                "required": ["cpu", "memory"]
            },
            "labels": {"type": "array", "items": {"type": "string"}, "default": ["a"]}
        },
        "required": ["name", "limits", "labels"]
    }))
    .unwrap()
}

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| serde_json::json!(n)),
        (-1000.0f64..1000.0).prop_map(|f| serde_json::json!(f)),
        "[a-z0-9 ]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::btree_map(field_name(), inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Mostly declared names, so that inputs actually exercise the schema.
fn field_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("host".to_string()),
        Just("port".to_string()),
        Just("ratio".to_string()),
        Just("tags".to_string()),
        Just("database".to_string()),
        Just("replicas".to_string()),
        Just("weight".to_string()),
        "[a-z]{1,6}",
    ]
}

/// Top-level entries with distinct keys, in a random order.
fn shuffled_entries() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::btree_map(field_name(), json_value(), 0..7)
        .prop_flat_map(|m| Just(m.into_iter().collect::<Vec<_>>()).prop_shuffle())
}

/// Text that looks like a number: integers, decimals, exponents.
fn numeric_text() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<i64>().prop_map(|n| n.to_string()),
        (-1.0e6f64..1.0e6).prop_map(|f| f.to_string()),
        "-?[0-9]{1,4}(\\.[0-9]{1,3})?([eE][+-]?[0-9]{1,2})?",
    ]
}

fn object(entries: Vec<(String, Value)>) -> Value {
    Value::Object(entries.into_iter().collect::<Map<String, Value>>())
}

proptest! {
    /// Merging an already merged value changes nothing, key order included.
    #[test]
    fn merge_is_idempotent(input in json_value()) {
        let schema = schema();
        let merges: [fn(&SchemaNode, Option<&Value>) -> Option<Value>; 2] = [merge, merge_retaining];
        for merge_fn in merges {
            let once = merge_fn(&schema, Some(&input)).unwrap();
            let twice = merge_fn(&schema, Some(&once)).unwrap();
            prop_assert_eq!(
                serde_json::to_string(&once).unwrap(),
                serde_json::to_string(&twice).unwrap()
            );
        }
    }

    /// The order of input keys never affects the completed document.
    #[test]
    fn key_order_does_not_matter(entries in shuffled_entries()) {
        let schema = schema();
        let mut sorted = entries.clone();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));

        let shuffled = merge(&schema, Some(&object(entries))).unwrap();
        let ordered = merge(&schema, Some(&object(sorted))).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&shuffled).unwrap(),
            serde_json::to_string(&ordered).unwrap()
        );
    }

    /// The same input always yields the same outcome, violations in the same
    /// order.
    #[test]
    fn enforcement_is_deterministic(input in json_value()) {
        let enforcer = Enforcer::new(schema());
        let raw = serde_json::to_string(&input).unwrap();
        prop_assert_eq!(enforcer.enforce(&raw), enforcer.enforce(&raw));

        let merged = merge_retaining(enforcer.schema(), Some(&input)).unwrap();
        let root = JsonPointer::root();
        prop_assert_eq!(
            validate(enforcer.schema(), &merged, &root),
            validate(enforcer.schema(), &merged, &root)
        );
    }

    /// A numeric-looking string in an integer or number field is exactly
    /// one type mismatch, never a coerced value.
    #[test]
    fn numeric_strings_are_never_coerced(text in numeric_text(), number_field in any::<bool>()) {
        let (field, expected) = if number_field {
            ("ratio", SchemaKind::Number)
        } else {
            ("port", SchemaKind::Integer)
        };
        let mut input = serde_json::json!({"host": "h"});
        input[field] = Value::String(text.clone());

        let outcome = Enforcer::new(schema()).enforce(&input.to_string());
        let violations = outcome.violations().expect("numeric string must be rejected");
        prop_assert_eq!(
            violations.as_slice(),
            &[Violation::TypeMismatch {
                path: JsonPointer::root().child_key(field),
                expected,
                actual: ValueKind::String,
                found: Value::String(text).to_string(),
            }]
        );
    }

    /// Dropping undeclared keys never introduces a violation that the
    /// retaining merge did not already report.
    #[test]
    fn dropping_undeclared_keys_only_removes_violations(entries in shuffled_entries()) {
        let schema = schema();
        let input = object(entries);
        let root = JsonPointer::root();
        let retained = validate(&schema, &merge_retaining(&schema, Some(&input)).unwrap(), &root);
        let dropped = validate(&schema, &merge(&schema, Some(&input)).unwrap(), &root);
        for violation in &dropped {
            prop_assert!(retained.iter().any(|v| v == violation));
        }
    }
}

#[test]
fn fully_defaulted_schema_completes_an_absent_document() {
    let schema = fully_defaulted();
    let completed = merge(&schema, None).unwrap();
    assert!(validate(&schema, &completed, &JsonPointer::root()).is_empty());
    assert_eq!(
        completed,
        serde_json::json!({
            "name": "svc",
            "limits": {"cpu": 0.5, "memory": 512},
            "labels": ["a"]
        })
    );
    assert_eq!(merge(&schema, Some(&completed)), Some(completed));
}
