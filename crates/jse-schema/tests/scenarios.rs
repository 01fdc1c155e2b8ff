//! End-to-end enforce scenarios, driven through schema documents the way a
//! caller would load them.

use jse_core::{JsonPointer, ValueKind};
use jse_schema::{enforce, EnforceOptions, EnforceOutcome, Enforcer, SchemaKind, SchemaNode, Violation};
use serde_json::{json, Value};

fn service_schema() -> SchemaNode {
    SchemaNode::from_value(&json!({
        "type": "object",
        "properties": {
            "host": {"type": "string"},
            "port": {"type": "integer", "default": 8080},
            "tags": {"type": "array", "items": {"type": "string"}, "default": []}
        },
        "required": ["host", "port", "tags"]
    }))
    .unwrap()
}

fn completed(outcome: EnforceOutcome) -> Value {
    match outcome {
        EnforceOutcome::Completed(value) => value,
        other => panic!("expected Completed, got {other:?}"),
    }
}

fn violations(outcome: EnforceOutcome) -> Vec<Violation> {
    match outcome {
        EnforceOutcome::SchemaViolated(v) => v.into_inner(),
        other => panic!("expected SchemaViolated, got {other:?}"),
    }
}

#[test]
fn missing_default_is_filled() {
    let value = completed(enforce(
        &service_schema(),
        r#"{"host":"10.0.0.5","tags":["prod"]}"#,
    ));
    assert_eq!(value, json!({"host": "10.0.0.5", "port": 8080, "tags": ["prod"]}));
    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        r#"{"host":"10.0.0.5","port":8080,"tags":["prod"]}"#
    );
}

#[test]
fn numeric_string_port_is_a_type_mismatch() {
    let found = violations(enforce(&service_schema(), r#"{"host":"10.0.0.5","port":"8080"}"#));
    assert_eq!(
        found,
        vec![Violation::TypeMismatch {
            path: JsonPointer::root().child_key("port"),
            expected: SchemaKind::Integer,
            actual: ValueKind::String,
            found: "\"8080\"".into(),
        }]
    );
}

#[test]
fn nested_defaults_fill_an_empty_document() {
    let schema = SchemaNode::from_json_str(
        r#"{
            "type": "object",
            "properties": {
                "database": {
                    "type": "object",
                    "properties": {
                        "host": {"type": "string", "default": "localhost"},
                        "port": {"type": "integer", "default": 5432}
                    }
                }
            }
        }"#,
    )
    .unwrap();
    assert_eq!(
        completed(enforce(&schema, "{}")),
        json!({"database": {"host": "localhost", "port": 5432}})
    );
}

#[test]
fn truncated_input_fails_to_parse_at_the_truncation() {
    let raw = r#"{"host":"#;
    match enforce(&service_schema(), raw) {
        EnforceOutcome::ParseFailed(err) => {
            assert_eq!(err.line, 1);
            assert!(err.column >= 8, "column {} before truncation", err.column);
            assert!(err.offset <= raw.len());
            assert!(err.offset >= raw.len() - 1);
        }
        other => panic!("expected ParseFailed, got {other:?}"),
    }
}

#[test]
fn undeclared_key_in_closed_object_is_reported() {
    let schema = SchemaNode::from_value(&json!({
        "type": "object",
        "properties": {"host": {"type": "string"}},
        "additionalProperties": false
    }))
    .unwrap();
    assert_eq!(
        violations(enforce(&schema, r#"{"host":"x","extra":1}"#)),
        vec![Violation::UnknownField {
            path: JsonPointer::root().child_key("extra"),
        }]
    );
}

#[test]
fn every_violation_is_reported_in_one_call() {
    let schema = SchemaNode::from_value(&json!({
        "type": "object",
        "properties": {
            "host": {"type": "string"},
            "port": {"type": "integer"},
            "tags": {"type": "array", "items": {"type": "string"}}
        },
        "required": ["host"]
    }))
    .unwrap();
    let found = violations(enforce(&schema, r#"{"port": 1.5, "tags": ["a", 2, null], "x": 0}"#));
    let paths: Vec<&str> = found.iter().map(|v| v.path().as_str()).collect();
    assert_eq!(paths, vec!["/host", "/port", "/tags/1", "/tags/2", "/x"]);
}

#[test]
fn absent_and_null_documents_differ() {
    let schema = service_schema();
    // Absent: defaults fill, but `host` cannot be invented.
    assert_eq!(
        violations(enforce(&schema, "  ")),
        vec![Violation::MissingRequiredField {
            path: JsonPointer::root().child_key("host"),
        }]
    );
    // `null` is a present value of the wrong kind.
    assert!(matches!(
        violations(enforce(&schema, "null")).as_slice(),
        [Violation::TypeMismatch { actual: ValueKind::Null, .. }]
    ));
}

#[test]
fn fenced_output_with_trailing_comma_completes_under_repair() {
    let raw = "```json\n{\"host\": \"10.0.0.5\", \"tags\": [\"prod\",],}\n```";
    assert!(matches!(enforce(&service_schema(), raw), EnforceOutcome::ParseFailed(_)));

    let enforcer = Enforcer::with_options(service_schema(), EnforceOptions { repair: true });
    assert_eq!(
        completed(enforcer.enforce(raw)),
        json!({"host": "10.0.0.5", "port": 8080, "tags": ["prod"]})
    );
}

#[test]
fn referenced_definitions_are_enforced() {
    let schema = SchemaNode::from_value(&json!({
        "type": "object",
        "properties": {
            "primary": {"$ref": "#/definitions/endpoint"},
            "replicas": {"type": "array", "items": {"$ref": "#/definitions/endpoint"}, "default": []}
        },
        "required": ["primary"],
        "definitions": {
            "endpoint": {
                "type": "object",
                "properties": {
                    "host": {"type": "string"},
                    "port": {"type": "integer", "default": 443}
                },
                "required": ["host"]
            }
        }
    }))
    .unwrap();
    let value = completed(enforce(
        &schema,
        r#"{"primary": {"host": "a"}, "replicas": [{"host": "b", "port": 8443}, {"host": "c"}]}"#,
    ));
    assert_eq!(
        value,
        json!({
            "primary": {"host": "a", "port": 443},
            "replicas": [{"host": "b", "port": 8443}, {"host": "c", "port": 443}]
        })
    );
}
