//! # Engine Facade
//!
//! One call, three terminal outcomes: parse the raw input, merge defaults
//! into it, validate the completed value, and return either the completed
//! document or every violation found.
//!
//! The engine holds no mutable state. An [`Enforcer`] is `Send + Sync` and
//! can be shared across threads; each call allocates its own values. Retrying
//! after a failure is the caller's business: inspect the violations, correct
//! the input, and call again.

use jse_core::{parse_document, parse_document_with_repair, JsonPointer, ParseError};
use serde_json::Value;

use crate::merge::merge_retaining;
use crate::node::SchemaNode;
use crate::validate::{validate, Violation, Violations};

/// Per-enforcer switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnforceOptions {
    /// Apply heuristic syntax repair before giving up on malformed input.
    pub repair: bool,
}

/// Result of one enforce call.
#[derive(Debug, Clone, PartialEq)]
pub enum EnforceOutcome {
    /// The input, completed with defaults, conforms to the schema.
    Completed(Value),
    /// The completed input still deviates from the schema. The partially
    /// completed document is discarded.
    SchemaViolated(Violations),
    /// The input is not well-formed JSON; it never reached the schema.
    ParseFailed(ParseError),
}

impl EnforceOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, EnforceOutcome::Completed(_))
    }

    /// The completed document, if the call succeeded.
    pub fn completed(&self) -> Option<&Value> {
        match self {
            EnforceOutcome::Completed(value) => Some(value),
            _ => None,
        }
    }

    /// The violations, if the call failed schema validation.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            EnforceOutcome::SchemaViolated(violations) => Some(violations),
            _ => None,
        }
    }

    /// Short machine-readable name of the outcome.
    pub fn label(&self) -> &'static str {
        match self {
            EnforceOutcome::Completed(_) => "completed",
            EnforceOutcome::SchemaViolated(_) => "schema_violated",
            EnforceOutcome::ParseFailed(_) => "parse_failed",
        }
    }
}

/// A loaded schema ready to enforce documents.
#[derive(Debug, Clone)]
pub struct Enforcer {
    schema: SchemaNode,
    options: EnforceOptions,
}

impl Enforcer {
    pub fn new(schema: SchemaNode) -> Self {
        Self::with_options(schema, EnforceOptions::default())
    }

    pub fn with_options(schema: SchemaNode, options: EnforceOptions) -> Self {
        Self { schema, options }
    }

    pub fn schema(&self) -> &SchemaNode {
        &self.schema
    }

    pub fn options(&self) -> EnforceOptions {
        self.options
    }

    /// Parse, complete, and validate `raw`.
    pub fn enforce(&self, raw: &str) -> EnforceOutcome {
        run(&self.schema, self.options, raw)
    }

    /// Complete and validate an already-parsed (possibly absent) document.
    ///
    /// # Errors
    ///
    /// Returns every violation of the completed document.
    pub fn enforce_value(&self, input: Option<&Value>) -> Result<Value, Violations> {
        complete(&self.schema, input)
    }
}

/// Enforce `raw` against `schema` without repair.
pub fn enforce(schema: &SchemaNode, raw: &str) -> EnforceOutcome {
    run(schema, EnforceOptions::default(), raw)
}

fn run(schema: &SchemaNode, options: EnforceOptions, raw: &str) -> EnforceOutcome {
    let parsed = if options.repair {
        parse_document_with_repair(raw)
    } else {
        parse_document(raw)
    };

    let outcome = match parsed {
        Ok(input) => match complete(schema, input.as_ref()) {
            Ok(completed) => EnforceOutcome::Completed(completed),
            Err(violations) => EnforceOutcome::SchemaViolated(violations),
        },
        Err(err) => EnforceOutcome::ParseFailed(err),
    };

    tracing::debug!(
        outcome = outcome.label(),
        violations = outcome.violations().map_or(0, Violations::len),
        "enforce finished"
    );
    outcome
}

fn complete(schema: &SchemaNode, input: Option<&Value>) -> Result<Value, Violations> {
    let root = JsonPointer::root();
    let Some(completed) = merge_retaining(schema, input) else {
        // Absent document, primitive schema, no default.
        return Err(Violations::from(vec![Violation::MissingRequiredField { path: root }]));
    };
    let violations = validate(schema, &completed, &root);
    if violations.is_empty() {
        Ok(completed)
    } else {
        Err(violations)
    }
}
