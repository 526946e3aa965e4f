//! Error types.
//!
//! - [`ValidationError`]: the one failure a `validate` call can report.
//! - [`RuleError`]: a rule set that cannot be evaluated as written.
//! - [`RecordError`]: input that cannot be turned into a record.

use std::fmt;

use crate::foundation::Value;
use crate::rules::{Arg, RuleKind};

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// The first failing check of a validation run.
///
/// Carries everything a caller needs to render a user-facing message or a
/// machine-readable error code: the field, its display alias, the value read
/// from the record, the failing rule, the resolved message and the rule's
/// argument.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Name of the field that failed.
    pub field: String,

    /// Display alias registered for the field, if any.
    pub alias: Option<String>,

    /// The value read from the record (`Null` when absent).
    pub value: Value,

    /// The rule that failed.
    pub rule: RuleKind,

    /// Resolved failure message (custom or default template).
    pub message: String,

    /// Argument of the failing check.
    pub arg: Arg,
}

impl ValidationError {
    /// Alias if registered, otherwise the field name.
    #[must_use]
    pub fn label(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.field)
    }

    /// Stable error code, the wire name of the failing rule.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.rule.name()
    }

    /// Converts the error to a JSON structure.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "field": self.field,
            "alias": self.alias,
            "value": self.value.to_json_value(),
            "rule": self.code(),
            "message": self.message,
            "arg": self.arg.to_json_value(),
        })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.field, self.rule, self.message)
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// RULE ERROR
// ============================================================================

/// A rule set that cannot be evaluated.
///
/// Raised when a [`Validator`](crate::Validator) is built, never during
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RuleError {
    /// A `regex` check was given a pattern that does not compile.
    #[error("field '{field}': invalid regex pattern '{pattern}': {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },

    /// A date check was given a bound that does not parse as a date.
    #[error("field '{field}': unparseable date bound '{input}'")]
    InvalidDate { field: String, input: String },

    /// The argument shape does not fit the rule.
    #[error("field '{field}': rule '{rule}' does not accept argument {arg}")]
    ArgumentMismatch {
        field: String,
        rule: RuleKind,
        arg: String,
    },

    /// The rule cannot be expressed in a declarative schema.
    #[error("field '{field}': rule '{rule}' cannot be declared in a schema")]
    NotDeclarable { field: String, rule: RuleKind },

    /// An unknown rule name.
    #[error("unknown rule '{name}'")]
    UnknownRule { name: String },

    /// A schema or config document that failed to parse.
    #[error("invalid {document}: {message}")]
    Parse {
        document: &'static str,
        message: String,
    },
}

// ============================================================================
// RECORD ERROR
// ============================================================================

/// Input that cannot be turned into a [`Record`](crate::foundation::Record).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RecordError {
    /// The JSON document is not an object.
    #[error("record must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    /// A field holds a nested object.
    #[error("'{path}' holds a nested object, which records do not support")]
    NestedObject { path: String },

    /// The input is not valid JSON.
    #[error("invalid record JSON: {message}")]
    Parse { message: String },
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ValidationError {
        ValidationError {
            field: "age".to_owned(),
            alias: Some("Age".to_owned()),
            value: Value::Int(11),
            rule: RuleKind::Between,
            message: "Age must be between 5 and 10".to_owned(),
            arg: Arg::Bounds(Value::Int(5), Value::Int(10)),
        }
    }

    #[test]
    fn label_prefers_alias() {
        let mut error = sample();
        assert_eq!(error.label(), "Age");
        error.alias = None;
        assert_eq!(error.label(), "age");
    }

    #[test]
    fn display() {
        assert_eq!(
            sample().to_string(),
            "[age] between: Age must be between 5 and 10"
        );
    }

    #[test]
    fn json_shape() {
        let json = sample().to_json_value();
        assert_eq!(json["field"], "age");
        assert_eq!(json["alias"], "Age");
        assert_eq!(json["value"], 11);
        assert_eq!(json["rule"], "between");
        assert_eq!(json["arg"], serde_json::json!([5, 10]));
    }

    #[test]
    fn rule_error_display() {
        let error = RuleError::InvalidDate {
            field: "born".to_owned(),
            input: "someday".to_owned(),
        };
        assert_eq!(error.to_string(), "field 'born': unparseable date bound 'someday'");
    }
}
