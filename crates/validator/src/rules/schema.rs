//! Declarative rule sets.
//!
//! A [`RuleSchema`] describes the same rules the fluent API registers, as
//! data:
//!
//! ```json
//! {
//!   "fields": [
//!     { "name": "age", "alias": "Age", "checks": [
//!       { "rule": "required" },
//!       { "rule": "between", "arg": [18, 99], "message": "{field} out of range" }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Every rule except `func` can be declared.

use serde::{Deserialize, Serialize};

use crate::foundation::{RuleError, Value};
use crate::rules::{Arg, DateBound, RuleKind, RuleSet};

/// A whole rule set as data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSchema {
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

/// Checks for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default)]
    pub checks: Vec<CheckSchema>,
}

/// One check; `arg` is read according to `rule`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckSchema {
    pub rule: RuleKind,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub arg: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RuleSchema {
    /// Parses a JSON schema document.
    pub fn from_json_str(input: &str) -> Result<Self, RuleError> {
        serde_json::from_str(input).map_err(|e| RuleError::Parse {
            document: "rule schema",
            message: e.to_string(),
        })
    }

    /// Builds and verifies the rule set.
    pub fn build(&self) -> Result<RuleSet, RuleError> {
        let mut rules = RuleSet::new();

        for field in &self.fields {
            let rule = match &field.alias {
                Some(alias) => rules.add_field_as(&field.name, alias),
                None => rules.add_field(&field.name),
            };

            for check in &field.checks {
                let arg = arg_from_json(&field.name, check.rule, &check.arg)?;
                rule.add_check(check.rule, arg, check.message.clone().map(Into::into));
            }
        }

        rules.verify()?;
        Ok(rules)
    }
}

impl RuleSet {
    /// Builds a rule set from a schema.
    pub fn from_schema(schema: &RuleSchema) -> Result<Self, RuleError> {
        schema.build()
    }

    /// Builds a rule set from a JSON schema document.
    pub fn from_json_str(input: &str) -> Result<Self, RuleError> {
        RuleSchema::from_json_str(input)?.build()
    }
}

fn arg_from_json(field: &str, kind: RuleKind, arg: &serde_json::Value) -> Result<Arg, RuleError> {
    use RuleKind::*;

    let mismatch = || RuleError::ArgumentMismatch {
        field: field.to_owned(),
        rule: kind,
        arg: arg.to_string(),
    };
    let value = |json: &serde_json::Value| Value::try_from(json.clone()).map_err(|_| mismatch());

    match kind {
        Required | Optional | NotEmpty | Numeric | Integer | Float | Bool | Alpha | Url
        | ActiveUrl | IsIp | Timestamp => {
            if arg.is_null() {
                Ok(Arg::None)
            } else {
                Err(mismatch())
            }
        }
        Length | LengthMin | LengthMax => arg
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Arg::Size)
            .ok_or_else(mismatch),
        Min | Max => arg.as_f64().map(Arg::Number).ok_or_else(mismatch),
        Between => match arg.as_array().map(Vec::as_slice) {
            Some([min, max]) => Ok(Arg::Bounds(value(min)?, value(max)?)),
            _ => Err(mismatch()),
        },
        Equal => value(arg).map(Arg::Value),
        InArray | NotInArray => match arg.as_array() {
            Some(items) => items
                .iter()
                .map(value)
                .collect::<Result<_, _>>()
                .map(Arg::Set),
            None => Err(mismatch()),
        },
        Regex => match arg.as_str() {
            Some(pattern) => Arg::pattern(field, pattern),
            None => Err(mismatch()),
        },
        DateBefore | DateAfter => match arg {
            serde_json::Value::Null => Ok(Arg::Date(DateBound::Today)),
            serde_json::Value::String(bound) => DateBound::parse(field, bound).map(Arg::Date),
            _ => Err(mismatch()),
        },
        Func => Err(RuleError::NotDeclarable {
            field: field.to_owned(),
            rule: kind,
        }),
    }
}
