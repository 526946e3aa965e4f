//! Checks and their arguments.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDateTime, NaiveTime, Utc};
use regex::Regex;

use crate::foundation::{Record, RuleError, Value};
use crate::rules::RuleKind;
use crate::validators::time::parse_datetime;

// ============================================================================
// CUSTOM PREDICATE
// ============================================================================

/// Signature of a caller-supplied predicate: `(record, field) -> pass`.
pub type CustomPredicate = dyn Fn(&Record, &str) -> bool + Send + Sync;

/// A shareable caller-supplied predicate for the `func` rule.
#[derive(Clone)]
pub struct CustomFn(Arc<CustomPredicate>);

impl CustomFn {
    /// Wraps a closure.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Record, &str) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// Runs the predicate.
    pub fn call(&self, record: &Record, field: &str) -> bool {
        (self.0)(record, field)
    }
}

impl fmt::Debug for CustomFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomFn(<function>)")
    }
}

// ============================================================================
// DATE BOUND
// ============================================================================

/// Bound of a `dateBefore` / `dateAfter` check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateBound {
    /// Midnight of the current day.
    Today,
    /// A date expression, resolved at evaluation time so relative words
    /// (`"tomorrow"`) follow the clock.
    Expr(String),
}

impl DateBound {
    /// Parses and checks a bound expression.
    pub fn parse(field: &str, input: &str) -> Result<Self, RuleError> {
        if parse_datetime(input, Utc::now().naive_utc()).is_some() {
            Ok(DateBound::Expr(input.to_owned()))
        } else {
            Err(RuleError::InvalidDate {
                field: field.to_owned(),
                input: input.to_owned(),
            })
        }
    }

    /// Resolves the bound against a reference time.
    pub fn resolve(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            DateBound::Today => Some(now.date().and_time(NaiveTime::MIN)),
            DateBound::Expr(input) => parse_datetime(input, now),
        }
    }
}

impl fmt::Display for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateBound::Today => f.write_str("today"),
            DateBound::Expr(input) => f.write_str(input),
        }
    }
}

// ============================================================================
// ARG
// ============================================================================

/// Argument of a check.
///
/// Each [`RuleKind`] reads exactly one shape (see [`RuleKind::accepts`]).
#[derive(Debug, Clone)]
pub enum Arg {
    /// No argument.
    None,
    /// A length for `length`, `lengthMin`, `lengthMax`.
    Size(usize),
    /// A numeric bound for `min`, `max`.
    Number(f64),
    /// Inclusive `(min, max)` bounds for `between`.
    Bounds(Value, Value),
    /// The expected value for `equal`.
    Value(Value),
    /// The candidate set for `inArray`, `notInArray`.
    Set(Vec<Value>),
    /// A compiled pattern for `regex`.
    Pattern(Regex),
    /// A date bound for `dateBefore`, `dateAfter`.
    Date(DateBound),
    /// A caller-supplied predicate for `func`.
    Func(CustomFn),
}

impl Arg {
    /// Compiles a regex argument.
    pub fn pattern(field: &str, pattern: &str) -> Result<Self, RuleError> {
        Regex::new(pattern)
            .map(Arg::Pattern)
            .map_err(|e| RuleError::InvalidPattern {
                field: field.to_owned(),
                pattern: pattern.to_owned(),
                reason: e.to_string(),
            })
    }

    /// Converts the argument to JSON.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Arg::None => serde_json::Value::Null,
            Arg::Size(n) => serde_json::Value::from(*n),
            Arg::Number(n) => Value::Float(*n).to_json_value(),
            Arg::Bounds(min, max) => {
                serde_json::Value::Array(vec![min.to_json_value(), max.to_json_value()])
            }
            Arg::Value(value) => value.to_json_value(),
            Arg::Set(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json_value).collect())
            }
            Arg::Pattern(regex) => serde_json::Value::String(regex.as_str().to_owned()),
            Arg::Date(bound) => serde_json::Value::String(bound.to_string()),
            Arg::Func(_) => serde_json::Value::String("<function>".to_owned()),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::None => Ok(()),
            Arg::Size(n) => write!(f, "{n}"),
            Arg::Number(n) => write!(f, "{n}"),
            Arg::Bounds(min, max) => write!(f, "{min}, {max}"),
            Arg::Value(value) => write!(f, "{value}"),
            Arg::Set(items) => write!(f, "{}", Value::List(items.clone())),
            Arg::Pattern(regex) => f.write_str(regex.as_str()),
            Arg::Date(bound) => write!(f, "{bound}"),
            Arg::Func(_) => f.write_str("<function>"),
        }
    }
}

// ============================================================================
// CHECK
// ============================================================================

/// One registered `(rule, argument, message)` triple.
#[derive(Debug, Clone)]
pub struct Check {
    kind: RuleKind,
    arg: Arg,
    message: Option<Cow<'static, str>>,
}

impl Check {
    /// Creates a check without a custom message.
    pub fn new(kind: RuleKind, arg: Arg) -> Self {
        Self {
            kind,
            arg,
            message: None,
        }
    }

    /// Sets a custom message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn arg(&self) -> &Arg {
        &self.arg
    }

    /// Custom message template, if one was registered.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub(crate) fn set_message(&mut self, message: Cow<'static, str>) {
        self.message = Some(message);
    }
}
