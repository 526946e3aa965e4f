//! Length predicates: `length`, `lengthMin`, `lengthMax`.
//!
//! Strings are measured in Unicode scalar values (chars), numbers by the
//! length of their decimal form, lists by item count. Anything else has no
//! length and fails.

use crate::foundation::{EvalContext, Record, Value};
use crate::rules::Arg;

/// Measures a value for the length rules.
pub(crate) fn measure(value: &Value) -> Option<usize> {
    match value {
        Value::List(items) => Some(items.len()),
        Value::Text(s) => Some(s.chars().count()),
        Value::Int(_) | Value::Float(_) => value.as_scalar_text().map(|s| s.chars().count()),
        Value::Null | Value::Bool(_) => None,
    }
}

fn compare(record: &Record, field: &str, arg: &Arg, cmp: impl Fn(usize, usize) -> bool) -> bool {
    let Arg::Size(bound) = arg else {
        return false;
    };
    measure(record.value(field)).is_some_and(|len| cmp(len, *bound))
}

/// Length equals the argument.
pub fn length(record: &Record, field: &str, arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    compare(record, field, arg, |len, n| len == n)
}

/// Length is at least the argument.
pub fn length_min(record: &Record, field: &str, arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    compare(record, field, arg, |len, n| len >= n)
}

/// Length is at most the argument.
pub fn length_max(record: &Record, field: &str, arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    compare(record, field, arg, |len, n| len <= n)
}
