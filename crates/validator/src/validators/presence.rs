//! Presence predicates: `required`, `optional`, `notEmpty`.

use crate::foundation::{EvalContext, Record, Value};
use crate::rules::Arg;

/// The field is present with a non-null value.
///
/// Presence only: `""`, `0` and `false` all pass.
pub fn required(record: &Record, field: &str, _arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    record.contains(field)
}

/// Always passes. The validator skips absent optional fields before any
/// predicate runs.
pub fn optional(_record: &Record, _field: &str, _arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    true
}

/// Passes for `0` and `"0"`; otherwise the value must not be empty.
///
/// Empty means `Null`, `false`, `0.0`, `""` or an empty list.
pub fn not_empty(record: &Record, field: &str, _arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    match record.value(field) {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Int(_) => true,
        Value::Float(f) => *f != 0.0,
        Value::Text(s) => !s.is_empty(),
        Value::List(items) => !items.is_empty(),
    }
}
