//! Numeric predicates: `numeric`, `integer`, `float`, `bool`, `min`, `max`,
//! `between`.
//!
//! Comparisons are numeric whenever both sides are numeric (numbers or
//! numeric strings, see [`Value::as_number`]). `between` additionally
//! compares non-numeric strings lexicographically against string bounds;
//! every other mix fails.

use crate::foundation::{EvalContext, Record, Value};
use crate::rules::Arg;

/// Number, or string holding a decimal numeric literal.
pub fn numeric(record: &Record, field: &str, _arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    record.value(field).is_numeric()
}

/// Integer, integral float, or string holding a canonical integer literal
/// that fits in `i64`.
pub fn integer(record: &Record, field: &str, _arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    match record.value(field) {
        Value::Int(_) => true,
        Value::Float(f) => {
            f.is_finite() && f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64
        }
        Value::Text(s) => is_integer_literal(s.trim()),
        _ => false,
    }
}

// No leading zeros other than "0" itself.
fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    let well_formed = digits == "0"
        || (!digits.is_empty()
            && !digits.starts_with('0')
            && digits.bytes().all(|b| b.is_ascii_digit()));
    well_formed && s.parse::<i64>().is_ok()
}

/// Any finite number, or a string holding one.
pub fn float(record: &Record, field: &str, _arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    record.value(field).is_numeric()
}

/// A boolean, or a value numerically equal to `0` or `1`.
///
/// An absent or `Null` value counts as `0` and passes; pair with `required`
/// to reject it.
pub fn boolean(record: &Record, field: &str, _arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    match record.value(field) {
        Value::Null | Value::Bool(_) => true,
        value => value.as_number().is_some_and(|n| n == 0.0 || n == 1.0),
    }
}

/// Numeric and strictly greater than the bound.
pub fn min(record: &Record, field: &str, arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    let Arg::Number(bound) = arg else {
        return false;
    };
    record.value(field).as_number().is_some_and(|n| n > *bound)
}

/// Numeric and strictly less than the bound.
pub fn max(record: &Record, field: &str, arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    let Arg::Number(bound) = arg else {
        return false;
    };
    record.value(field).as_number().is_some_and(|n| n < *bound)
}

/// Within `min..=max`, inclusive on both ends.
pub fn between(record: &Record, field: &str, arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    let Arg::Bounds(min, max) = arg else {
        return false;
    };
    within(record.value(field), min, max)
}

fn within(value: &Value, min: &Value, max: &Value) -> bool {
    if let (Some(n), Some(lo), Some(hi)) = (value.as_number(), min.as_number(), max.as_number()) {
        return lo <= n && n <= hi;
    }
    match (value, min, max) {
        (Value::Text(s), Value::Text(lo), Value::Text(hi)) => lo <= s && s <= hi,
        _ => false,
    }
}
