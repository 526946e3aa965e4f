//! Content predicates: `equal`, `inArray`, `notInArray`, `regex`, `alpha`.

use std::sync::LazyLock;

use crate::foundation::{EvalContext, Record, Value};
use crate::rules::Arg;

static ALPHA_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[a-zA-Z]+$").unwrap());

/// Strictly equal to the argument: same variant, same content.
pub fn equal(record: &Record, field: &str, arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    match arg {
        Arg::Value(expected) => record.value(field) == expected,
        _ => false,
    }
}

/// Set membership.
///
/// Members match when strictly equal, or when both are numeric with the same
/// numeric value, so `"1"` is found in `[1, 2]`.
pub(crate) fn contains(set: &[Value], value: &Value) -> bool {
    set.iter().any(|candidate| candidate == value || same_number(candidate, value))
}

fn same_number(a: &Value, b: &Value) -> bool {
    matches!((a.as_number(), b.as_number()), (Some(x), Some(y)) if x == y)
}

/// Member of the argument set.
pub fn in_array(record: &Record, field: &str, arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    match arg {
        Arg::Set(set) => contains(set, record.value(field)),
        _ => false,
    }
}

/// Not a member of the argument set.
pub fn not_in_array(record: &Record, field: &str, arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    match arg {
        Arg::Set(set) => !contains(set, record.value(field)),
        _ => false,
    }
}

/// String or number whose text matches the pattern.
pub fn regex(record: &Record, field: &str, arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    let Arg::Pattern(pattern) = arg else {
        return false;
    };
    record
        .value(field)
        .as_scalar_text()
        .is_some_and(|text| pattern.is_match(&text))
}

/// String of ASCII letters only.
pub fn alpha(record: &Record, field: &str, _arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    record
        .value(field)
        .as_str()
        .is_some_and(|s| ALPHA_REGEX.is_match(s))
}
