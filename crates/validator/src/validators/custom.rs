//! The `func` predicate: delegates to a caller-supplied closure.

use crate::foundation::{EvalContext, Record};
use crate::rules::Arg;

/// Runs the caller's predicate with the record and field name.
pub fn func(record: &Record, field: &str, arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    match arg {
        Arg::Func(predicate) => predicate.call(record, field),
        _ => false,
    }
}
