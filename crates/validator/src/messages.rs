//! Failure message templates.
//!
//! A template is plain text with `{placeholder}` slots:
//!
//! | Placeholder | Replaced by |
//! |-------------|-------------|
//! | `{field}`   | the field alias, or the field name when no alias is set |
//! | `{name}`    | the field name |
//! | `{arg}`     | the check argument (`5, 10` for bounds) |
//! | `{min}`, `{max}` | the two halves of a `between` argument |
//! | `{value}`   | the value read from the record |
//!
//! Unknown placeholders and unmatched braces are kept verbatim.

use crate::foundation::Value;
use crate::rules::{Arg, RuleKind};

/// English default template for a rule.
#[must_use]
pub const fn default_template(kind: RuleKind) -> &'static str {
    match kind {
        RuleKind::Required => "{field} is required",
        RuleKind::Optional => "{field} is optional",
        RuleKind::NotEmpty => "{field} must not be empty",
        RuleKind::Numeric => "{field} must be numeric",
        RuleKind::Integer => "{field} must be an integer",
        RuleKind::Float => "{field} must be a float",
        RuleKind::Bool => "{field} must be a boolean",
        RuleKind::Length => "{field} must be exactly {arg} characters long",
        RuleKind::LengthMin => "{field} must be at least {arg} characters long",
        RuleKind::LengthMax => "{field} must be at most {arg} characters long",
        RuleKind::Min => "{field} must be greater than {arg}",
        RuleKind::Max => "{field} must be less than {arg}",
        RuleKind::Between => "{field} must be between {min} and {max}",
        RuleKind::Equal => "{field} must be equal to {arg}",
        RuleKind::InArray => "{field} must be one of {arg}",
        RuleKind::NotInArray => "{field} must not be one of {arg}",
        RuleKind::Regex => "{field} has an invalid format",
        RuleKind::Alpha => "{field} must contain only letters",
        RuleKind::Url => "{field} must be a valid URL",
        RuleKind::ActiveUrl => "{field} must be an active URL",
        RuleKind::IsIp => "{field} must be a valid IP address",
        RuleKind::Timestamp => "{field} must be a valid timestamp",
        RuleKind::DateBefore => "{field} must be a date before {arg}",
        RuleKind::DateAfter => "{field} must be a date after {arg}",
        RuleKind::Func => "{field} is invalid",
    }
}

/// Fills a template's placeholders.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::messages::render;
/// use fieldcheck_validator::prelude::*;
///
/// let arg = Arg::Bounds(Value::Int(18), Value::Int(99));
/// let text = render("{field} must be between {min} and {max}", "Age", "age", &arg, &Value::Int(7));
/// assert_eq!(text, "Age must be between 18 and 99");
/// ```
#[must_use]
pub fn render(template: &str, label: &str, name: &str, arg: &Arg, value: &Value) -> String {
    let (min, max) = match arg {
        Arg::Bounds(min, max) => (min.to_string(), max.to_string()),
        _ => (String::new(), String::new()),
    };
    let params: [(&str, String); 6] = [
        ("field", label.to_owned()),
        ("name", name.to_owned()),
        ("arg", arg.to_string()),
        ("min", min),
        ("max", max),
        ("value", value.to_string()),
    ];

    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let Some(close) = tail.find('}') else {
            rest = tail;
            break;
        };

        let key = &tail[1..close];
        match params.iter().find(|(k, _)| *k == key) {
            Some((_, replacement)) => {
                out.push_str(replacement);
                rest = &tail[close + 1..];
            }
            None => {
                // Keep the brace literally and rescan after it, so
                // "{{field}}" still renders the inner placeholder.
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
