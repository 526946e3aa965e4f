//! The closed set of rule tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::RuleError;
use crate::rules::Arg;

/// Names one predicate of the built-in catalog.
///
/// The wire name (see [`name`](Self::name)) is what schemas, config files and
/// error codes use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    Required,
    Optional,
    NotEmpty,
    Numeric,
    Integer,
    Float,
    Bool,
    Length,
    LengthMin,
    LengthMax,
    Min,
    Max,
    Between,
    Equal,
    InArray,
    NotInArray,
    Regex,
    Alpha,
    Url,
    ActiveUrl,
    IsIp,
    Timestamp,
    DateBefore,
    DateAfter,
    Func,
}

impl RuleKind {
    /// Every rule, in catalog order.
    pub const ALL: [RuleKind; 25] = [
        RuleKind::Required,
        RuleKind::Optional,
        RuleKind::NotEmpty,
        RuleKind::Numeric,
        RuleKind::Integer,
        RuleKind::Float,
        RuleKind::Bool,
        RuleKind::Length,
        RuleKind::LengthMin,
        RuleKind::LengthMax,
        RuleKind::Min,
        RuleKind::Max,
        RuleKind::Between,
        RuleKind::Equal,
        RuleKind::InArray,
        RuleKind::NotInArray,
        RuleKind::Regex,
        RuleKind::Alpha,
        RuleKind::Url,
        RuleKind::ActiveUrl,
        RuleKind::IsIp,
        RuleKind::Timestamp,
        RuleKind::DateBefore,
        RuleKind::DateAfter,
        RuleKind::Func,
    ];

    /// Wire name of the rule.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Optional => "optional",
            RuleKind::NotEmpty => "notEmpty",
            RuleKind::Numeric => "numeric",
            RuleKind::Integer => "integer",
            RuleKind::Float => "float",
            RuleKind::Bool => "bool",
            RuleKind::Length => "length",
            RuleKind::LengthMin => "lengthMin",
            RuleKind::LengthMax => "lengthMax",
            RuleKind::Min => "min",
            RuleKind::Max => "max",
            RuleKind::Between => "between",
            RuleKind::Equal => "equal",
            RuleKind::InArray => "inArray",
            RuleKind::NotInArray => "notInArray",
            RuleKind::Regex => "regex",
            RuleKind::Alpha => "alpha",
            RuleKind::Url => "url",
            RuleKind::ActiveUrl => "activeUrl",
            RuleKind::IsIp => "isIp",
            RuleKind::Timestamp => "timestamp",
            RuleKind::DateBefore => "dateBefore",
            RuleKind::DateAfter => "dateAfter",
            RuleKind::Func => "func",
        }
    }

    /// Looks a rule up by wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether `arg` has the shape this rule reads.
    #[must_use]
    pub fn accepts(self, arg: &Arg) -> bool {
        use RuleKind::*;

        match self {
            Required | Optional | NotEmpty | Numeric | Integer | Float | Bool | Alpha | Url
            | ActiveUrl | IsIp | Timestamp => matches!(arg, Arg::None),
            Length | LengthMin | LengthMax => matches!(arg, Arg::Size(_)),
            Min | Max => matches!(arg, Arg::Number(n) if n.is_finite()),
            Between => matches!(arg, Arg::Bounds(..)),
            Equal => matches!(arg, Arg::Value(_)),
            InArray | NotInArray => matches!(arg, Arg::Set(_)),
            Regex => matches!(arg, Arg::Pattern(_)),
            DateBefore | DateAfter => matches!(arg, Arg::Date(_)),
            Func => matches!(arg, Arg::Func(_)),
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleKind {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| RuleError::UnknownRule { name: s.to_owned() })
    }
}
