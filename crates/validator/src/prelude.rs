//! Prelude module for convenient imports.
//!
//! Provides a single `use fieldcheck_validator::prelude::*;` import that
//! brings in the rule builders, the record model, the validator and its
//! error types.
//!
//! # Examples
//!
//! ```
//! use fieldcheck_validator::prelude::*;
//!
//! let mut rules = RuleSet::new();
//! rules.add_field("email").required().url();
//! let validator = Validator::new(rules).unwrap();
//! assert!(validator.validate(&Record::new()).is_err());
//! ```

// ============================================================================
// FOUNDATION: Values, records, errors, evaluation context
// ============================================================================

pub use crate::foundation::{
    EvalContext, HostResolver, Record, RecordError, RuleError, SystemResolver, ValidationError,
    ValidationResult, Value,
};

// ============================================================================
// RULES: Registration and schemas
// ============================================================================

pub use crate::rules::{
    Arg, Check, CustomFn, DateBound, FieldRule, RuleKind, RuleSchema, RuleSet,
};

// ============================================================================
// EVALUATION
// ============================================================================

pub use crate::config::ValidatorConfig;
pub use crate::validator::{Validator, ValidatorBuilder};
