//! # fieldcheck-validator
//!
//! Declarative, rule-based validation of flat records: string-keyed maps of
//! dynamically typed values, as they arrive from form posts, query strings
//! or JSON request bodies.
//!
//! ## Quick Start
//!
//! ```
//! use fieldcheck_validator::prelude::*;
//!
//! let mut rules = RuleSet::new();
//! rules.add_field_as("email", "E-mail").required().regex(r"^[^@\s]+@[^@\s]+$");
//! rules.add_field("age").required().integer().min(17);
//! rules.add_field("homepage").optional().url();
//!
//! let validator = Validator::new(rules).unwrap();
//!
//! let ok = Record::new().with("email", "ada@example.com").with("age", 36);
//! assert!(validator.validate(&ok).is_ok());
//!
//! let bad = Record::new().with("email", "ada").with("age", 36);
//! let err = validator.validate(&bad).unwrap_err();
//! assert_eq!(err.field, "email");
//! assert_eq!(err.code(), "regex");
//! assert_eq!(err.message, "E-mail has an invalid format");
//! ```
//!
//! ## Model
//!
//! - A [`RuleSet`](rules::RuleSet) maps field names to a
//!   [`FieldRule`](rules::FieldRule): an ordered list of checks drawn from
//!   the closed [`RuleKind`](rules::RuleKind) catalog.
//! - A [`Validator`] evaluates fields in registration order and checks in
//!   registration order, and returns the first failure as a
//!   [`ValidationError`](foundation::ValidationError).
//! - Rule sets can also be loaded from JSON via
//!   [`RuleSchema`](rules::RuleSchema).
//!
//! ## Built-in Rules
//!
//! See [`validators`] for the predicate catalog and
//! [`messages`] for the default message templates.

pub mod config;
pub mod foundation;
pub mod messages;
pub mod prelude;
pub mod rules;
pub mod validator;
pub mod validators;

pub use config::ValidatorConfig;
pub use validator::{Validator, ValidatorBuilder};
