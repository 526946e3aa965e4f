//! Rule registration
//!
//! - [`RuleKind`]: the closed set of catalog predicates
//! - [`Arg`] / [`Check`]: one registered `(rule, argument, message)`
//! - [`FieldRule`]: the ordered checks of one field
//! - [`RuleSet`]: all fields of a record shape
//! - [`RuleSchema`]: the same, as a deserializable document
//!
//! Nothing in this module evaluates anything; it only builds the structure
//! a [`Validator`](crate::Validator) walks.

pub mod check;
pub mod field;
pub mod kind;
pub mod schema;
pub mod set;

pub use check::{Arg, Check, CustomFn, CustomPredicate, DateBound};
pub use field::FieldRule;
pub use kind::RuleKind;
pub use schema::{CheckSchema, FieldSchema, RuleSchema};
pub use set::RuleSet;
