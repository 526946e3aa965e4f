//! Core validation types
//!
//! - **Values**: [`Value`], the dynamically typed field value
//! - **Records**: [`Record`], the field-name → value mapping being checked
//! - **Errors**: [`ValidationError`], [`RuleError`], [`RecordError`]
//! - **Context**: [`EvalContext`] and the [`HostResolver`] seam used by
//!   network rules

pub mod context;
pub mod error;
pub mod record;
pub mod value;

pub use context::{EvalContext, HostResolver, MAX_PENDING_LOOKUPS, SystemResolver};
pub use error::{RecordError, RuleError, ValidationError};
pub use record::Record;
pub use value::Value;

/// A validation result using the standard `ValidationError`.
pub type ValidationResult<T> = Result<T, ValidationError>;
