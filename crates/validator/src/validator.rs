//! The evaluation driver.
//!
//! A [`Validator`] walks the fields of its [`RuleSet`] in registration order
//! and each field's checks in registration order, and stops at the first
//! check that fails. Fields carrying an `optional` check are skipped
//! entirely when the record does not hold a value for them.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};

use crate::config::ValidatorConfig;
use crate::foundation::{
    EvalContext, HostResolver, Record, RuleError, SystemResolver, ValidationError,
    ValidationResult,
};
use crate::messages::render;
use crate::rules::{Check, RuleSet};
use crate::validators::predicate;

// ============================================================================
// VALIDATOR
// ============================================================================

/// Runs a verified [`RuleSet`] against records.
///
/// A validator holds no per-call state, so one instance can be shared
/// across threads.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::prelude::*;
///
/// let mut rules = RuleSet::new();
/// rules.add_field_as("age", "Age").required().integer().between(18, 99);
/// rules.add_field("nickname").optional().alpha();
///
/// let validator = Validator::new(rules).unwrap();
///
/// assert!(validator.validate(&Record::new().with("age", 30)).is_ok());
///
/// let err = validator.validate(&Record::new().with("age", 12)).unwrap_err();
/// assert_eq!(err.rule, RuleKind::Between);
/// assert_eq!(err.message, "Age must be between 18 and 99");
/// ```
pub struct Validator {
    rules: RuleSet,
    config: ValidatorConfig,
    resolver: Arc<dyn HostResolver>,
    reference_time: Option<NaiveDateTime>,
}

impl Validator {
    /// Builds a validator with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleError`] recorded while the rules were
    /// registered.
    pub fn new(rules: RuleSet) -> Result<Self, RuleError> {
        Self::builder(rules).build()
    }

    /// Starts a builder for a validator over `rules`.
    #[must_use]
    pub fn builder(rules: RuleSet) -> ValidatorBuilder {
        ValidatorBuilder::new(rules)
    }

    /// The rules this validator evaluates.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Returns `true` if the record passes every check.
    #[must_use]
    pub fn is_valid(&self, record: &Record) -> bool {
        self.validate(record).is_ok()
    }

    /// Validates a record.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a [`ValidationError`]. Fields and
    /// checks after it are not evaluated.
    pub fn validate(&self, record: &Record) -> ValidationResult<()> {
        let now = self
            .reference_time
            .unwrap_or_else(|| Utc::now().naive_utc());
        let ctx = EvalContext::new(now, self.config.dns_timeout(), self.resolver.as_ref());

        for (name, alias, rule) in self.rules.fields() {
            if rule.is_optional() && !record.contains(name) {
                tracing::trace!(field = name, "optional field absent, skipped");
                continue;
            }

            for check in rule.checks().values() {
                let passed = predicate(check.kind())(record, name, check.arg(), &ctx);
                tracing::trace!(field = name, rule = %check.kind(), passed, "check evaluated");

                if !passed {
                    let error = self.failure(record, name, alias, check);
                    tracing::debug!(
                        field = name,
                        rule = %check.kind(),
                        value_type = error.value.type_name(),
                        message = %error.message,
                        "validation failed"
                    );
                    return Err(error);
                }
            }
        }

        Ok(())
    }

    fn failure(
        &self,
        record: &Record,
        name: &str,
        alias: Option<&str>,
        check: &Check,
    ) -> ValidationError {
        let value = record.value(name).clone();
        let template = check
            .message()
            .unwrap_or_else(|| self.config.template(check.kind()));
        let message = render(
            template,
            alias.unwrap_or(name),
            name,
            check.arg(),
            &value,
        );

        ValidationError {
            field: name.to_owned(),
            alias: alias.map(str::to_owned),
            value,
            rule: check.kind(),
            message,
            arg: check.arg().clone(),
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("fields", &self.rules.len())
            .field("config", &self.config)
            .field("reference_time", &self.reference_time)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Configures and builds a [`Validator`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fieldcheck_validator::prelude::*;
///
/// let mut rules = RuleSet::new();
/// rules.add_field("name").required();
///
/// let validator = Validator::builder(rules)
///     .config(ValidatorConfig::new().with_message(RuleKind::Required, "need {field}"))
///     .build()
///     .unwrap();
///
/// let err = validator.validate(&Record::new()).unwrap_err();
/// assert_eq!(err.message, "need name");
/// ```
#[must_use = "builder methods must be chained or built"]
pub struct ValidatorBuilder {
    rules: RuleSet,
    config: ValidatorConfig,
    resolver: Arc<dyn HostResolver>,
    reference_time: Option<NaiveDateTime>,
}

impl ValidatorBuilder {
    fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            config: ValidatorConfig::default(),
            resolver: Arc::new(SystemResolver),
            reference_time: None,
        }
    }

    /// Replaces the configuration.
    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses a custom host resolver for `activeUrl`.
    pub fn resolver(mut self, resolver: impl HostResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Uses a shared host resolver for `activeUrl`.
    pub fn shared_resolver(mut self, resolver: Arc<dyn HostResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Pins the reference time (UTC) for relative date rules instead of
    /// reading the clock on every run.
    pub fn reference_time(mut self, now: NaiveDateTime) -> Self {
        self.reference_time = Some(now);
        self
    }

    /// Verifies the rules and builds the validator.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleError`] recorded while the rules were
    /// registered.
    pub fn build(self) -> Result<Validator, RuleError> {
        self.rules.verify()?;

        tracing::debug!(
            fields = self.rules.len(),
            dns_timeout_ms = self.config.dns_timeout_ms,
            "validator built"
        );

        Ok(Validator {
            rules: self.rules,
            config: self.config,
            resolver: self.resolver,
            reference_time: self.reference_time,
        })
    }
}

impl fmt::Debug for ValidatorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorBuilder")
            .field("fields", &self.rules.len())
            .field("config", &self.config)
            .field("reference_time", &self.reference_time)
            .finish_non_exhaustive()
    }
}
