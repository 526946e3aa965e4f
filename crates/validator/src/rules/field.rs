//! Fluent per-field check registration.

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::foundation::{Record, RuleError, Value};
use crate::rules::{Arg, Check, CustomFn, DateBound, RuleKind};

/// The ordered checks registered for one field.
///
/// Registration order is evaluation order. Checks are keyed by rule: adding
/// a rule that is already registered replaces its argument and message but
/// keeps its original position.
///
/// Registration never fails. Arguments that cannot be used (a pattern that
/// does not compile, an unparseable date bound, an argument of the wrong
/// shape) are recorded and reported when the validator is built.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::prelude::*;
///
/// let mut rules = RuleSet::new();
/// rules
///     .add_field_as("age", "Age")
///     .required()
///     .integer()
///     .between(18, 99)
///     .with_message("{field} must be an adult age");
///
/// let checks: Vec<_> = rules.field("age").unwrap().checks().keys().copied().collect();
/// assert_eq!(checks, [RuleKind::Required, RuleKind::Integer, RuleKind::Between]);
/// ```
#[derive(Debug)]
pub struct FieldRule {
    field: String,
    checks: IndexMap<RuleKind, Check>,
    last: Option<RuleKind>,
    issues: Vec<RuleError>,
}

impl FieldRule {
    pub(crate) fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            checks: IndexMap::new(),
            last: None,
            issues: Vec::new(),
        }
    }

    /// Name of the field these checks belong to.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Registers a check.
    ///
    /// This is the primitive behind every convenience method.
    pub fn add_check(
        &mut self,
        kind: RuleKind,
        arg: Arg,
        message: Option<Cow<'static, str>>,
    ) -> &mut Self {
        if !kind.accepts(&arg) {
            self.issues.push(RuleError::ArgumentMismatch {
                field: self.field.clone(),
                rule: kind,
                arg: format!("{arg:?}"),
            });
            self.last = None;
            return self;
        }

        let check = match message {
            Some(message) => Check::new(kind, arg).with_message(message),
            None => Check::new(kind, arg),
        };
        self.checks.insert(kind, check);
        self.last = Some(kind);
        self
    }

    /// Sets the message of the most recently registered check.
    ///
    /// The template may use `{field}`, `{name}`, `{arg}`, `{min}`, `{max}`
    /// and `{value}` placeholders.
    pub fn with_message(&mut self, message: impl Into<Cow<'static, str>>) -> &mut Self {
        if let Some(kind) = self.last
            && let Some(check) = self.checks.get_mut(&kind)
        {
            check.set_message(message.into());
        }
        self
    }

    /// The registered checks in evaluation order.
    pub fn checks(&self) -> &IndexMap<RuleKind, Check> {
        &self.checks
    }

    /// Returns the check registered for `kind`.
    pub fn check(&self, kind: RuleKind) -> Option<&Check> {
        self.checks.get(&kind)
    }

    /// Whether an `optional` check is registered.
    pub fn is_optional(&self) -> bool {
        self.checks.contains_key(&RuleKind::Optional)
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub(crate) fn issues(&self) -> &[RuleError] {
        &self.issues
    }

    fn push(&mut self, kind: RuleKind, arg: Arg) -> &mut Self {
        self.add_check(kind, arg, None)
    }

    fn push_result(&mut self, kind: RuleKind, arg: Result<Arg, RuleError>) -> &mut Self {
        match arg {
            Ok(arg) => self.push(kind, arg),
            Err(issue) => {
                self.issues.push(issue);
                self.last = None;
                self
            }
        }
    }

    // ------------------------------------------------------------------------
    // Presence
    // ------------------------------------------------------------------------

    /// The field must be present with a non-null value.
    pub fn required(&mut self) -> &mut Self {
        self.push(RuleKind::Required, Arg::None)
    }

    /// An absent field passes without running any other check.
    pub fn optional(&mut self) -> &mut Self {
        self.push(RuleKind::Optional, Arg::None)
    }

    /// The value must not be empty; `0` and `"0"` count as non-empty.
    pub fn not_empty(&mut self) -> &mut Self {
        self.push(RuleKind::NotEmpty, Arg::None)
    }

    // ------------------------------------------------------------------------
    // Numbers
    // ------------------------------------------------------------------------

    pub fn numeric(&mut self) -> &mut Self {
        self.push(RuleKind::Numeric, Arg::None)
    }

    pub fn integer(&mut self) -> &mut Self {
        self.push(RuleKind::Integer, Arg::None)
    }

    pub fn float(&mut self) -> &mut Self {
        self.push(RuleKind::Float, Arg::None)
    }

    /// The value must loosely equal `0` or `1`.
    pub fn boolean(&mut self) -> &mut Self {
        self.push(RuleKind::Bool, Arg::None)
    }

    /// The value must be numeric and strictly greater than `bound`.
    pub fn min(&mut self, bound: impl Into<f64>) -> &mut Self {
        self.push(RuleKind::Min, Arg::Number(bound.into()))
    }

    /// The value must be numeric and strictly less than `bound`.
    pub fn max(&mut self, bound: impl Into<f64>) -> &mut Self {
        self.push(RuleKind::Max, Arg::Number(bound.into()))
    }

    /// The value must lie within `min..=max`.
    pub fn between(&mut self, min: impl Into<Value>, max: impl Into<Value>) -> &mut Self {
        self.push(RuleKind::Between, Arg::Bounds(min.into(), max.into()))
    }

    // ------------------------------------------------------------------------
    // Lengths
    // ------------------------------------------------------------------------

    pub fn length(&mut self, length: usize) -> &mut Self {
        self.push(RuleKind::Length, Arg::Size(length))
    }

    pub fn length_min(&mut self, min: usize) -> &mut Self {
        self.push(RuleKind::LengthMin, Arg::Size(min))
    }

    pub fn length_max(&mut self, max: usize) -> &mut Self {
        self.push(RuleKind::LengthMax, Arg::Size(max))
    }

    // ------------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------------

    /// The value must be strictly equal to `expected`.
    pub fn equal(&mut self, expected: impl Into<Value>) -> &mut Self {
        self.push(RuleKind::Equal, Arg::Value(expected.into()))
    }

    pub fn in_array<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let set = values.into_iter().map(Into::into).collect();
        self.push(RuleKind::InArray, Arg::Set(set))
    }

    pub fn not_in_array<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let set = values.into_iter().map(Into::into).collect();
        self.push(RuleKind::NotInArray, Arg::Set(set))
    }

    /// The value must match `pattern` (Rust `regex` syntax, unanchored).
    pub fn regex(&mut self, pattern: &str) -> &mut Self {
        let arg = Arg::pattern(&self.field, pattern);
        self.push_result(RuleKind::Regex, arg)
    }

    /// The value must consist of ASCII letters only.
    pub fn alpha(&mut self) -> &mut Self {
        self.push(RuleKind::Alpha, Arg::None)
    }

    // ------------------------------------------------------------------------
    // Network
    // ------------------------------------------------------------------------

    pub fn url(&mut self) -> &mut Self {
        self.push(RuleKind::Url, Arg::None)
    }

    /// Like [`url`](Self::url), and the host must resolve.
    pub fn active_url(&mut self) -> &mut Self {
        self.push(RuleKind::ActiveUrl, Arg::None)
    }

    pub fn is_ip(&mut self) -> &mut Self {
        self.push(RuleKind::IsIp, Arg::None)
    }

    // ------------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------------

    pub fn timestamp(&mut self) -> &mut Self {
        self.push(RuleKind::Timestamp, Arg::None)
    }

    /// The value must be a date strictly before `bound`.
    pub fn date_before(&mut self, bound: &str) -> &mut Self {
        let arg = DateBound::parse(&self.field, bound).map(Arg::Date);
        self.push_result(RuleKind::DateBefore, arg)
    }

    /// The value must be a date strictly before today's midnight.
    pub fn date_before_today(&mut self) -> &mut Self {
        self.push(RuleKind::DateBefore, Arg::Date(DateBound::Today))
    }

    /// The value must be a date strictly after `bound`.
    pub fn date_after(&mut self, bound: &str) -> &mut Self {
        let arg = DateBound::parse(&self.field, bound).map(Arg::Date);
        self.push_result(RuleKind::DateAfter, arg)
    }

    /// The value must be a date strictly after today's midnight.
    pub fn date_after_today(&mut self) -> &mut Self {
        self.push(RuleKind::DateAfter, Arg::Date(DateBound::Today))
    }

    // ------------------------------------------------------------------------
    // Custom
    // ------------------------------------------------------------------------

    /// Delegates to a caller-supplied predicate.
    pub fn func<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&Record, &str) -> bool + Send + Sync + 'static,
    {
        self.push(RuleKind::Func, Arg::Func(CustomFn::new(predicate)))
    }
}
