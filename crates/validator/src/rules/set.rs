//! The named collection of field rules.

use indexmap::IndexMap;

use crate::foundation::RuleError;
use crate::rules::FieldRule;

#[derive(Debug)]
struct FieldEntry {
    alias: Option<String>,
    rule: FieldRule,
}

/// Field rules for an entire record shape.
///
/// Fields are evaluated in insertion order. Adding a field name a second
/// time replaces its rule (and alias) but keeps its position.
///
/// A `RuleSet` is built once and then handed to a
/// [`Validator`](crate::Validator), which only reads it.
#[derive(Debug, Default)]
pub struct RuleSet {
    fields: IndexMap<String, FieldEntry>,
}

impl RuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field and returns its (empty) rule for chained registration.
    pub fn add_field(&mut self, name: impl Into<String>) -> &mut FieldRule {
        self.insert(name.into(), None)
    }

    /// Adds a field with a display alias used in messages.
    pub fn add_field_as(
        &mut self,
        name: impl Into<String>,
        alias: impl Into<String>,
    ) -> &mut FieldRule {
        self.insert(name.into(), Some(alias.into()))
    }

    fn insert(&mut self, name: String, alias: Option<String>) -> &mut FieldRule {
        let entry = FieldEntry {
            alias,
            rule: FieldRule::new(name.clone()),
        };
        let (index, _) = self.fields.insert_full(name, entry);
        &mut self.fields[index].rule
    }

    /// Iterates `(name, alias, rule)` in evaluation order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&str>, &FieldRule)> {
        self.fields
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.alias.as_deref(), &entry.rule))
    }

    /// Returns the rule registered for `name`.
    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.get(name).map(|entry| &entry.rule)
    }

    /// Returns the alias registered for `name`.
    pub fn alias(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|entry| entry.alias.as_deref())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is registered.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Reports the first registration problem, in field order.
    pub fn verify(&self) -> Result<(), RuleError> {
        match self.fields.values().find_map(|entry| entry.rule.issues().first()) {
            Some(issue) => Err(issue.clone()),
            None => Ok(()),
        }
    }
}
