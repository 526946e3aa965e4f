//! The input record checked by a validator.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::foundation::{RecordError, Value};

/// An immutable-by-convention mapping from field name to [`Value`].
///
/// Field presence follows "isset" semantics: a key counts as present when it
/// exists and does not hold [`Value::Null`].
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::foundation::{Record, Value};
///
/// let record = Record::new().with("name", "alice").with("age", 30);
/// assert!(record.contains("name"));
/// assert!(!record.contains("email"));
/// assert_eq!(record.value("email"), &Value::Null);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

static NULL: Value = Value::Null;

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, consuming and returning the record.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts or replaces a field, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    /// Raw lookup: `Some` for every stored key, including ones holding `Null`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The value of a field, `Null` when the key is missing.
    #[must_use]
    pub fn value(&self, name: &str) -> &Value {
        self.fields.get(name).unwrap_or(&NULL)
    }

    /// Whether the field is present with a non-null value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(|value| !value.is_null())
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Builds a record from a JSON object.
    ///
    /// Nested objects are rejected; arrays become [`Value::List`].
    pub fn from_json(json: serde_json::Value) -> Result<Self, RecordError> {
        let serde_json::Value::Object(map) = json else {
            return Err(RecordError::NotAnObject {
                found: json_type_name(&json),
            });
        };

        let fields = map
            .into_iter()
            .map(|(name, value)| {
                let value = Value::from_json_at(value, &name)?;
                Ok((name, value))
            })
            .collect::<Result<_, RecordError>>()?;

        Ok(Self { fields })
    }

    /// Parses a JSON document into a record.
    pub fn from_json_str(input: &str) -> Result<Self, RecordError> {
        let json: serde_json::Value =
            serde_json::from_str(input).map_err(|e| RecordError::Parse {
                message: e.to_string(),
            })?;
        Self::from_json(json)
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
