//! Upstream institution records.
//!
//! Colleges and schools arrive from several backends that disagree on field
//! naming (`collegeId` vs `_id` vs `id`, `coordinates` vs `location` vs flat
//! `lat`/`lng`, numbers vs numeric strings). [`Entity`] keeps the raw JSON
//! object and offers tolerant accessors instead of forcing a canonical schema.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::CoreError;

/// A raw upstream entity: always a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Entity(Map<String, Value>);

impl Entity {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value, which must be an object.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidEntity`] for arrays, scalars and `null`.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CoreError::InvalidEntity(json_kind(&other).to_string())),
        }
    }

    /// Builder-style insert, mostly for tests and fixtures.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.to_string(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Non-empty string field. Empty strings count as absent.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Numeric field. Accepts JSON numbers and numeric strings.
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(value_as_f64)
    }

    /// Nested object field.
    #[must_use]
    pub fn get_object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.0.get(key).and_then(Value::as_object)
    }

    /// Array field. An empty array is still present.
    #[must_use]
    pub fn get_array(&self, key: &str) -> Option<&Vec<Value>> {
        self.0.get(key).and_then(Value::as_array)
    }

    /// Display name: `name`, else `collegeName`.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get_str("name").or_else(|| self.get_str("collegeName"))
    }

    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Entity {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Entity {
    type Error = CoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// Interpret a JSON value as a number the way loosely-typed upstream data
/// expects: numbers as-is, trimmed numeric strings parsed, everything else
/// absent.
#[must_use]
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
