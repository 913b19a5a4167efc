//! Submitted form data and the reserved `env` channel.

use super::config::{value_to_i64, value_truthy};
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Key under which client-side script submits ephemeral metadata.
const ENV_KEY: &str = "env";

/// One form submission: field values plus the reserved `env` channel.
///
/// The `env` channel carries per-render metadata injected client-side
/// (the honeypot field identifier, the form-display timestamp). It is not
/// part of the visible field set and is split out at construction.
///
/// # Example
///
/// ```rust
/// use formshield::Submission;
/// use serde_json::json;
///
/// let submission = Submission::from_value(json!({
///     "email": "user@example.com",
///     "cf_field_3": "",
///     "env": { "hp": "cf_field_3", "tts": 1700000000 }
/// }));
///
/// assert_eq!(submission.env_str("hp").as_deref(), Some("cf_field_3"));
/// assert!(submission.field_is_empty("cf_field_3"));
/// assert!(!submission.field_is_empty("email"));
/// ```
#[derive(Clone, Debug, Default, Serialize)]
pub struct Submission {
    fields: HashMap<String, Value>,
    env: Map<String, Value>,
}

impl Submission {
    /// Build a submission from a JSON value.
    ///
    /// The `env` key, when present and an object, is extracted into the
    /// env channel. Non-object values yield an empty submission.
    pub fn from_value(value: Value) -> Self {
        let map = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        Self::from_map(map)
    }

    fn from_map(mut map: Map<String, Value>) -> Self {
        let env = match map.remove(ENV_KEY) {
            Some(Value::Object(env)) => env,
            _ => Map::new(),
        };

        Self {
            fields: map.into_iter().collect(),
            env,
        }
    }

    /// Raw value of a submitted field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Whether the field key exists in the submission at all.
    pub fn contains_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Whether a field is missing or holds an empty value.
    ///
    /// Empty means `null`, `""`, `"0"`, zero, `false` or an empty
    /// collection, matching the loose emptiness the host applies to
    /// submitted values.
    pub fn field_is_empty(&self, key: &str) -> bool {
        self.fields.get(key).is_none_or(|v| !value_truthy(v))
    }

    /// String value from the env channel.
    ///
    /// Returns `None` when the key is absent, null, or not representable
    /// as a string.
    pub fn env_str(&self, key: &str) -> Option<String> {
        match self.env.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Integer value from the env channel.
    ///
    /// Absent and null keys yield `None`; present values coerce loosely
    /// (non-numeric strings coerce to 0).
    pub fn env_i64(&self, key: &str) -> Option<i64> {
        self.env
            .get(key)
            .filter(|v| !v.is_null())
            .map(value_to_i64)
    }
}

impl From<Value> for Submission {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl<'de> Deserialize<'de> for Submission {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::deserialize(deserializer)?;
        Ok(Self::from_map(map))
    }
}
