//! Form configuration access.
//!
//! Provides nested, default-friendly lookup over the form's parameter tree,
//! mirroring the loose typing of form settings as they arrive from the host
//! (numbers may be stored as strings, flags as `0`/`1`, and so on).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Ordered mapping of named form parameters.
///
/// Read-only to validation rules except for one mutation point: the
/// container attribute set, which rules may extend with `data-cf-*`
/// markers during the pre-render phase so client-side script can detect
/// which protections are active.
///
/// # Example
///
/// ```rust
/// use formshield::FormConfig;
/// use serde_json::json;
///
/// let form = FormConfig::from_value(json!({
///     "params": {
///         "honeypot": 2,
///         "min_time_to_submit": "5"
///     }
/// }));
///
/// assert_eq!(form.get_i64("params.honeypot", 0), 2);
/// assert_eq!(form.get_i64("params.min_time_to_submit", 2), 5);
/// assert_eq!(form.get_i64("params.missing", 7), 7);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(flatten)]
    values: Map<String, Value>,

    #[serde(skip)]
    container_attrs: BTreeMap<String, String>,
}

impl FormConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from a JSON value.
    ///
    /// Non-object values yield an empty configuration.
    pub fn from_value(value: Value) -> Self {
        let values = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        Self {
            values,
            container_attrs: BTreeMap::new(),
        }
    }

    /// Look up a value by dotted path (`params.honeypot`).
    ///
    /// Returns `None` when any path segment is missing or the intermediate
    /// value is not an object. Never panics.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut node = self.values.get(parts.next()?)?;

        for part in parts {
            node = node.as_object()?.get(part)?;
        }

        Some(node)
    }

    /// Integer lookup with a default.
    ///
    /// Numbers, numeric strings and booleans coerce to an integer; any
    /// other present value coerces to 0. Missing paths yield `default`.
    pub fn get_i64(&self, path: &str, default: i64) -> i64 {
        self.get(path).map_or(default, value_to_i64)
    }

    /// Boolean lookup with a default.
    ///
    /// `false`, `0`, `"0"`, `""`, `null` and empty collections are false;
    /// everything else present is true. Missing paths yield `default`.
    pub fn get_bool(&self, path: &str, default: bool) -> bool {
        self.get(path).map_or(default, value_truthy)
    }

    /// String lookup with a default.
    pub fn get_str(&self, path: &str, default: &str) -> String {
        match self.get(path) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => default.to_string(),
        }
    }

    /// The container attribute set, in deterministic (sorted) order.
    pub fn container_attrs(&self) -> &BTreeMap<String, String> {
        &self.container_attrs
    }

    /// Add an attribute to the form container.
    ///
    /// This is the single mutation point exposed to validation rules.
    pub fn add_container_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.container_attrs.insert(name.into(), value.into());
    }
}

/// Coerce a JSON value to an integer.
pub(crate) fn value_to_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .or_else(|_| s.parse::<f64>().map(|f| f as i64))
                .unwrap_or(0)
        }
        Value::Bool(b) => i64::from(*b),
        _ => 0,
    }
}

/// Loose truthiness over JSON values.
///
/// `false`, zero, `""`, `"0"`, `null` and empty collections are false.
pub(crate) fn value_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Null => false,
    }
}
