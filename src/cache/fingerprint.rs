//! Cache keys for (query, variables) pairs

use serde_json::{Map, Value};
use std::fmt;

/// Deterministic cache key for a query and its variables
///
/// The query text with each whitespace run collapsed to one space and the
/// ends trimmed, followed by the variables serialized compactly with object
/// keys sorted at every depth.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn new(query: &str, variables: &Value) -> Self {
        let mut key = query.split_whitespace().collect::<Vec<_>>().join(" ");
        key.push_str(&canonical_json(variables));
        Self(key)
    }

    /// Wrap an existing key, as read back from the cache file
    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compact JSON with object keys sorted recursively
pub fn canonical_json(value: &Value) -> String {
    sorted(value).to_string()
}

fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut out = Map::new();
            for (k, v) in entries {
                out.insert(k.clone(), sorted(v));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}
