//! Fragment-include path rewriting
//!
//! Base component models pull shared field lists in with `{"...": "<path>"}`.
//! Generated components live one directory level deeper, so paths into the
//! shared fragment directory need a different relative prefix.

use serde_json::{Map, Value};

use crate::layout::FragmentsConfig;

/// Object key marking a fragment include
pub const INCLUDE_KEY: &str = "...";

#[derive(Debug, Clone)]
pub struct PathRewriter {
    shared_prefix: String,
    rewritten_prefix: String,
}

impl Default for PathRewriter {
    fn default() -> Self {
        Self::from_config(&FragmentsConfig::default())
    }
}

impl PathRewriter {
    pub fn new(shared_prefix: impl Into<String>, rewritten_prefix: impl Into<String>) -> Self {
        Self {
            shared_prefix: shared_prefix.into(),
            rewritten_prefix: rewritten_prefix.into(),
        }
    }

    pub fn from_config(config: &FragmentsConfig) -> Self {
        Self::new(&config.shared_prefix, &config.rewritten_prefix)
    }

    /// Return a copy of `value` with every matching include path rewritten.
    /// Anything else, including includes pointing elsewhere, is copied as-is.
    pub fn rewrite(&self, value: &Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, val)| (key.clone(), self.rewrite_entry(key, val)))
                    .collect::<Map<String, Value>>(),
            ),
            Value::Array(items) => Value::Array(items.iter().map(|v| self.rewrite(v)).collect()),
            other => other.clone(),
        }
    }

    fn rewrite_entry(&self, key: &str, value: &Value) -> Value {
        match value {
            Value::String(path) if key == INCLUDE_KEY => {
                match path.strip_prefix(self.shared_prefix.as_str()) {
                    Some(rest) => Value::String(format!("{}{rest}", self.rewritten_prefix)),
                    None => value.clone(),
                }
            }
            _ => self.rewrite(value),
        }
    }
}
