//! Mutable configuration object over the typed option registry.

use crate::options::ConfigKey;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// A single configuration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Str(String),
    Duration(Duration),
    Strings(Vec<String>),
}

/// Conversion between Rust values and [`ConfigValue`].
///
/// Implemented for the value types the option registries use. `from_value`
/// returns `None` when the stored value was written through a key of a
/// different type.
pub trait OptionValue: Sized {
    fn into_value(self) -> ConfigValue;
    fn from_value(value: &ConfigValue) -> Option<Self>;
}

impl OptionValue for bool {
    fn into_value(self) -> ConfigValue {
        ConfigValue::Bool(self)
    }

    fn from_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl OptionValue for u32 {
    fn into_value(self) -> ConfigValue {
        ConfigValue::Int(i64::from(self))
    }

    fn from_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Int(i) => u32::try_from(*i).ok(),
            _ => None,
        }
    }
}

impl OptionValue for String {
    fn into_value(self) -> ConfigValue {
        ConfigValue::Str(self)
    }

    fn from_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl OptionValue for Duration {
    fn into_value(self) -> ConfigValue {
        ConfigValue::Duration(self)
    }

    fn from_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Duration(d) => Some(*d),
            _ => None,
        }
    }
}

impl OptionValue for Vec<String> {
    fn into_value(self) -> ConfigValue {
        ConfigValue::Strings(self)
    }

    fn from_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Strings(v) => Some(v.clone()),
            _ => None,
        }
    }
}

/// Mutable key→value configuration handed to the storage adapter.
///
/// Keys come from the fixed registries in [`options`](crate::options) and
/// [`cql`](crate::cql). Backed by an ordered map so [`snapshot`](Self::snapshot)
/// output is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorageConfig {
    values: BTreeMap<&'static str, ConfigValue>,
}

impl StorageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value under that name.
    pub fn set<T: OptionValue>(&mut self, key: ConfigKey<T>, value: T) -> &mut Self {
        self.values.insert(key.name(), value.into_value());
        self
    }

    /// Typed read of `key`. `None` if unset, or set through a key of a
    /// different type.
    pub fn get<T: OptionValue>(&self, key: ConfigKey<T>) -> Option<T> {
        self.values.get(key.name()).and_then(T::from_value)
    }

    /// Whether any value is set under `key`'s name.
    pub fn contains<T>(&self, key: ConfigKey<T>) -> bool {
        self.values.contains_key(key.name())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Ordered JSON view of the effective configuration, for logs and
    /// test assertions.
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(&self.values).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cql, options};
    use serde_json::json;

    #[test]
    fn test_set_get_round_trip() {
        let mut config = StorageConfig::new();
        config.set(cql::KEYSPACE, "graph_test".to_string());
        config.set(options::PAGE_SIZE, 500);
        config.set(options::CONNECTION_TIMEOUT, Duration::from_secs(60));
        config.set(cql::SSL_ENABLED, true);
        config.set(options::STORAGE_HOSTS, vec!["localhost".to_string()]);

        assert_eq!(config.get(cql::KEYSPACE).as_deref(), Some("graph_test"));
        assert_eq!(config.get(options::PAGE_SIZE), Some(500));
        assert_eq!(
            config.get(options::CONNECTION_TIMEOUT),
            Some(Duration::from_secs(60))
        );
        assert_eq!(config.get(cql::SSL_ENABLED), Some(true));
        assert_eq!(
            config.get(options::STORAGE_HOSTS),
            Some(vec!["localhost".to_string()])
        );
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let mut config = StorageConfig::new();
        config.set(options::STORAGE_HOSTS, vec!["10.0.0.1".to_string()]);
        config.set(options::STORAGE_HOSTS, vec!["localhost".to_string()]);

        assert_eq!(
            config.get(options::STORAGE_HOSTS),
            Some(vec!["localhost".to_string()])
        );
        assert_eq!(config.len(), 1);
    }

    #[test]
    fn test_type_mismatch_reads_none() {
        let str_key: ConfigKey<String> = ConfigKey::new("x");
        let bool_key: ConfigKey<bool> = ConfigKey::new("x");

        let mut config = StorageConfig::new();
        config.set(str_key, "yes".to_string());

        assert!(config.contains(bool_key));
        assert_eq!(config.get(bool_key), None);
    }

    #[test]
    fn test_snapshot_is_ordered_json() {
        let mut config = StorageConfig::new();
        config.set(options::PAGE_SIZE, 500);
        config.set(cql::KEYSPACE, "graph_test".to_string());
        config.set(options::CONNECTION_TIMEOUT, Duration::from_secs(60));

        assert_eq!(
            config.snapshot(),
            json!({
                "query.page-size": 500,
                "storage.connection-timeout": { "secs": 60, "nanos": 0 },
                "storage.cql.keyspace": "graph_test",
            })
        );
    }

    #[test]
    fn test_empty_config() {
        let config = StorageConfig::new();
        assert!(config.is_empty());
        assert_eq!(config.get(cql::KEYSPACE), None);
        assert!(!config.contains(cql::KEYSPACE));
    }
}
