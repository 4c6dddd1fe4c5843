//! Graph-level configuration options shared by every storage backend.

use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

/// A typed key into a [`StorageConfig`](crate::StorageConfig).
///
/// The phantom type parameter ties the key to the value type it stores, so a
/// key declared for one type cannot read or write another.
pub struct ConfigKey<T> {
    name: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> ConfigKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _value: PhantomData,
        }
    }

    /// Canonical dotted option name.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for ConfigKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ConfigKey<T> {}

impl<T> fmt::Debug for ConfigKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConfigKey").field(&self.name).finish()
    }
}

/// Rows fetched per page when iterating large result sets.
pub const PAGE_SIZE: ConfigKey<u32> = ConfigKey::new("query.page-size");

/// How long the driver waits when establishing a connection.
pub const CONNECTION_TIMEOUT: ConfigKey<Duration> = ConfigKey::new("storage.connection-timeout");

/// Which storage backend the adapter binds to.
pub const STORAGE_BACKEND: ConfigKey<String> = ConfigKey::new("storage.backend");

/// Hosts the driver contacts initially.
pub const STORAGE_HOSTS: ConfigKey<Vec<String>> = ConfigKey::new("storage.hostname");
