//! Environment overrides recognized by the harness.

use std::collections::HashMap;
use std::sync::Mutex;

/// Address of an external, already-running storage instance. When set, the
/// embedded bootstrap becomes a no-op and the configuration builder points
/// the driver at this host instead.
pub const STORAGE_HOST_VAR: &str = "GRAFTON_TEST_STORAGE_HOST";

/// Override for the daemon config directory. Must exist and be absolute.
pub const CONF_DIR_VAR: &str = "GRAFTON_TEST_CONF_DIR";

/// Override for the daemon data directory. Wiped on bootstrap, so it does
/// not need to exist.
pub const DATA_DIR_VAR: &str = "GRAFTON_TEST_DATA_DIR";

/// Override for the daemon server binary.
pub const DAEMON_BIN_VAR: &str = "GRAFTON_TEST_DAEMON_BIN";

/// Source of environment variables.
///
/// The harness reads all overrides through this seam so tests can substitute
/// an in-memory environment.
pub trait EnvSource: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnv;

impl EnvSource for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment for hermetic tests.
///
/// Counts how many times each key is read, so tests can assert that cached
/// values are not re-resolved.
#[derive(Debug, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
    reads: Mutex<HashMap<String, usize>>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variable assignment.
    pub fn with_var(mut self, key: &str, value: impl Into<String>) -> Self {
        self.vars.insert(key.to_string(), value.into());
        self
    }

    /// How many times `key` has been read through [`EnvSource::var`].
    pub fn reads(&self, key: &str) -> usize {
        self.reads
            .lock()
            .expect("read counter lock poisoned")
            .get(key)
            .copied()
            .unwrap_or(0)
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        *self
            .reads
            .lock()
            .expect("read counter lock poisoned")
            .entry(key.to_string())
            .or_insert(0) += 1;
        self.vars.get(key).cloned()
    }
}
