//! Test environment bootstrap for the embedded storage daemon.

use crate::daemon::{EmbeddedDaemon, StorageDaemon};
use crate::env::{EnvSource, SystemEnv, STORAGE_HOST_VAR};
use crate::error::{Result, SetupError};
use crate::paths::{self, ResolvedPaths};
use grafton_config::StorageConfig;
use std::fs;
use std::io;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Shared context for tests that exercise the storage adapter against an
/// embedded daemon.
///
/// Construct one per test binary and hand it to every fixture: paths are
/// resolved once per context, and the daemon is started at most once.
pub struct StorageSetup {
    env: Arc<dyn EnvSource>,
    daemon: Arc<dyn StorageDaemon>,
    paths: Mutex<Option<ResolvedPaths>>,
}

impl StorageSetup {
    /// Context backed by the process environment and an [`EmbeddedDaemon`].
    pub fn new() -> Self {
        Self::with_parts(Arc::new(SystemEnv), Arc::new(EmbeddedDaemon::new()))
    }

    /// Context with an injected environment and daemon, for tests.
    pub fn with_parts(env: Arc<dyn EnvSource>, daemon: Arc<dyn StorageDaemon>) -> Self {
        Self {
            env,
            daemon,
            paths: Mutex::new(None),
        }
    }

    /// Resolve (once) and return the daemon's filesystem layout.
    ///
    /// The first caller computes the paths; every later caller gets the
    /// cached value without re-reading the environment or re-validating.
    pub fn resolve_paths(&self) -> Result<ResolvedPaths> {
        let mut cache = self.paths.lock().expect("paths cache lock poisoned");
        if let Some(resolved) = cache.as_ref() {
            return Ok(resolved.clone());
        }
        let resolved = paths::resolve(self.env.as_ref())?;
        *cache = Some(resolved.clone());
        Ok(resolved)
    }

    /// Wipe the daemon's data directory and start it with the resolved
    /// config file.
    ///
    /// Idempotent: once the daemon reports itself started, later calls
    /// delete nothing and start nothing. When `GRAFTON_TEST_STORAGE_HOST`
    /// points at an external instance the whole call is a no-op unless
    /// `force` is set.
    pub fn start_clean_embedded(&self, force: bool) -> Result<()> {
        if !force && self.env.var(STORAGE_HOST_VAR).is_some() {
            debug!("external storage host configured, skipping embedded bootstrap");
            return Ok(());
        }

        let paths = self.resolve_paths()?;
        if !self.daemon.is_started() {
            info!("wiping data directory {}", paths.data_dir.display());
            match fs::remove_dir_all(&paths.data_dir) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(SetupError::WipeFailed {
                        path: paths.data_dir.clone(),
                        source,
                    })
                }
            }
        }

        self.daemon.start(&paths.config_file)
    }

    /// Build an adapter configuration for `keyspace` with the fixture
    /// defaults.
    pub fn build_configuration(&self, keyspace: &str) -> Result<StorageConfig> {
        crate::config::build_configuration(self.env.as_ref(), keyspace)
    }
}

impl Default for StorageSetup {
    fn default() -> Self {
        Self::new()
    }
}
