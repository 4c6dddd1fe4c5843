//! Recording stub for tests that must not launch a real daemon.

use super::StorageDaemon;
use crate::error::Result;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// A [`StorageDaemon`] that records calls instead of launching anything.
#[derive(Debug, Default)]
pub struct StubDaemon {
    started: AtomicBool,
    starts: AtomicUsize,
    last_config: Mutex<Option<PathBuf>>,
}

impl StubDaemon {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stub that already reports itself started.
    pub fn already_started() -> Self {
        let stub = Self::default();
        stub.started.store(true, Ordering::SeqCst);
        stub
    }

    /// Number of `start` calls that actually transitioned the stub to
    /// started (idempotent repeats are not counted).
    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    /// Config file passed to the most recent `start` call, if any.
    pub fn last_config(&self) -> Option<PathBuf> {
        self.last_config
            .lock()
            .expect("stub config lock poisoned")
            .clone()
    }
}

impl StorageDaemon for StubDaemon {
    fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    fn start(&self, config_file: &Path) -> Result<()> {
        *self
            .last_config
            .lock()
            .expect("stub config lock poisoned") = Some(config_file.to_path_buf());
        if !self.started.swap(true, Ordering::SeqCst) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}
