//! Daemon lifecycle seam.
//!
//! The bootstrapper drives the daemon through [`StorageDaemon`] so unit tests
//! can swap the real process manager for a [`StubDaemon`].

pub mod embedded;
pub mod stub;

pub use embedded::EmbeddedDaemon;
pub use stub::StubDaemon;

use crate::error::Result;
use std::path::Path;

/// Lifecycle operations the bootstrapper needs from a storage daemon.
pub trait StorageDaemon: Send + Sync {
    /// Whether this process has already started the daemon.
    fn is_started(&self) -> bool;

    /// Start the daemon with the given config file. Must be idempotent: a
    /// call after a successful start is a no-op.
    fn start(&self, config_file: &Path) -> Result<()>;
}
