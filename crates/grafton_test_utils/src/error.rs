//! Error types for the test harness.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Harness operation result type.
pub type Result<T> = std::result::Result<T, SetupError>;

/// Errors surfaced while preparing the test environment.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A configured directory failed validation.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Wiping the data directory failed for a reason other than absence.
    #[error("failed to wipe data directory {}: {source}", .path.display())]
    WipeFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The daemon process could not be launched.
    #[error("failed to launch daemon {}: {source}", .binary.display())]
    SpawnFailed {
        binary: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The daemon never accepted connections.
    #[error("daemon not reachable on port {port} within {timeout:?}")]
    StartTimeout { port: u16, timeout: Duration },

    /// A caller-supplied argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
