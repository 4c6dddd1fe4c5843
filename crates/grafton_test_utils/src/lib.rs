//! Grafton Test Utilities
//!
//! Boots an embedded CQL storage daemon for adapter tests and builds the
//! adapter configurations those tests connect with.
//!
//! # Usage
//!
//! ```rust,ignore
//! use grafton_test_utils::StorageSetup;
//!
//! #[test]
//! fn adapter_smoke() {
//!     let setup = StorageSetup::new();
//!     setup.start_clean_embedded(false).unwrap();
//!
//!     let config = setup.build_configuration("adapter_smoke").unwrap();
//!     // hand `config` to the adapter client
//! }
//! ```
//!
//! Set `GRAFTON_TEST_STORAGE_HOST` to run the same tests against an external
//! deployment instead of the embedded daemon.

pub mod config;
pub mod daemon;
pub mod env;
pub mod error;
pub mod keyspace;
pub mod paths;
pub mod setup;

// Re-exports for convenience
pub use config::enable_ssl;
pub use daemon::{EmbeddedDaemon, StorageDaemon, StubDaemon};
pub use env::{EnvSource, MapEnv, SystemEnv};
pub use error::{Result, SetupError};
pub use keyspace::{clean_keyspace_name, unique_keyspace};
pub use paths::ResolvedPaths;
pub use setup::StorageSetup;
