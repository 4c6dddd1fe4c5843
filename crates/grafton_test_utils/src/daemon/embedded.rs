//! External daemon process management: spawn and readiness probing.

use super::StorageDaemon;
use crate::env::{EnvSource, SystemEnv, DAEMON_BIN_VAR};
use crate::error::{Result, SetupError};
use std::net::{SocketAddr, TcpStream};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::thread::sleep;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default server binary, resolved through `PATH`.
const DEFAULT_BINARY: &str = "cassandra";

/// Native transport port probed for readiness.
pub const NATIVE_PORT: u16 = 9042;

/// How long to wait for the daemon to accept connections.
const STARTUP_TIMEOUT: Duration = Duration::from_secs(60);

/// Interval between readiness probes.
const PROBE_INTERVAL: Duration = Duration::from_millis(500);

/// Launches the storage daemon as a child process and blocks until its native
/// transport port accepts connections.
///
/// The daemon is started at most once per instance and never stopped; tests
/// share it for the rest of the process lifetime.
pub struct EmbeddedDaemon {
    binary: PathBuf,
    port: u16,
    started: AtomicBool,
    child: Mutex<Option<Child>>,
}

impl EmbeddedDaemon {
    /// Daemon on the default port, using `GRAFTON_TEST_DAEMON_BIN` or the
    /// stock binary name.
    pub fn new() -> Self {
        Self::from_env(&SystemEnv)
    }

    pub fn from_env(env: &dyn EnvSource) -> Self {
        let binary = env
            .var(DAEMON_BIN_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BINARY));
        Self::with_binary(binary, NATIVE_PORT)
    }

    pub fn with_binary(binary: impl Into<PathBuf>, port: u16) -> Self {
        Self {
            binary: binary.into(),
            port,
            started: AtomicBool::new(false),
            child: Mutex::new(None),
        }
    }

    /// Block until the native transport port accepts a TCP connection.
    fn wait_for_ready(&self) -> Result<()> {
        let addr = SocketAddr::from(([127, 0, 0, 1], self.port));
        let start = Instant::now();

        loop {
            if TcpStream::connect_timeout(&addr, PROBE_INTERVAL).is_ok() {
                debug!(
                    "daemon ready on port {} after {:?}",
                    self.port,
                    start.elapsed()
                );
                return Ok(());
            }

            if start.elapsed() > STARTUP_TIMEOUT {
                return Err(SetupError::StartTimeout {
                    port: self.port,
                    timeout: STARTUP_TIMEOUT,
                });
            }

            sleep(PROBE_INTERVAL);
        }
    }
}

impl Default for EmbeddedDaemon {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageDaemon for EmbeddedDaemon {
    fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    fn start(&self, config_file: &Path) -> Result<()> {
        // The child handle lock also serializes concurrent starts: the loser
        // blocks here, then observes the started flag and returns.
        let mut child = self.child.lock().expect("daemon child lock poisoned");
        if self.started.load(Ordering::SeqCst) {
            debug!("daemon already started, skipping");
            return Ok(());
        }

        info!(
            "starting daemon {} with config {}",
            self.binary.display(),
            config_file.display()
        );
        let spawned = Command::new(&self.binary)
            .arg("-f")
            .arg("--config")
            .arg(config_file)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| SetupError::SpawnFailed {
                binary: self.binary.clone(),
                source,
            })?;
        *child = Some(spawned);

        self.wait_for_ready()?;
        self.started.store(true, Ordering::SeqCst);
        Ok(())
    }
}
