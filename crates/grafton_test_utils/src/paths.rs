//! Filesystem layout for the embedded daemon.

use crate::env::{EnvSource, CONF_DIR_VAR, DATA_DIR_VAR};
use crate::error::{Result, SetupError};
use std::path::PathBuf;
use tracing::info;

/// Name of the daemon config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "cassandra.yaml";

/// Relative root under the working directory for synthesized defaults.
const DEFAULT_ROOT: [&str; 2] = ["target", "cql-embedded"];

/// Resolved filesystem locations for one embedded daemon instance.
///
/// `config_file` points at the yaml the daemon reads on start; `data_dir` is
/// the directory the daemon owns and the bootstrap wipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub config_file: PathBuf,
    pub data_dir: PathBuf,
}

pub(crate) fn resolve(env: &dyn EnvSource) -> Result<ResolvedPaths> {
    let conf_dir = resolve_directory(env, "conf", CONF_DIR_VAR, true)?;
    let data_dir = resolve_directory(env, "data", DATA_DIR_VAR, false)?;
    Ok(ResolvedPaths {
        config_file: conf_dir.join(CONFIG_FILE_NAME),
        data_dir,
    })
}

/// Read the directory override from `var`, or synthesize the default under
/// the working directory. The config directory must already exist (the yaml
/// lives there); the data directory may not, since it is wiped and recreated
/// by the daemon.
fn resolve_directory(
    env: &dyn EnvSource,
    name: &str,
    var: &str,
    must_exist_and_be_absolute: bool,
) -> Result<PathBuf> {
    let dir = match env.var(var) {
        Some(value) => {
            info!("loaded daemon {} directory {} from {}", name, value, var);
            PathBuf::from(value)
        }
        None => {
            let mut dir = std::env::current_dir().map_err(|e| {
                SetupError::Configuration(format!("cannot determine working directory: {e}"))
            })?;
            dir.extend(DEFAULT_ROOT);
            dir.push(name);
            info!("using default daemon {} directory {}", name, dir.display());
            dir
        }
    };

    if must_exist_and_be_absolute {
        if !dir.is_dir() {
            return Err(SetupError::Configuration(format!(
                "path {} must be a directory",
                dir.display()
            )));
        }
        if !dir.is_absolute() {
            return Err(SetupError::Configuration(format!(
                "path {} must be absolute",
                dir.display()
            )));
        }
    }

    Ok(dir)
}
