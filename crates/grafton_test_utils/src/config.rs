//! Adapter configuration presets for tests.

use crate::env::{EnvSource, STORAGE_HOST_VAR};
use crate::error::Result;
use crate::keyspace::clean_keyspace_name;
use grafton_config::cql;
use grafton_config::options::{CONNECTION_TIMEOUT, PAGE_SIZE, STORAGE_BACKEND, STORAGE_HOSTS};
use grafton_config::StorageConfig;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Truststore used by the TLS test profile, relative to the working
/// directory.
const TRUSTSTORE_SEGMENTS: [&str; 5] = ["target", "cql-embedded", "ssl", "conf", "test.truststore"];

/// Password baked into the TLS test profile's truststore.
const TRUSTSTORE_PASSWORD: &str = "cassandra";

pub(crate) fn build_configuration(env: &dyn EnvSource, keyspace: &str) -> Result<StorageConfig> {
    let mut config = StorageConfig::new();

    let keyspace = clean_keyspace_name(keyspace)?;
    debug!("using keyspace {keyspace}");
    config.set(cql::KEYSPACE, keyspace);

    config.set(PAGE_SIZE, 500);
    config.set(CONNECTION_TIMEOUT, Duration::from_secs(60));
    config.set(STORAGE_BACKEND, cql::BACKEND_NAME.to_string());
    // Pinned rather than negotiated: the embedded server only speaks protocol
    // version 3, and letting the driver negotiate produces spurious errors.
    config.set(cql::PROTOCOL_VERSION, 3);

    if let Some(host) = env.var(STORAGE_HOST_VAR) {
        config.set(STORAGE_HOSTS, vec![host]);
    }

    Ok(config)
}

/// Switch a configuration to the TLS test profile.
///
/// Mutates in place and returns the same configuration: the host list is
/// forced to `localhost` and the truststore settings point at the fixture
/// truststore.
pub fn enable_ssl(config: &mut StorageConfig) -> &mut StorageConfig {
    config.set(cql::SSL_ENABLED, true);
    config.set(STORAGE_HOSTS, vec!["localhost".to_string()]);

    let truststore: PathBuf = TRUSTSTORE_SEGMENTS.iter().collect();
    config.set(
        cql::SSL_TRUSTSTORE_LOCATION,
        truststore.display().to_string(),
    );
    config.set(
        cql::SSL_TRUSTSTORE_PASSWORD,
        TRUSTSTORE_PASSWORD.to_string(),
    );

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;

    #[test]
    fn test_defaults() {
        let env = MapEnv::new();
        let config = build_configuration(&env, "graph_test").unwrap();

        assert_eq!(config.get(cql::KEYSPACE).as_deref(), Some("graph_test"));
        assert_eq!(config.get(PAGE_SIZE), Some(500));
        assert_eq!(
            config.get(CONNECTION_TIMEOUT),
            Some(Duration::from_secs(60))
        );
        assert_eq!(config.get(STORAGE_BACKEND).as_deref(), Some("cql"));
        assert_eq!(config.get(cql::PROTOCOL_VERSION), Some(3));
        assert!(!config.contains(STORAGE_HOSTS));
    }

    #[test]
    fn test_invalid_keyspace_falls_back() {
        let env = MapEnv::new();
        let config = build_configuration(&env, "bad name!").unwrap();

        let keyspace = config.get(cql::KEYSPACE).unwrap();
        assert!(keyspace.starts_with("strhash"));
        assert!(keyspace["strhash".len()..].bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn test_host_override() {
        let env = MapEnv::new().with_var(STORAGE_HOST_VAR, "10.1.2.3");
        let config = build_configuration(&env, "graph_test").unwrap();

        assert_eq!(
            config.get(STORAGE_HOSTS),
            Some(vec!["10.1.2.3".to_string()])
        );
    }

    #[test]
    fn test_enable_ssl_overwrites_hosts() {
        let env = MapEnv::new().with_var(STORAGE_HOST_VAR, "10.1.2.3");
        let mut config = build_configuration(&env, "graph_test").unwrap();
        enable_ssl(&mut config);

        assert_eq!(config.get(cql::SSL_ENABLED), Some(true));
        assert_eq!(
            config.get(STORAGE_HOSTS),
            Some(vec!["localhost".to_string()])
        );
        let truststore = config.get(cql::SSL_TRUSTSTORE_LOCATION).unwrap();
        assert!(truststore.ends_with("test.truststore"));
        assert!(!PathBuf::from(&truststore).is_absolute());
        assert_eq!(
            config.get(cql::SSL_TRUSTSTORE_PASSWORD).as_deref(),
            Some("cassandra")
        );
    }
}
