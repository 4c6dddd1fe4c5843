//! Options specific to the CQL storage backend.

use crate::options::ConfigKey;

/// Backend identifier stored under [`options::STORAGE_BACKEND`](crate::options::STORAGE_BACKEND).
pub const BACKEND_NAME: &str = "cql";

/// Longest keyspace name the backend accepts.
pub const MAX_KEYSPACE_NAME_LENGTH: usize = 48;

/// Keyspace the adapter stores the graph in.
pub const KEYSPACE: ConfigKey<String> = ConfigKey::new("storage.cql.keyspace");

/// Native protocol version the driver uses instead of negotiating.
pub const PROTOCOL_VERSION: ConfigKey<u32> = ConfigKey::new("storage.cql.protocol-version");

/// Whether the driver connects over TLS.
pub const SSL_ENABLED: ConfigKey<bool> = ConfigKey::new("storage.cql.ssl.enabled");

/// Truststore file the driver verifies the server certificate against.
pub const SSL_TRUSTSTORE_LOCATION: ConfigKey<String> =
    ConfigKey::new("storage.cql.ssl.truststore.location");

/// Password protecting the truststore.
pub const SSL_TRUSTSTORE_PASSWORD: ConfigKey<String> =
    ConfigKey::new("storage.cql.ssl.truststore.password");
