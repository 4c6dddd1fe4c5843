//! Keyspace naming rules for the CQL backend.

use crate::error::{Result, SetupError};
use grafton_config::cql::MAX_KEYSPACE_NAME_LENGTH;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Prefix for hash-derived fallback names.
const FALLBACK_PREFIX: &str = "strhash";

/// Enforce the backend's keyspace naming rules.
///
/// The backend only accepts keyspace names up to 48 characters drawn from
/// `[A-Za-z0-9_]`. A name that violates either rule is replaced with a
/// deterministic fallback: `strhash` followed by the first eight bytes of the
/// name's SHA-256 digest, read big-endian as a `u64` and rendered in decimal.
/// The hash is pinned so the same raw name maps to the same keyspace on every
/// run and platform.
pub fn clean_keyspace_name(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(SetupError::InvalidArgument(
            "keyspace name must not be empty".to_string(),
        ));
    }

    let valid = raw.len() <= MAX_KEYSPACE_NAME_LENGTH
        && raw.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');

    if valid {
        Ok(raw.to_string())
    } else {
        Ok(format!("{FALLBACK_PREFIX}{}", stable_hash(raw)))
    }
}

fn stable_hash(raw: &str) -> u64 {
    let digest = Sha256::digest(raw.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

/// Generate a keyspace name unique to one test, e.g. `graph_4ae0c3b2...`.
///
/// The result passes [`clean_keyspace_name`] unchanged as long as `prefix`
/// itself is a valid keyspace name of 15 characters or fewer.
pub fn unique_keyspace(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names_pass_through() {
        let at_limit = "x".repeat(48);
        for name in ["graph_test", "a", "A_1", at_limit.as_str()] {
            assert_eq!(clean_keyspace_name(name).unwrap(), name);
        }
    }

    #[test]
    fn test_too_long_name_falls_back() {
        let name = "x".repeat(49);
        let cleaned = clean_keyspace_name(&name).unwrap();
        assert!(cleaned.starts_with(FALLBACK_PREFIX));
        assert_ne!(cleaned, name);
    }

    #[test]
    fn test_disallowed_characters_fall_back() {
        for name in ["bad name!", "dash-es", "dot.ted", "ümlaut", "q;drop"] {
            let cleaned = clean_keyspace_name(name).unwrap();
            assert!(cleaned.starts_with(FALLBACK_PREFIX), "{name} -> {cleaned}");
            assert!(
                cleaned[FALLBACK_PREFIX.len()..]
                    .bytes()
                    .all(|b| b.is_ascii_digit()),
                "{cleaned} has a non-numeric suffix"
            );
        }
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let first = clean_keyspace_name("bad name!").unwrap();
        let second = clean_keyspace_name("bad name!").unwrap();
        assert_eq!(first, second);

        let other = clean_keyspace_name("bad name?").unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn test_fallback_respects_length_limit() {
        let name = "y".repeat(200);
        let cleaned = clean_keyspace_name(&name).unwrap();
        assert!(cleaned.len() <= MAX_KEYSPACE_NAME_LENGTH);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let err = clean_keyspace_name("").unwrap_err();
        assert!(matches!(err, SetupError::InvalidArgument(_)));
    }

    #[test]
    fn test_unique_keyspace_is_valid_and_unique() {
        let a = unique_keyspace("graph");
        let b = unique_keyspace("graph");
        assert_ne!(a, b);
        assert_eq!(clean_keyspace_name(&a).unwrap(), a);
    }
}
