//! Namespaced configuration ids.
//!
//! Crop, pot and sprinkler definitions are addressed by keys of the form
//! `namespace:path` (e.g. `overgrow:tomato`). Overlay records store the key
//! of the definition they were placed from, so keys must be ordered, hashable
//! and round-trip through snapshots as plain strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Namespace applied when a key is written without one.
pub const DEFAULT_NAMESPACE: &str = "overgrow";

const MAX_NAMESPACE_LEN: usize = 64;
const MAX_PATH_LEN: usize = 128;

/// Error returned when parsing an invalid [`RegistryKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid registry key `{input}`: {reason}")]
pub struct RegistryKeyError {
    input: String,
    reason: &'static str,
}

impl RegistryKeyError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// A namespaced definition id of the form `namespace:path`.
///
/// Ordering is lexical by `(namespace, path)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegistryKey {
    namespace: String,
    path: String,
}

impl RegistryKey {
    /// Parse `namespace:path`, or a bare `path` in [`DEFAULT_NAMESPACE`].
    pub fn parse(input: &str) -> Result<Self, RegistryKeyError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(RegistryKeyError::new(input, "key is empty"));
        }

        let (namespace, path) = trimmed
            .split_once(':')
            .unwrap_or((DEFAULT_NAMESPACE, trimmed));

        if !is_valid_segment(namespace, MAX_NAMESPACE_LEN, false) {
            return Err(RegistryKeyError::new(
                input,
                "namespace must be 1-64 chars of a-z0-9_.-",
            ));
        }
        if !is_valid_segment(path, MAX_PATH_LEN, true) {
            return Err(RegistryKeyError::new(
                input,
                "path must be 1-128 chars of a-z0-9_./-",
            ));
        }

        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Key namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Key path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

fn is_valid_segment(segment: &str, max_len: usize, allow_slash: bool) -> bool {
    !segment.is_empty()
        && segment.len() <= max_len
        && segment.chars().all(|c| {
            matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.') || (allow_slash && c == '/')
        })
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for RegistryKey {
    type Err = RegistryKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RegistryKey {
    type Error = RegistryKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RegistryKey> for String {
    fn from(key: RegistryKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_namespaced_key() {
        let key = RegistryKey::parse("farmers:tomato").unwrap();
        assert_eq!(key.namespace(), "farmers");
        assert_eq!(key.path(), "tomato");
        assert_eq!(key.to_string(), "farmers:tomato");
    }

    #[test]
    fn bare_path_uses_default_namespace() {
        let key = RegistryKey::parse("tomato").unwrap();
        assert_eq!(key.to_string(), "overgrow:tomato");
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(RegistryKey::parse("").is_err());
        assert!(RegistryKey::parse("   ").is_err());
        assert!(RegistryKey::parse("overgrow:Tomato").is_err());
        assert!(RegistryKey::parse("overgrow:").is_err());
        assert!(RegistryKey::parse(":tomato").is_err());
        assert!(RegistryKey::parse("over/grow:tomato").is_err());
    }

    #[test]
    fn serde_uses_string_form() {
        let key = RegistryKey::parse("sprinklers/brass").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"overgrow:sprinklers/brass\"");
        let back: RegistryKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<RegistryKey>("\"Bad Key\"").is_err());
    }
}
