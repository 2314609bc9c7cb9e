//! # Registry Configuration
//!
//! Selects which built-in providers a registry is composed with. Read from
//! YAML or from the environment:
//!
//! ```yaml
//! enabled: []            # empty: every built-in algorithm
//! disabled: [DES-CBC, DES-EDE3-CBC, SHA-1]
//! ```
//!
//! | Variable                  | Meaning                            |
//! |---------------------------|------------------------------------|
//! | `WCG_ENABLED_ALGORITHMS`  | comma-separated allow-list         |
//! | `WCG_DISABLED_ALGORITHMS` | comma-separated deny-list          |
//!
//! Names are matched case-insensitively. A name that matches no built-in
//! algorithm is rejected when the registry is composed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_ENABLED: &str = "WCG_ENABLED_ALGORITHMS";
pub const ENV_DISABLED: &str = "WCG_DISABLED_ALGORITHMS";

/// Errors raised while loading or applying configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration document is not valid YAML for `RegistryConfig`.
    #[error("invalid registry config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A listed name matches no built-in algorithm.
    #[error("unknown algorithm in registry config: {0}")]
    UnknownAlgorithm(String),
}

/// Which built-in algorithms to register.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Allow-list. Empty means every built-in algorithm.
    pub enabled: Vec<String>,
    /// Deny-list, applied after the allow-list.
    pub disabled: Vec<String>,
}

impl RegistryConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Read `WCG_ENABLED_ALGORITHMS` and `WCG_DISABLED_ALGORITHMS`.
    /// Unset variables leave the corresponding list empty.
    pub fn from_env() -> Self {
        let list = |var: &str| {
            std::env::var(var)
                .map(|value| split_list(&value))
                .unwrap_or_default()
        };
        Self {
            enabled: list(ENV_ENABLED),
            disabled: list(ENV_DISABLED),
        }
    }

    /// Whether an algorithm passes both lists.
    pub fn permits(&self, name: &str) -> bool {
        let listed = |list: &[String]| list.iter().any(|n| n.eq_ignore_ascii_case(name));
        (self.enabled.is_empty() || listed(&self.enabled)) && !listed(&self.disabled)
    }

    /// Every listed name must be one of `known`.
    pub fn validate(&self, known: &[&str]) -> Result<(), ConfigError> {
        self.enabled
            .iter()
            .chain(&self.disabled)
            .find(|name| !known.iter().any(|k| k.eq_ignore_ascii_case(name)))
            .map_or(Ok(()), |name| Err(ConfigError::UnknownAlgorithm(name.clone())))
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_config_permits_everything() {
        let config = RegistryConfig::default();
        assert!(config.permits("AES-GCM"));
        assert!(config.permits("anything"));
    }

    #[test]
    fn allow_and_deny_lists() {
        let config = RegistryConfig::from_yaml_str(
            "enabled: [AES-GCM, hmac, SHA-1]\ndisabled: [sha-1]\n",
        )
        .unwrap();
        assert!(config.permits("aes-gcm"));
        assert!(config.permits("HMAC"));
        assert!(!config.permits("SHA-1"));
        assert!(!config.permits("AES-CBC"));
    }

    #[test]
    fn unknown_yaml_field_is_rejected() {
        let err = RegistryConfig::from_yaml_str("enable: [AES-GCM]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn validate_reports_unknown_name() {
        let config = RegistryConfig {
            enabled: vec![],
            disabled: vec!["ROT13".into()],
        };
        let err = config.validate(&["AES-GCM", "HMAC"]).unwrap_err();
        assert_eq!(err.to_string(), "unknown algorithm in registry config: ROT13");
        assert!(RegistryConfig::default().validate(&["HMAC"]).is_ok());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "disabled:\n  - DES-CBC").unwrap();
        let config = RegistryConfig::from_path(file.path()).unwrap();
        assert_eq!(config.disabled, vec!["DES-CBC".to_string()]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = RegistryConfig::from_path("/nonexistent/wcg.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn env_lists_are_comma_separated() {
        std::env::set_var(ENV_ENABLED, "AES-GCM, HMAC ,,");
        std::env::remove_var(ENV_DISABLED);
        let config = RegistryConfig::from_env();
        assert_eq!(config.enabled, vec!["AES-GCM".to_string(), "HMAC".to_string()]);
        assert!(config.disabled.is_empty());
        std::env::remove_var(ENV_ENABLED);
    }
}
