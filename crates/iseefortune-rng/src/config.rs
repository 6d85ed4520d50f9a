//! Configuration

use crate::{error::VerifyError, input::Range};
use std::{env, path::PathBuf};

/// Environment variable holding the output range
pub const RANGE_ENV: &str = "ISEEFORTUNE_RANGE";

/// Environment variable holding the vector file path
pub const VECTORS_ENV: &str = "ISEEFORTUNE_VECTORS";

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "ISEEFORTUNE_LOG";

/// Vector file used when nothing else is configured
pub const DEFAULT_VECTORS_PATH: &str = "vectors/vectors.json";

/// Log filter used when nothing else is configured
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Front-end configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Range as configured, validated only when used so a bad value surfaces
    /// as [`VerifyError::InvalidRange`] in the normal order
    pub range: Option<String>,
    /// Test-vector file
    pub vectors_path: PathBuf,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            range: None,
            vectors_path: PathBuf::from(DEFAULT_VECTORS_PATH),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            range: get(RANGE_ENV),
            vectors_path: get(VECTORS_ENV).map(PathBuf::from).unwrap_or(defaults.vectors_path),
            log_filter: get(LOG_ENV).unwrap_or(defaults.log_filter),
        }
    }

    /// Validated range, defaulting to 10
    pub fn range(&self) -> Result<Range, VerifyError> {
        self.range.as_deref().map_or_else(|| Ok(Range::default()), Range::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, Config::default());
        assert_eq!(config.range().unwrap(), Range::default());
        assert_eq!(config.vectors_path, PathBuf::from("vectors/vectors.json"));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (RANGE_ENV, "7"),
            (VECTORS_ENV, "/tmp/v.json"),
            (LOG_ENV, "iseefortune=debug"),
        ]);
        assert_eq!(config.range().unwrap().get(), 7);
        assert_eq!(config.vectors_path, PathBuf::from("/tmp/v.json"));
        assert_eq!(config.log_filter, "iseefortune=debug");
    }

    #[test]
    fn test_blank_values_ignored() {
        let config = config_from(&[(RANGE_ENV, "  "), (LOG_ENV, "")]);
        assert_eq!(config.range, None);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_bad_range_surfaces_on_use() {
        let config = config_from(&[(RANGE_ENV, "0")]);
        assert_eq!(config.range().unwrap_err().kind(), "InvalidRange");
    }
}
