//! Durable client storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Key the comparison list is persisted under.
pub const DEFAULT_COMPARISON_KEY: &str = "comparisonList";

fn default_comparison_key() -> String {
    DEFAULT_COMPARISON_KEY.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Path of the file-backed key-value store. Empty means
    /// `<data_dir>/synzy/storage.json`.
    #[serde(default)]
    pub path: String,

    /// Storage key for the comparison list.
    #[serde(default = "default_comparison_key")]
    pub comparison_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            comparison_key: default_comparison_key(),
        }
    }
}

impl StorageConfig {
    /// Resolve the storage file path, falling back to the platform data dir.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoDataDir`] when no path is configured and the
    /// platform has no data directory.
    pub fn resolved_path(&self) -> Result<PathBuf, ConfigError> {
        if !self.path.is_empty() {
            return Ok(PathBuf::from(&self.path));
        }
        dirs::data_dir()
            .map(|d| d.join("synzy").join("storage.json"))
            .ok_or_else(|| ConfigError::NoDataDir {
                field: "storage.path".into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_correct() {
        let config = StorageConfig::default();
        assert!(config.path.is_empty());
        assert_eq!(config.comparison_key, "comparisonList");
    }

    #[test]
    fn explicit_path_wins() {
        let config = StorageConfig {
            path: "/tmp/synzy-test.json".into(),
            ..StorageConfig::default()
        };
        assert_eq!(
            config.resolved_path().expect("path"),
            PathBuf::from("/tmp/synzy-test.json")
        );
    }
}
