//! # synzy-config
//!
//! Layered configuration loading for synzy using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SYNZY_*` prefix, `__` as separator)
//! 2. Project-level `.synzy/config.toml`
//! 3. User-level `~/.config/synzy/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SYNZY_STORAGE__PATH` -> `storage.path`,
//! `SYNZY_SHORTLIST__BACKGROUND_REFRESH` -> `shortlist.background_refresh`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use synzy_config::SynzyConfig;
//!
//! let config = SynzyConfig::load_with_dotenv().expect("config");
//! println!("comparison key: {}", config.storage.comparison_key);
//! ```

mod error;
mod geo;
mod shortlist;
mod storage;

pub use error::ConfigError;
pub use geo::GeoConfig;
pub use shortlist::ShortlistConfig;
pub use storage::{DEFAULT_COMPARISON_KEY, StorageConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SynzyConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub shortlist: ShortlistConfig,
    #[serde(default)]
    pub geo: GeoConfig,
}

impl SynzyConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".synzy/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SYNZY_").split("__"))
    }

    /// Reject values that would only fail later, far from their source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty comparison key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.comparison_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.comparison_key".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("synzy").join("config.toml"))
    }
}
