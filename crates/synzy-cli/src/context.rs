use std::sync::Arc;

use anyhow::Context;
use synzy_auth::SessionStore;
use synzy_config::SynzyConfig;
use synzy_store::FileStore;
use synzy_sync::ComparisonStore;

use crate::cli::GlobalFlags;

/// Everything a command handler needs, opened once per invocation.
pub struct AppContext {
    pub config: SynzyConfig,
    pub storage: Arc<FileStore>,
}

impl AppContext {
    pub fn init(config: SynzyConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let path = match &flags.storage {
            Some(path) => path.clone(),
            None => config.storage.resolved_path()?,
        };
        let storage = FileStore::open(&path)
            .with_context(|| format!("failed to open storage at {}", path.display()))?;
        tracing::debug!(path = %path.display(), "storage opened");

        Ok(Self {
            config,
            storage: Arc::new(storage),
        })
    }

    pub fn sessions(&self) -> SessionStore {
        SessionStore::restore(self.storage.clone())
    }

    pub fn comparison(&self) -> ComparisonStore {
        ComparisonStore::new(self.storage.clone(), self.config.storage.comparison_key.as_str())
    }
}
