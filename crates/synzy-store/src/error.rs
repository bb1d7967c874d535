use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage file {path} is not a JSON object of strings: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
