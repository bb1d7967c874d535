use synzy_core::CoreError;
use synzy_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated; sign in first")]
    NotAuthenticated,

    #[error("session store error: {0}")]
    Store(#[from] StoreError),

    #[error("invalid session data: {0}")]
    InvalidSession(#[from] CoreError),

    #[error("session serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
