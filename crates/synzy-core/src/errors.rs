//! Cross-cutting error types for synzy.
//!
//! Domain-specific errors (`StoreError`, `ShortlistError`, ...) live in their
//! respective crates. The binary converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any synzy crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A JSON value that should describe an entity is not an object.
    #[error("Invalid entity: expected a JSON object, got {0}")]
    InvalidEntity(String),

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        from: String,
        to: String,
    },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
