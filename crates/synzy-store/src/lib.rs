//! # synzy-store
//!
//! Durable client-side key-value storage.
//!
//! The synchronizers and the session store persist through the
//! [`KeyValueStore`] trait: string keys, string values, no transactions and
//! no size limit. Two backends are provided:
//! - [`MemoryStore`]: process-local, for tests and ephemeral hosts
//! - [`FileStore`]: a single JSON object on disk, rewritten atomically on
//!   every mutation

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// String key-value storage shared by every view of the application.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Absent keys are `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Backend-specific I/O failures.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Backend-specific I/O failures.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Backend-specific I/O failures.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// All keys currently stored, in ascending order.
    ///
    /// # Errors
    ///
    /// Backend-specific I/O failures.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}
