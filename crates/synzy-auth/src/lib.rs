//! # synzy-auth
//!
//! The client-side Session Store.
//!
//! Holds the signed-in user and token, restores them from durable storage at
//! startup, merges profile hydration patches, and wipes every session-scoped
//! key on sign-out. Changes are published on an [`EventBus`] of
//! [`SessionEvent`]s so dependent state (shortlist, comparison list) can
//! follow. Logging in against a backend is the host's concern; this crate
//! receives an already-issued [`Session`].
//!
//! [`EventBus`]: synzy_core::EventBus
//! [`Session`]: synzy_core::Session

pub mod error;
pub mod keys;
pub mod session_store;

pub use error::AuthError;
pub use session_store::{SessionEvent, SessionStore};
