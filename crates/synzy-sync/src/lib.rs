//! # synzy-sync
//!
//! Client-side synchronizers for the signed-in user's lists:
//! - [`ShortlistSync`]: remote-backed shortlist with optimistic toggles and
//!   exact rollback
//! - [`ComparisonStore`]: durable comparison list, written before every
//!   broadcast
//! - [`SessionCoordinator`]: re-fetches or clears both when the session
//!   changes

pub mod comparison;
pub mod coordinator;
pub mod error;
pub mod mutation;
pub mod service;
pub mod shortlist;

pub use comparison::{ComparisonEvent, ComparisonStore, parse_list, toggle_entry};
pub use coordinator::SessionCoordinator;
pub use error::{ComparisonError, RemoteError, ShortlistAction, ShortlistError};
pub use mutation::Mutation;
pub use service::ShortlistService;
pub use shortlist::{ShortlistChanged, ShortlistEntry, ShortlistSync, ToggleOutcome};
