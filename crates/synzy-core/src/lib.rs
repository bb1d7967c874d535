//! # synzy-core
//!
//! Core types shared by every synzy crate:
//! - [`Entity`]: an upstream institution record with heterogeneous field naming
//! - [`EntityId`] and [`IdResolver`]: prioritized id-alias resolution
//! - [`Session`] and [`UserType`]: the authenticated user as persisted client-side
//! - [`MutationState`]: lifecycle of an optimistic mutation
//! - [`EventBus`]: typed publish/subscribe injected into every consuming view
//! - Cross-cutting error types

pub mod bus;
pub mod entity;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;

pub use bus::{EventBus, SubscriberId};
pub use entity::Entity;
pub use enums::{MutationState, UserType};
pub use errors::CoreError;
pub use identity::{Session, UserRecord};
pub use ids::{EntityId, IdResolver};
