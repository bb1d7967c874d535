//! Comparison-list synchronizer.
//!
//! The list lives in durable key-value storage under a configurable key as
//! a JSON array of entity records. Every mutation writes the full list
//! first and only then broadcasts it, so a subscriber that re-reads storage
//! on notification always sees the value it was told about.

use std::sync::Arc;

use serde_json::Value;
use synzy_core::ids::{COLLEGE_ID, DOCUMENT_ID};
use synzy_core::{Entity, EntityId, EventBus, IdResolver, SubscriberId};
use synzy_store::KeyValueStore;

use crate::error::ComparisonError;

const RESOLVER: IdResolver = IdResolver::COMPARISON;

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonEvent {
    /// The list after a change.
    Updated(Vec<Entity>),
    /// Something changed; re-read storage.
    Invalidated,
}

pub struct ComparisonStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    events: EventBus<ComparisonEvent>,
}

impl ComparisonStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            events: EventBus::new(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current list. Missing, unreadable or malformed storage reads as
    /// empty.
    #[must_use]
    pub fn load(&self) -> Vec<Entity> {
        match self.storage.get(&self.key) {
            Ok(Some(raw)) => parse_list(&raw),
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "failed to read comparison list");
                Vec::new()
            }
        }
    }

    #[must_use]
    pub fn contains(&self, entity: &Entity) -> bool {
        self.load().iter().any(|e| RESOLVER.same_identity(e, entity))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.load().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove `entity` if listed, append it otherwise.
    ///
    /// An entity without identity leaves the list untouched and nothing is
    /// written or broadcast.
    ///
    /// # Errors
    ///
    /// Returns [`ComparisonError`] if the write fails. Subscribers are then
    /// sent whatever storage still holds.
    pub fn toggle(&self, entity: &Entity) -> Result<Vec<Entity>, ComparisonError> {
        let current = self.load();
        if RESOLVER.resolve(entity).is_none() {
            tracing::debug!("comparison toggle ignored: entity has no id");
            return Ok(current);
        }
        self.commit(toggle_entry(&current, entity))
    }

    /// Add `entity` unless already listed, storing it with `collegeId` set
    /// from its document id.
    ///
    /// # Errors
    ///
    /// Same as [`Self::toggle`].
    pub fn add(&self, entity: &Entity) -> Result<Vec<Entity>, ComparisonError> {
        let current = self.load();
        let Some(id) = entity
            .get(DOCUMENT_ID)
            .and_then(EntityId::from_value)
            .or_else(|| entity.get(COLLEGE_ID).and_then(EntityId::from_value))
        else {
            tracing::debug!("comparison add ignored: entity has no id");
            return Ok(current);
        };

        let exists = current.iter().any(|e| RESOLVER.resolve(e).as_ref() == Some(&id));
        let next = if exists {
            current
        } else {
            let mut next = current;
            next.push(entity.clone().with(COLLEGE_ID, id.as_str()));
            next
        };
        self.commit(next)
    }

    /// Empty the list.
    ///
    /// # Errors
    ///
    /// Same as [`Self::toggle`].
    pub fn clear(&self) -> Result<(), ComparisonError> {
        self.commit(Vec::new()).map(drop)
    }

    /// Publish `list` to every subscriber.
    pub fn broadcast(&self, list: Vec<Entity>) {
        let delivered = self.events.publish(&ComparisonEvent::Updated(list));
        tracing::trace!(delivered, "comparison list broadcast");
    }

    /// Tell subscribers to re-read storage.
    pub fn invalidate(&self) {
        self.events.publish(&ComparisonEvent::Invalidated);
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriberId
    where
        F: Fn(&ComparisonEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.events.unsubscribe(id)
    }

    /// The list an event describes; [`ComparisonEvent::Invalidated`] reads
    /// it from storage.
    #[must_use]
    pub fn resolve_event(&self, event: &ComparisonEvent) -> Vec<Entity> {
        match event {
            ComparisonEvent::Updated(list) => list.clone(),
            ComparisonEvent::Invalidated => self.load(),
        }
    }

    fn commit(&self, next: Vec<Entity>) -> Result<Vec<Entity>, ComparisonError> {
        if let Err(error) = self.write(&next) {
            tracing::warn!(key = %self.key, %error, "failed to write comparison list");
            self.broadcast(self.load());
            return Err(error);
        }
        tracing::debug!(count = next.len(), "comparison list updated");
        self.broadcast(next.clone());
        Ok(next)
    }

    fn write(&self, list: &[Entity]) -> Result<(), ComparisonError> {
        let body = serde_json::to_string(list)?;
        self.storage.set(&self.key, &body)?;
        Ok(())
    }
}

/// `list` with `entity` removed if an item shares its identity, appended
/// otherwise. An entity without identity returns `list` unchanged.
#[must_use]
pub fn toggle_entry(list: &[Entity], entity: &Entity) -> Vec<Entity> {
    if RESOLVER.resolve(entity).is_none() {
        return list.to_vec();
    }
    if list.iter().any(|e| RESOLVER.same_identity(e, entity)) {
        list.iter()
            .filter(|e| !RESOLVER.same_identity(e, entity))
            .cloned()
            .collect()
    } else {
        let mut next = list.to_vec();
        next.push(entity.clone());
        next
    }
}

/// Parse a stored list leniently: anything but a JSON array is empty and
/// non-object items are skipped.
#[must_use]
pub fn parse_list(raw: &str) -> Vec<Entity> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| Entity::from_value(item).ok())
            .collect(),
        Ok(_) => {
            tracing::debug!("stored comparison list is not an array; treating as empty");
            Vec::new()
        }
        Err(error) => {
            tracing::debug!(%error, "stored comparison list is not JSON; treating as empty");
            Vec::new()
        }
    }
}
