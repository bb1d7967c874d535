//! Shortlist synchronizer.
//!
//! Holds the signed-in user's shortlist and keeps it in step with the
//! remote service. Toggles are applied optimistically and rolled back
//! exactly when the remote call fails.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use synzy_config::ShortlistConfig;
use synzy_core::ids::{COLLEGE_ID, DOCUMENT_ID};
use synzy_core::{Entity, EntityId, EventBus, IdResolver, Session, SubscriberId};

use crate::error::{RemoteError, ShortlistAction, ShortlistError};
use crate::mutation::Mutation;
use crate::service::ShortlistService;

const RESOLVER: IdResolver = IdResolver::SHORTLIST;

/// One shortlisted institution as returned by the remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortlistEntry {
    pub entity_id: Option<EntityId>,
    pub display_name: Option<String>,
    pub raw: Entity,
}

impl ShortlistEntry {
    #[must_use]
    pub fn from_entity(raw: Entity) -> Self {
        Self {
            entity_id: RESOLVER.resolve(&raw),
            display_name: raw.name().map(str::to_string),
            raw,
        }
    }
}

/// Published after every visible change to the list.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortlistChanged(pub Vec<ShortlistEntry>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added(EntityId),
    Removed(EntityId),
    /// The entity carried no usable id; nothing happened.
    Ignored,
}

/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct ShortlistSync {
    inner: Arc<Inner>,
}

struct Inner {
    service: Arc<dyn ShortlistService>,
    config: ShortlistConfig,
    entries: Mutex<Vec<ShortlistEntry>>,
    /// Bumped by every refresh and clear; results fetched under an older
    /// epoch are discarded.
    epoch: AtomicU64,
    events: EventBus<ShortlistChanged>,
}

impl ShortlistSync {
    pub fn new(service: Arc<dyn ShortlistService>, config: ShortlistConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                service,
                config,
                entries: Mutex::new(Vec::new()),
                epoch: AtomicU64::new(0),
                events: EventBus::new(),
            }),
        }
    }

    #[must_use]
    pub fn entries(&self) -> Vec<ShortlistEntry> {
        self.inner.entries.lock().clone()
    }

    /// Whether any alias of `entity` matches any alias of a stored entry.
    #[must_use]
    pub fn contains(&self, entity: &Entity) -> bool {
        self.inner
            .entries
            .lock()
            .iter()
            .any(|e| RESOLVER.matches_any(&e.raw, entity))
    }

    /// Entries carrying a document or institution id.
    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.inner
            .entries
            .lock()
            .iter()
            .filter(|e| e.raw.get_str(DOCUMENT_ID).is_some() || e.raw.get_str(COLLEGE_ID).is_some())
            .count()
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriberId
    where
        F: Fn(&ShortlistChanged) + Send + Sync + 'static,
    {
        self.inner.events.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.inner.events.unsubscribe(id)
    }

    /// Empty the list and invalidate any fetch still in flight.
    pub fn clear(&self) {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        self.inner.replace(Vec::new());
    }

    /// Replace the list with the remote copy for `session`.
    ///
    /// Institutional and admin sessions have no shortlist. Remote failures
    /// leave an empty list; a not-found answer simply means the user has no
    /// student profile yet.
    pub async fn refresh(&self, session: Option<&Session>) {
        let epoch = self.begin_refresh();
        self.refresh_at(epoch, session).await;
    }

    /// Claim a refresh epoch, superseding every fetch started before.
    ///
    /// Callers that hand the fetch to another task take the epoch first,
    /// on the thread that observed the session change, so a [`Self::clear`]
    /// issued afterwards still wins.
    #[must_use]
    pub fn begin_refresh(&self) -> u64 {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Second half of [`Self::refresh`]: fetch and install the list unless
    /// `epoch` has been superseded meanwhile.
    pub async fn refresh_at(&self, epoch: u64, session: Option<&Session>) {
        let Some(session) = session.filter(|s| !s.user_type().is_institutional()) else {
            self.inner.replace_if_current(epoch, Vec::new());
            return;
        };
        let Some(user_id) = session.canonical_id() else {
            tracing::warn!("session has no user identifier; shortlist left empty");
            self.inner.replace_if_current(epoch, Vec::new());
            return;
        };

        let entities = self.inner.fetch(user_id).await;
        self.inner.replace_if_current(epoch, entities);
    }

    /// Add `entity` if it is not shortlisted, remove it otherwise.
    ///
    /// # Errors
    ///
    /// - [`ShortlistError::AuthenticationRequired`] without a session
    /// - [`ShortlistError::IncompleteSession`] if the session has no user id
    /// - [`ShortlistError::Remote`] if the remote call failed; the list is
    ///   back to what it was before the call
    pub async fn toggle(
        &self,
        entity: &Entity,
        session: Option<&Session>,
    ) -> Result<ToggleOutcome, ShortlistError> {
        let session = session.ok_or(ShortlistError::AuthenticationRequired)?;
        let Some(entity_id) = RESOLVER.resolve(entity) else {
            tracing::debug!("toggle ignored: entity has no id");
            return Ok(ToggleOutcome::Ignored);
        };
        let user_id = session
            .canonical_id()
            .ok_or(ShortlistError::IncompleteSession)?
            .to_string();
        let name = entity.name().unwrap_or(entity_id.as_str()).to_string();

        let inner = self.inner.as_ref();
        let epoch = inner.epoch.load(Ordering::SeqCst);
        let notify = |list: &Vec<ShortlistEntry>| {
            inner.events.publish(&ShortlistChanged(list.clone()));
        };

        if self.contains(entity) {
            let mutation = Mutation::begin("shortlist-remove", &inner.entries, &notify, |list| {
                list.retain(|e| !RESOLVER.matches_any(&e.raw, entity));
            });
            match inner.service.remove_from_shortlist(&user_id, &entity_id).await {
                Ok(()) => {
                    mutation.commit();
                    tracing::info!(entity_id = %entity_id, "removed from shortlist");
                    Ok(ToggleOutcome::Removed(entity_id))
                }
                Err(source) => {
                    inner.settle_failed(mutation, epoch);
                    tracing::warn!(entity_id = %entity_id, error = %source, "shortlist remove failed");
                    Err(ShortlistError::Remote {
                        action: ShortlistAction::Remove,
                        name,
                        source,
                    })
                }
            }
        } else {
            let mutation = Mutation::begin("shortlist-add", &inner.entries, &notify, |list| {
                list.push(ShortlistEntry::from_entity(entity.clone()));
            });
            match inner.service.add_to_shortlist(&user_id, &entity_id).await {
                Ok(()) => {
                    mutation.commit();
                    tracing::info!(entity_id = %entity_id, "added to shortlist");
                    if inner.config.background_refresh {
                        self.spawn_refetch(user_id, epoch).await;
                    }
                    Ok(ToggleOutcome::Added(entity_id))
                }
                Err(source) => {
                    inner.settle_failed(mutation, epoch);
                    tracing::warn!(entity_id = %entity_id, error = %source, "shortlist add failed");
                    Err(ShortlistError::Remote {
                        action: ShortlistAction::Add,
                        name,
                        source,
                    })
                }
            }
        }
    }

    /// Pick up the server's shape of the list after an add. Runs detached
    /// on the ambient tokio runtime, inline when there is none.
    async fn spawn_refetch(&self, user_id: String, epoch: u64) {
        let inner = Arc::clone(&self.inner);
        let task = async move {
            match inner.service.get_shortlist(&user_id).await {
                Ok(entities) => inner.replace_if_current(epoch, entities),
                Err(error) => tracing::debug!(%error, "background shortlist refresh failed"),
            }
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(task);
            }
            Err(_) => task.await,
        }
    }
}

impl Inner {
    async fn fetch(&self, user_id: &str) -> Vec<Entity> {
        match self.service.get_shortlist(user_id).await {
            Ok(entities) => entities,
            Err(error) if self.is_not_found(&error) => {
                tracing::debug!(%error, "no shortlist for user");
                Vec::new()
            }
            Err(error) => {
                tracing::warn!(%error, "failed to fetch shortlist");
                Vec::new()
            }
        }
    }

    fn is_not_found(&self, error: &RemoteError) -> bool {
        error
            .message
            .as_deref()
            .is_some_and(|m| self.config.is_not_found_message(m))
    }

    fn replace(&self, entities: Vec<Entity>) {
        let list: Vec<ShortlistEntry> = entities.into_iter().map(ShortlistEntry::from_entity).collect();
        *self.entries.lock() = list.clone();
        self.events.publish(&ShortlistChanged(list));
    }

    fn replace_if_current(&self, epoch: u64, entities: Vec<Entity>) {
        if self.epoch.load(Ordering::SeqCst) == epoch {
            self.replace(entities);
        } else {
            tracing::debug!("discarding shortlist fetched under a stale session");
        }
    }

    fn settle_failed(&self, mutation: Mutation<'_, Vec<ShortlistEntry>>, epoch: u64) {
        if self.epoch.load(Ordering::SeqCst) == epoch {
            mutation.roll_back();
        } else {
            mutation.discard();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn entry_resolves_id_and_name() {
        let entry = ShortlistEntry::from_entity(Entity::new().with("_id", "c1").with("collegeName", "North"));
        assert_eq!(entry.entity_id.as_ref().map(EntityId::as_str), Some("c1"));
        assert_eq!(entry.display_name.as_deref(), Some("North"));
    }

    #[test]
    fn entry_without_id_is_kept() {
        let raw = Entity::from_value(json!({ "name": "Unnamed" })).expect("entity");
        let entry = ShortlistEntry::from_entity(raw);
        assert_eq!(entry.entity_id, None);
    }
}
