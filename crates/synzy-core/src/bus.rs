//! Typed publish/subscribe channel.
//!
//! Views that render the same state (header badge, list page, compare page)
//! register a handler on a shared [`EventBus`] handed to them by reference.
//! Handlers run synchronously on the publishing thread, in registration
//! order. The handler list is snapshotted before dispatch, so a handler may
//! subscribe or unsubscribe without deadlocking; such changes apply from the
//! next publish.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

pub struct EventBus<E> {
    next_id: AtomicU64,
    handlers: Mutex<Vec<(SubscriberId, Handler<E>)>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            handlers: Mutex::new(Vec::new()),
        }
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.handlers.lock().len())
            .finish()
    }
}

impl<E> EventBus<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.lock().push((id, Arc::new(handler)));
        id
    }

    /// Returns `false` if the id was not (or no longer) subscribed.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut handlers = self.handlers.lock();
        let before = handlers.len();
        handlers.retain(|(sid, _)| *sid != id);
        handlers.len() != before
    }

    /// Deliver `event` to every current subscriber. Returns how many
    /// handlers ran.
    pub fn publish(&self, event: &E) -> usize {
        let snapshot: Vec<Handler<E>> = self
            .handlers
            .lock()
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();
        for handler in &snapshot {
            handler(event);
        }
        snapshot.len()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.handlers.lock().len()
    }
}
