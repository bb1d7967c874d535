use std::sync::Arc;

use synzy_auth::{SessionEvent, SessionStore};
use synzy_core::{Session, SubscriberId};
use tokio::runtime::Handle;

use crate::comparison::ComparisonStore;
use crate::shortlist::ShortlistSync;

/// Cascades session changes into the per-user synchronizers.
pub struct SessionCoordinator {
    shortlist: ShortlistSync,
    comparison: Arc<ComparisonStore>,
}

impl SessionCoordinator {
    pub const fn new(shortlist: ShortlistSync, comparison: Arc<ComparisonStore>) -> Self {
        Self {
            shortlist,
            comparison,
        }
    }

    /// Bring dependents in line with `session`.
    ///
    /// Signing out clears both lists before this returns; a session
    /// refreshes the shortlist from the remote service.
    pub async fn apply(&self, session: Option<&Session>) {
        match session {
            Some(session) => self.shortlist.refresh(Some(session)).await,
            None => self.clear_dependents(),
        }
    }

    fn clear_dependents(&self) {
        self.shortlist.clear();
        if let Err(error) = self.comparison.clear() {
            tracing::warn!(%error, "failed to clear comparison list on sign-out");
        }
    }

    /// Follow `sessions` from now on. Clearing happens on the publishing
    /// thread; refreshes are spawned onto `runtime`, with their epoch taken
    /// before the spawn so a sign-out published in between discards them.
    pub fn attach(self: &Arc<Self>, sessions: &SessionStore, runtime: Handle) -> SubscriberId {
        let this = Arc::clone(self);
        sessions.subscribe(move |event: &SessionEvent| match event.session() {
            None => this.clear_dependents(),
            Some(session) => {
                let epoch = this.shortlist.begin_refresh();
                let shortlist = this.shortlist.clone();
                let session = session.clone();
                runtime.spawn(async move { shortlist.refresh_at(epoch, Some(&session)).await });
            }
        })
    }
}
