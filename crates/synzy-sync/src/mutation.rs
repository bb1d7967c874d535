//! Optimistic mutation guard.
//!
//! A [`Mutation`] applies a change to shared state immediately, remembers
//! the state it replaced, and later either commits or restores it exactly.
//! Dropping a guard that is still pending restores the snapshot, so a
//! cancelled future or an unwinding panic never leaves an unconfirmed
//! optimistic change behind.

use parking_lot::Mutex;
use synzy_core::MutationState;

/// Callback invoked with the new value after every visible change.
pub type Notify<'a, T> = &'a (dyn Fn(&T) + Send + Sync);

#[must_use = "dropping a pending mutation rolls it back"]
pub struct Mutation<'a, T: Clone> {
    target: &'a Mutex<T>,
    notify: Notify<'a, T>,
    snapshot: Option<T>,
    state: MutationState,
    label: &'static str,
}

impl<'a, T: Clone> Mutation<'a, T> {
    /// Snapshot `target`, apply `change` to it and notify.
    ///
    /// The lock is released before `notify` runs.
    pub fn begin(
        label: &'static str,
        target: &'a Mutex<T>,
        notify: Notify<'a, T>,
        change: impl FnOnce(&mut T),
    ) -> Self {
        let mut mutation = Self {
            target,
            notify,
            snapshot: None,
            state: MutationState::Idle,
            label,
        };
        let applied = {
            let mut guard = target.lock();
            mutation.snapshot = Some(guard.clone());
            change(&mut guard);
            guard.clone()
        };
        mutation.transition(MutationState::Pending);
        (mutation.notify)(&applied);
        mutation
    }

    #[must_use]
    pub const fn state(&self) -> MutationState {
        self.state
    }

    /// Keep the optimistic change.
    pub fn commit(mut self) {
        self.transition(MutationState::Committed);
        self.snapshot = None;
        tracing::trace!(mutation = self.label, "committed");
    }

    /// Restore the snapshot taken by [`Self::begin`] and notify.
    pub fn roll_back(mut self) {
        self.restore();
    }

    /// Finish without touching `target`, for when the state was reset
    /// underneath the mutation and the snapshot no longer applies.
    pub fn discard(mut self) {
        self.transition(MutationState::RolledBack);
        self.snapshot = None;
        tracing::debug!(mutation = self.label, "discarded; state was reset meanwhile");
    }

    fn restore(&mut self) {
        self.transition(MutationState::RolledBack);
        if let Some(snapshot) = self.snapshot.take() {
            *self.target.lock() = snapshot.clone();
            (self.notify)(&snapshot);
            tracing::debug!(mutation = self.label, "rolled back");
        }
    }

    fn transition(&mut self, next: MutationState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid mutation transition {} -> {next}",
            self.state
        );
        self.state = next;
    }
}

impl<T: Clone> Drop for Mutation<'_, T> {
    fn drop(&mut self) {
        if self.state == MutationState::Pending {
            tracing::warn!(mutation = self.label, "pending mutation abandoned; rolling back");
            self.restore();
        }
    }
}
