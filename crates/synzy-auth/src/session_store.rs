use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};
use synzy_core::{EventBus, Session, SubscriberId, UserRecord};
use synzy_store::KeyValueStore;

use crate::error::AuthError;
use crate::keys;

/// Session lifecycle notifications.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SignedIn(Session),
    Updated(Session),
    SignedOut,
}

impl SessionEvent {
    /// The session after the change, `None` once signed out.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::SignedIn(s) | Self::Updated(s) => Some(s),
            Self::SignedOut => None,
        }
    }
}

/// Owner of the current [`Session`].
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    current: RwLock<Option<Session>>,
    events: EventBus<SessionEvent>,
}

impl SessionStore {
    /// Build the store from whatever durable storage holds.
    ///
    /// Placeholder values (`""`, `"undefined"`, `"null"`) count as absent.
    /// A user record that does not parse is removed from storage so it
    /// cannot poison the next start either.
    pub fn restore(storage: Arc<dyn KeyValueStore>) -> Self {
        let raw_user = read_key(storage.as_ref(), keys::USER_DATA);
        let user = raw_user.as_deref().and_then(|raw| {
            match serde_json::from_str::<UserRecord>(raw) {
                Ok(user) => Some(user),
                Err(error) => {
                    tracing::warn!(%error, "discarding corrupted persisted user record");
                    if let Err(error) = storage.remove(keys::USER_DATA) {
                        tracing::warn!(%error, "failed to remove corrupted user record");
                    }
                    None
                }
            }
        });
        let token = read_key(storage.as_ref(), keys::AUTH_TOKEN);

        let session = user.map(|user| Session::new(user, token.unwrap_or_default()));
        if let Some(s) = &session {
            tracing::debug!(user_type = %s.user_type(), "restored persisted session");
        }

        Self {
            storage,
            current: RwLock::new(session),
            events: EventBus::new(),
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.current.read().clone()
    }

    /// A token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .as_ref()
            .is_some_and(|s| !s.token().is_empty())
    }

    #[must_use]
    pub const fn events(&self) -> &EventBus<SessionEvent> {
        &self.events
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriberId
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Install a freshly issued session and persist it.
    ///
    /// Non-institutional accounts also drop the last-created-institution
    /// marker so another account's college cannot leak into this one.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Store`] if persisting fails; the in-memory
    /// session is left unchanged in that case.
    pub fn sign_in(&self, session: Session) -> Result<(), AuthError> {
        self.persist(&session)?;
        if !session.user_type().is_institutional()
            && let Err(error) = self.storage.remove(keys::LAST_CREATED_COLLEGE_ID)
        {
            tracing::warn!(%error, "failed to clear last created institution");
        }

        *self.current.write() = Some(session.clone());
        tracing::info!(user_type = %session.user_type(), "session started");
        self.events.publish(&SessionEvent::SignedIn(session));
        Ok(())
    }

    /// Merge profile fields into the current user record and persist.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotAuthenticated`] without a session
    /// - [`AuthError::InvalidSession`] if the patch produces an invalid record
    /// - [`AuthError::Store`] if persisting fails
    pub fn update_profile(&self, patch: Map<String, Value>) -> Result<Session, AuthError> {
        let mut updated = self.current().ok_or(AuthError::NotAuthenticated)?;
        updated.merge_profile(patch)?;
        self.persist(&updated)?;

        *self.current.write() = Some(updated.clone());
        tracing::debug!("session profile hydrated");
        self.events.publish(&SessionEvent::Updated(updated.clone()));
        Ok(updated)
    }

    /// Drop the session and every session-scoped storage key.
    ///
    /// The in-memory session is cleared before any storage work, and
    /// storage failures are logged rather than returned: signing out always
    /// succeeds from the caller's point of view.
    pub fn sign_out(&self) {
        self.current.write().take();

        let mut doomed: Vec<String> = keys::SESSION_SCOPED.iter().map(ToString::to_string).collect();
        match self.storage.keys() {
            Ok(all) => {
                let extra: Vec<String> = all
                    .into_iter()
                    .filter(|k| keys::is_session_scoped(k) && !doomed.contains(k))
                    .collect();
                doomed.extend(extra);
            }
            Err(error) => tracing::warn!(%error, "failed to enumerate storage keys on sign-out"),
        }
        for key in &doomed {
            if let Err(error) = self.storage.remove(key) {
                tracing::warn!(key, %error, "failed to remove session key");
            }
        }

        tracing::info!(cleared_keys = doomed.len(), "session ended");
        self.events.publish(&SessionEvent::SignedOut);
    }

    fn persist(&self, session: &Session) -> Result<(), AuthError> {
        let user = serde_json::to_string(&session.user)?;
        self.storage.set(keys::USER_DATA, &user)?;
        self.storage.set(keys::AUTH_TOKEN, session.token())?;
        Ok(())
    }
}

fn read_key(storage: &dyn KeyValueStore, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value.filter(|v| !is_placeholder(v)),
        Err(error) => {
            tracing::warn!(key, %error, "failed to read persisted session key");
            None
        }
    }
}

fn is_placeholder(value: &str) -> bool {
    matches!(value.trim(), "" | "undefined" | "null")
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use synzy_core::UserType;
    use synzy_store::MemoryStore;

    fn student() -> Session {
        let user: UserRecord =
            serde_json::from_value(json!({ "_id": "u1", "authId": "a1", "userType": "student" }))
                .expect("user");
        Session::new(user, "jwt-1".into())
    }

    fn storage_with(entries: &[(&str, &str)]) -> Arc<MemoryStore> {
        Arc::new(MemoryStore::with_entries(entries.iter().copied()))
    }

    #[test]
    fn restore_reads_user_and_token() {
        let storage = storage_with(&[
            ("userData", r#"{"_id":"u1","authId":"a1","userType":"parent"}"#),
            ("authToken", "jwt-1"),
        ]);
        let store = SessionStore::restore(storage);
        let session = store.current().expect("session");
        assert_eq!(session.user_type(), UserType::Parent);
        assert_eq!(session.token(), "jwt-1");
        assert!(store.is_authenticated());
    }

    #[test]
    fn restore_treats_placeholders_as_absent() {
        let storage = storage_with(&[("userData", "undefined"), ("authToken", "null")]);
        let store = SessionStore::restore(storage);
        assert!(store.current().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn restore_removes_corrupted_user_record() {
        let storage = storage_with(&[("userData", "{not json"), ("authToken", "jwt")]);
        let store = SessionStore::restore(storage.clone());
        assert!(store.current().is_none());
        assert_eq!(storage.get("userData").unwrap(), None);
        assert_eq!(storage.get("authToken").unwrap().as_deref(), Some("jwt"));
    }

    #[test]
    fn restore_keeps_unrecognised_account_kind() {
        let storage = storage_with(&[
            ("userData", r#"{"_id":"u1","userType":"school"}"#),
            ("authToken", "jwt"),
        ]);
        let store = SessionStore::restore(storage.clone());
        assert_eq!(store.current().expect("session").user_type(), UserType::College);

        let storage = storage_with(&[("userData", r#"{"_id":"u2","userType":"counsellor"}"#)]);
        let store = SessionStore::restore(storage.clone());
        assert_eq!(store.current().expect("session").user_type(), UserType::Other);
        assert!(storage.get("userData").unwrap().is_some());
    }

    #[test]
    fn user_without_token_is_not_authenticated() {
        let storage = storage_with(&[("userData", r#"{"_id":"u1"}"#)]);
        let store = SessionStore::restore(storage);
        assert!(store.current().is_some());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn sign_in_persists_and_publishes() {
        let storage = storage_with(&[("lastCreatedcollegeId", "c9")]);
        let store = SessionStore::restore(storage.clone());
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        store.subscribe(move |e| sink.lock().push(e.clone()));

        store.sign_in(student()).expect("sign in");

        assert_eq!(storage.get("authToken").unwrap().as_deref(), Some("jwt-1"));
        assert!(storage.get("userData").unwrap().is_some());
        assert_eq!(storage.get("lastCreatedcollegeId").unwrap(), None);
        assert_eq!(*events.lock(), vec![SessionEvent::SignedIn(student())]);
    }

    #[test]
    fn college_sign_in_keeps_last_created_marker() {
        let storage = storage_with(&[("lastCreatedcollegeId", "c9")]);
        let store = SessionStore::restore(storage.clone());
        let mut college = student();
        college.user.user_type = UserType::College;

        store.sign_in(college).expect("sign in");
        assert_eq!(storage.get("lastCreatedcollegeId").unwrap().as_deref(), Some("c9"));
    }

    #[test]
    fn update_profile_requires_session() {
        let store = SessionStore::restore(Arc::new(MemoryStore::new()));
        let err = store.update_profile(Map::new()).unwrap_err();
        assert!(matches!(err, AuthError::NotAuthenticated));
    }

    #[test]
    fn update_profile_merges_and_persists() {
        let storage = Arc::new(MemoryStore::new());
        let store = SessionStore::restore(storage.clone());
        store.sign_in(student()).expect("sign in");

        let patch = json!({ "studentId": "s1", "email": "x@example.com" });
        let updated = store
            .update_profile(patch.as_object().cloned().expect("object"))
            .expect("update");
        assert_eq!(updated.user.profile.get("studentId"), Some(&json!("s1")));

        let restored = SessionStore::restore(storage).current().expect("session");
        assert_eq!(restored, updated);
    }

    #[test]
    fn sign_out_wipes_session_scoped_keys_only() {
        let storage = storage_with(&[
            ("comparisonList", "[]"),
            ("collegeName:abc", "North"),
            ("collegeInfo:abc", "{}"),
            ("rememberMe", "true"),
        ]);
        let store = SessionStore::restore(storage.clone());
        store.sign_in(student()).expect("sign in");
        let signed_out = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&signed_out);
        store.subscribe(move |e| {
            if matches!(e, SessionEvent::SignedOut) {
                *flag.lock() = true;
            }
        });

        store.sign_out();

        assert!(store.current().is_none());
        assert!(*signed_out.lock());
        assert_eq!(storage.keys().unwrap(), vec!["rememberMe".to_string()]);
    }
}
