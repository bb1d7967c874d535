#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use synzy_core::{Entity, EntityId, Session, UserRecord};
use synzy_sync::{RemoteError, ShortlistService};
use tokio::sync::Notify;

/// In-memory stand-in for the remote shortlist endpoints.
#[derive(Default)]
pub struct MockService {
    pub remote: Mutex<Vec<Entity>>,
    pub get_error: Mutex<Option<RemoteError>>,
    pub add_error: Mutex<Option<RemoteError>>,
    pub remove_error: Mutex<Option<RemoteError>>,
    pub calls: Mutex<Vec<String>>,
    /// When set, every call waits for a permit before answering.
    pub gate: Option<Arc<Notify>>,
}

impl MockService {
    pub fn with_remote(entities: Vec<Entity>) -> Self {
        Self {
            remote: Mutex::new(entities),
            ..Self::default()
        }
    }

    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    async fn pass_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl ShortlistService for MockService {
    async fn get_shortlist(&self, user_id: &str) -> Result<Vec<Entity>, RemoteError> {
        self.calls.lock().push(format!("get {user_id}"));
        self.pass_gate().await;
        if let Some(err) = self.get_error.lock().clone() {
            return Err(err);
        }
        Ok(self.remote.lock().clone())
    }

    async fn add_to_shortlist(&self, user_id: &str, entity_id: &EntityId) -> Result<(), RemoteError> {
        self.calls.lock().push(format!("add {user_id} {entity_id}"));
        self.pass_gate().await;
        if let Some(err) = self.add_error.lock().clone() {
            return Err(err);
        }
        self.remote
            .lock()
            .push(college(entity_id.as_str(), "server copy"));
        Ok(())
    }

    async fn remove_from_shortlist(
        &self,
        user_id: &str,
        entity_id: &EntityId,
    ) -> Result<(), RemoteError> {
        self.calls.lock().push(format!("remove {user_id} {entity_id}"));
        self.pass_gate().await;
        if let Some(err) = self.remove_error.lock().clone() {
            return Err(err);
        }
        self.remote
            .lock()
            .retain(|e| e.get_str("_id") != Some(entity_id.as_str()));
        Ok(())
    }
}

pub fn college(id: &str, name: &str) -> Entity {
    Entity::new().with("_id", id).with("name", name)
}

pub fn session(user_type: &str) -> Session {
    let user: UserRecord =
        serde_json::from_value(json!({ "_id": "u1", "authId": "a1", "userType": user_type }))
            .expect("user record");
    Session::new(user, "jwt".into())
}
