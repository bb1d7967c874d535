use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use synzy_auth::SessionStore;
use synzy_core::{Session, UserRecord, UserType};
use synzy_store::{FileStore, KeyValueStore};

fn parent_session() -> Session {
    let user: UserRecord =
        serde_json::from_value(json!({ "_id": "u7", "userType": "parent", "email": "p@example.com" }))
            .expect("user record");
    Session::new(user, "jwt-7".into())
}

#[test]
fn session_survives_restart_and_sign_out_sticks() {
    let dir = tempfile::TempDir::new().expect("tmp dir");
    let path = dir.path().join("storage.json");

    {
        let storage = Arc::new(FileStore::open(&path).expect("open"));
        storage.set("collegeName:x1", "North").expect("set");
        let sessions = SessionStore::restore(storage);
        sessions.sign_in(parent_session()).expect("sign in");
    }

    let storage = Arc::new(FileStore::open(&path).expect("reopen"));
    let sessions = SessionStore::restore(storage.clone());
    let restored = sessions.current().expect("session");
    assert_eq!(restored.user_type(), UserType::Parent);
    assert_eq!(restored.canonical_id(), Some("u7"));

    sessions.sign_out();
    drop(sessions);

    let reopened = FileStore::open(&path).expect("reopen");
    assert!(reopened.keys().expect("keys").is_empty());
    assert!(SessionStore::restore(Arc::new(reopened)).current().is_none());
}
