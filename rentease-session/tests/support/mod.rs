//! Shared test helpers for session integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use rentease_crypto::SessionKey;
use rentease_session::{
    MemorySlot, SessionError, SessionQuery, SessionRecord, SessionResult, SessionSlot,
    SessionStore, UserProfile,
};
use serde_json::{Value, json};

/// Installs a test subscriber so the store's `warn!` diagnostics show up
/// under `--nocapture`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A memory-backed store plus handles to its slot and key.
pub fn memory_store() -> (SessionStore, MemorySlot, SessionKey) {
    init_tracing();
    let slot = MemorySlot::new();
    let key = SessionKey::generate();
    let store = SessionStore::new(Arc::new(slot.clone()), key.clone());
    (store, slot, key)
}

/// A memory-backed store wrapped in its query facade.
pub fn memory_query() -> (Arc<SessionStore>, SessionQuery, MemorySlot, SessionKey) {
    let (store, slot, key) = memory_store();
    let store = Arc::new(store);
    let query = SessionQuery::new(store.clone());
    (store, query, slot, key)
}

/// Builds a profile from a JSON object literal.
pub fn profile(value: Value) -> UserProfile {
    UserProfile::from_value(value).expect("test profile must be a JSON object")
}

/// The admin profile used across scenarios.
pub fn admin_profile() -> UserProfile {
    profile(json!({
        "id": "U1",
        "displayName": "Alice Admin",
        "roleCode": "A",
        "emailAddress": "alice@rentease.example",
    }))
}

/// A tenant profile used across scenarios.
pub fn tenant_profile() -> UserProfile {
    profile(json!({
        "id": "U2",
        "displayName": "Bob Tenant",
        "roleCode": "N",
        "contactNumber": "555-0102",
    }))
}

/// Seals a record exactly as the store would, for planting prepared
/// sessions (e.g. already-expired ones) directly into a slot.
pub fn seal(key: &SessionKey, record: &SessionRecord) -> String {
    let plaintext = record.encode().expect("record must encode");
    let envelope = rentease_crypto::encrypt(key, &plaintext).expect("encryption must succeed");
    serde_json::to_string(&envelope).expect("envelope must serialize")
}

/// A slot whose every operation fails, standing in for disabled or broken
/// device storage.
pub struct FailingSlot;

#[async_trait]
impl SessionSlot for FailingSlot {
    async fn read(&self) -> SessionResult<Option<String>> {
        Err(SessionError::StorageUnavailable("slot offline".to_string()))
    }

    async fn write(&self, _value: &str) -> SessionResult<()> {
        Err(SessionError::StorageUnavailable("slot offline".to_string()))
    }

    async fn clear(&self) -> SessionResult<()> {
        Err(SessionError::StorageUnavailable("slot offline".to_string()))
    }
}
