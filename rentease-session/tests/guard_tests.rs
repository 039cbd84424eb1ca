//! Integration tests for the session query facade: the login/logout
//! scenarios page guards depend on, and role code handling.

mod support;

use std::sync::Arc;

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use rentease_session::{
    MemorySlot, SessionConfig, SessionQuery, SessionRecord, SessionSlot, SessionStore,
};
use serde_json::json;

// ── Login Scenarios ──

#[tokio::test]
async fn admin_session_grants_admin_access() {
    let (store, query, _slot, _key) = support::memory_query();

    assert!(store.save(support::admin_profile()).await);

    assert!(query.is_logged_in().await);
    assert!(query.is_admin().await);
    assert_eq!(query.role_code().await.as_deref(), Some("A"));
}

#[tokio::test]
async fn tenant_session_is_logged_in_but_not_admin() {
    let (store, query, _slot, _key) = support::memory_query();

    assert!(store.save(support::tenant_profile()).await);

    assert!(query.is_logged_in().await);
    assert!(!query.is_admin().await);

    let user = query.user().await.unwrap();
    assert_eq!(user.get("id"), Some(&json!("U2")));
}

#[tokio::test]
async fn no_session_means_logged_out() {
    let (_store, query, _slot, _key) = support::memory_query();

    assert!(!query.is_logged_in().await);
    assert!(!query.is_admin().await);
    assert!(query.user().await.is_none());
    assert!(query.role_code().await.is_none());
}

#[tokio::test]
async fn corrupted_session_means_logged_out() {
    use base64::{engine::general_purpose::STANDARD, Engine};

    let (store, query, slot, _key) = support::memory_query();
    assert!(store.save(support::admin_profile()).await);
    assert!(query.is_logged_in().await);

    // Overwrite the envelope payload with unrelated bytes
    let raw = slot.read().await.unwrap().unwrap();
    let mut envelope: serde_json::Value = serde_json::from_str(&raw).unwrap();
    envelope["data"] = json!(STANDARD.encode([0xA5; 64]));
    slot.write(&envelope.to_string()).await.unwrap();

    assert!(!query.is_logged_in().await);
    assert!(!query.is_admin().await);
    assert!(
        slot.read().await.unwrap().is_none(),
        "corrupt session should be discarded"
    );
}

// ── Session Lifecycle Through the Facade ──

#[tokio::test]
async fn logout_revokes_access() {
    let (store, query, _slot, _key) = support::memory_query();

    assert!(store.save(support::admin_profile()).await);
    assert!(query.is_admin().await);

    assert!(store.clear().await);

    assert!(!query.is_logged_in().await);
    assert!(!query.is_admin().await);
}

#[tokio::test]
async fn expired_session_means_logged_out() {
    let (_store, query, slot, key) = support::memory_query();

    let mut record = SessionRecord::new(support::admin_profile(), Duration::hours(24)).unwrap();
    record.created_at = Utc::now() - Duration::hours(26);
    record.expires_at = Utc::now() - Duration::hours(2);
    slot.write(&support::seal(&key, &record)).await.unwrap();

    assert!(!query.is_logged_in().await);
    assert!(!query.is_admin().await);
}

#[tokio::test]
async fn profile_updates_are_visible_through_the_facade() {
    let (store, query, _slot, _key) = support::memory_query();

    assert!(store.save(support::tenant_profile()).await);
    assert!(
        store
            .update(support::profile(json!({"displayName": "Bob Updated"})))
            .await
    );

    let user = query.user().await.unwrap();
    assert_eq!(user.get("displayName"), Some(&json!("Bob Updated")));
    assert_eq!(user.get("id"), Some(&json!("U2")));
}

#[tokio::test]
async fn user_returns_the_full_profile_verbatim() {
    let (store, query, _slot, _key) = support::memory_query();

    let full = support::profile(json!({
        "id": "U7",
        "roleCode": "N",
        "emailAddress": "carol@rentease.example",
        "lease": {"propertyId": 12, "roomNo": "3B"},
        "preferences": {"newsletter": false},
    }));
    assert!(store.save(full.clone()).await);

    assert_eq!(query.user().await.unwrap(), full);
}

// ── Role Code Handling ──

#[tokio::test]
async fn missing_role_code_is_not_admin() {
    let (store, query, _slot, _key) = support::memory_query();

    assert!(store.save(support::profile(json!({"id": "U3"}))).await);

    assert!(query.is_logged_in().await, "session itself is valid");
    assert!(!query.is_admin().await);
    assert!(query.role_code().await.is_none());
}

#[tokio::test]
async fn non_string_role_code_is_not_admin() {
    let (store, query, _slot, _key) = support::memory_query();

    assert!(
        store
            .save(support::profile(json!({"id": "U4", "roleCode": 1})))
            .await
    );

    assert!(query.is_logged_in().await);
    assert!(!query.is_admin().await);
}

#[tokio::test]
async fn role_code_comparison_is_exact() {
    let (store, query, _slot, _key) = support::memory_query();

    for code in ["a", " A", "A ", "AA", "N"] {
        assert!(
            store
                .save(support::profile(json!({"id": "U5", "roleCode": code})))
                .await
        );
        assert!(!query.is_admin().await, "{code:?} must not grant admin");
    }
}

#[tokio::test]
async fn custom_admin_role_code_is_respected() {
    support::init_tracing();
    let config = SessionConfig {
        admin_role_code: "MGR".to_string(),
        ..Default::default()
    };
    let store = Arc::new(
        SessionStore::with_config(
            Arc::new(MemorySlot::new()),
            rentease_crypto::SessionKey::generate(),
            config,
        )
        .unwrap(),
    );
    let query = SessionQuery::new(store.clone());

    assert!(
        store
            .save(support::profile(json!({"id": "U9", "roleCode": "MGR"})))
            .await
    );
    assert!(query.is_admin().await);

    // The default admin code is not special under a custom configuration
    assert!(
        store
            .save(support::profile(json!({"id": "U10", "roleCode": "A"})))
            .await
    );
    assert!(!query.is_admin().await);
}

// ── Storage Failure ──

#[tokio::test]
async fn storage_failure_means_logged_out() {
    support::init_tracing();
    let store = Arc::new(SessionStore::new(
        Arc::new(support::FailingSlot),
        rentease_crypto::SessionKey::generate(),
    ));
    let query = SessionQuery::new(store);

    assert!(!query.is_logged_in().await);
    assert!(!query.is_admin().await);
    assert!(query.user().await.is_none());
}
