//! Page-guard predicates over the session store.

use std::sync::Arc;

use crate::record::UserProfile;
use crate::store::SessionStore;

/// Coarse-grained session queries for page guards and conditional UI.
///
/// Every answer comes from a fresh [`SessionStore::load`], so a guard
/// decision always reflects the current slot content — including sessions
/// that expired or were cleared since the last check. Envelope and cipher
/// details never reach callers: the answers are booleans and the verbatim
/// user profile.
#[derive(Clone)]
pub struct SessionQuery {
    store: Arc<SessionStore>,
}

impl SessionQuery {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Whether a valid (non-expired) session exists.
    pub async fn is_logged_in(&self) -> bool {
        self.store.load().await.is_some()
    }

    /// The current user profile, if logged in.
    pub async fn user(&self) -> Option<UserProfile> {
        self.store.load().await.map(|record| record.user)
    }

    /// The current user's role code, if logged in and the profile has one.
    pub async fn role_code(&self) -> Option<String> {
        self.user()
            .await
            .and_then(|user| user.role_code().map(str::to_string))
    }

    /// Whether the current user carries the admin role code.
    ///
    /// `false` whenever there is no session, the profile has no role code,
    /// or the code differs from the configured admin code.
    pub async fn is_admin(&self) -> bool {
        self.role_code()
            .await
            .is_some_and(|code| code == self.store.config().admin_role_code)
    }
}
