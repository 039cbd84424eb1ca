//! Session persistence orchestration.
//!
//! `SessionStore` is the sole authority over its slot: it encrypts on the
//! way in, decrypts and checks expiry on the way out, and converts every
//! ordinary failure (missing, corrupt, expired, storage offline) into the
//! `false`/`None` sentinel its callers expect. Page code never sees a raw
//! storage or crypto error.
//!
//! The slot moves through a simple lifecycle: empty, then occupied after
//! `save`, then empty again after `clear` or after a load rejects the
//! content (expired or undecryptable). `update` rewrites the occupied slot
//! in place without touching the expiry.
//!
//! There is no plaintext cache. Every `load` re-reads and re-decrypts, so
//! an external change to the slot is always picked up, and expiry needs no
//! background timer — it is enforced at read time.

use std::sync::Arc;

use rentease_crypto::{EncryptedEnvelope, SessionKey, decrypt, encrypt};
use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::record::{SessionRecord, UserProfile};
use crate::slot::SessionSlot;

/// Encrypted session store: owner of one storage slot and the key
/// protecting it.
pub struct SessionStore {
    slot: Arc<dyn SessionSlot>,
    key: SessionKey,
    config: SessionConfig,
}

impl SessionStore {
    /// Creates a store with the default configuration.
    pub fn new(slot: Arc<dyn SessionSlot>, key: SessionKey) -> Self {
        Self {
            slot,
            key,
            config: SessionConfig::default(),
        }
    }

    /// Creates a store with an explicit configuration.
    ///
    /// An invalid configuration is a programming mistake, so this is the
    /// one place in the store that returns an error instead of a sentinel.
    pub fn with_config(
        slot: Arc<dyn SessionSlot>,
        key: SessionKey,
        config: SessionConfig,
    ) -> SessionResult<Self> {
        config.validate()?;
        Ok(Self { slot, key, config })
    }

    /// Returns the store's configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Establishes a session for `user`, valid for the configured TTL.
    ///
    /// Returns `false` on any failure (storage, encryption, or an expiry
    /// instant the configured TTL cannot produce), logging the cause. A
    /// `false` means no session was established.
    pub async fn save(&self, user: UserProfile) -> bool {
        match self.try_save(user).await {
            Ok(record) => {
                debug!(
                    "session saved in slot {} (expires {})",
                    self.config.slot_name, record.expires_at
                );
                true
            }
            Err(err) => {
                warn!("failed to save session: {err}");
                false
            }
        }
    }

    /// Loads the current session, or `None` if there is none.
    ///
    /// Expiry is checked here and only here — lazy expiry, no background
    /// timer. A corrupt, tampered, or expired envelope is discarded from
    /// the slot before returning `None`, so the next load starts clean.
    pub async fn load(&self) -> Option<SessionRecord> {
        match self.try_load().await {
            Ok(found) => found,
            Err(err @ SessionError::StorageUnavailable(_)) => {
                warn!("session load failed: {err}");
                None
            }
            Err(err) => {
                warn!("discarding stored session: {err}");
                self.discard().await;
                None
            }
        }
    }

    /// Deletes any stored session. Idempotent: clearing an empty slot
    /// still returns `true`.
    pub async fn clear(&self) -> bool {
        match self.slot.clear().await {
            Ok(()) => {
                debug!("session cleared from slot {}", self.config.slot_name);
                true
            }
            Err(err) => {
                warn!("failed to clear session: {err}");
                false
            }
        }
    }

    /// Shallow-merges `patch` into the stored user profile.
    ///
    /// The record keeps its original creation and expiry instants — an
    /// update never extends a session. Returns `false` when no session is
    /// active or the rewrite fails.
    pub async fn update(&self, patch: UserProfile) -> bool {
        let Some(mut record) = self.load().await else {
            debug!("session update skipped: no active session");
            return false;
        };

        record.user.merge(patch);
        match self.persist(&record).await {
            Ok(()) => {
                debug!(
                    "session user updated, expiry unchanged ({})",
                    record.expires_at
                );
                true
            }
            Err(err) => {
                warn!("failed to update session: {err}");
                false
            }
        }
    }

    async fn try_save(&self, user: UserProfile) -> SessionResult<SessionRecord> {
        let record = SessionRecord::new(user, self.config.ttl)?;
        self.persist(&record).await?;
        Ok(record)
    }

    async fn try_load(&self) -> SessionResult<Option<SessionRecord>> {
        let Some(raw) = self.slot.read().await? else {
            return Ok(None);
        };

        let envelope: EncryptedEnvelope = serde_json::from_str(&raw)
            .map_err(|e| SessionError::MalformedSession(format!("invalid envelope: {e}")))?;

        let plaintext = decrypt(&self.key, &envelope)
            .map_err(|e| SessionError::AuthenticationFailure(e.to_string()))?;

        let record = SessionRecord::decode(&plaintext)?;
        if record.is_expired() {
            return Err(SessionError::SessionExpired {
                expired_at: record.expires_at,
            });
        }

        Ok(Some(record))
    }

    /// Encode, encrypt, and write the slot in one wholesale replacement.
    async fn persist(&self, record: &SessionRecord) -> SessionResult<()> {
        let plaintext = record.encode()?;
        let envelope = encrypt(&self.key, &plaintext)?;
        let raw = serde_json::to_string(&envelope)?;
        self.slot.write(&raw).await
    }

    async fn discard(&self) {
        if let Err(err) = self.slot.clear().await {
            warn!("failed to clear rejected session: {err}");
        }
    }
}
