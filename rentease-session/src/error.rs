//! Session error types.

use chrono::{DateTime, Utc};
use rentease_crypto::CryptoError;
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while persisting or restoring a session.
///
/// These flow through the internal load/persist pipeline and slot
/// implementations. None of them escape the store's public surface: the
/// store logs the cause and resolves to its `false`/`None` contract, so
/// page code never handles storage or crypto errors directly.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The storage backend could not be read or written.
    #[error("session storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The stored envelope failed authenticated decryption — tampered
    /// content or a different key.
    #[error("session authentication failed: {0}")]
    AuthenticationFailure(String),

    /// The slot content or decrypted payload is not a valid record.
    #[error("malformed session record: {0}")]
    MalformedSession(String),

    /// The stored session's expiry instant has passed.
    #[error("session expired at {expired_at}")]
    SessionExpired { expired_at: DateTime<Utc> },

    /// The store was constructed with an invalid configuration.
    #[error("invalid session configuration: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
