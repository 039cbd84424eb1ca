//! Session record and codec.
//!
//! The record is what gets encrypted: the user profile exactly as the
//! backend returned it, plus the creation and expiry instants. The profile
//! is opaque to this crate — it is persisted and returned verbatim, and
//! only the query facade reads individual fields out of it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{SessionError, SessionResult};

/// Profile field holding the backend's role code.
pub const ROLE_CODE_FIELD: &str = "roleCode";

/// An opaque user profile, passed through from the login response verbatim.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(Map<String, Value>);

impl UserProfile {
    /// Creates an empty profile.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wraps a JSON value; `None` unless the value is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Returns a top-level field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Sets a top-level field, returning the previous value if any.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    /// Returns the backend role code, if the profile carries one as a string.
    pub fn role_code(&self) -> Option<&str> {
        self.get(ROLE_CODE_FIELD).and_then(Value::as_str)
    }

    /// Shallow-merges `patch` into this profile.
    ///
    /// Top-level fields from the patch overwrite existing ones and new
    /// fields are added; everything else stays untouched. Nested values
    /// are replaced wholesale, not merged.
    pub fn merge(&mut self, patch: UserProfile) {
        for (field, value) in patch.0 {
            self.0.insert(field, value);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for UserProfile {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A session as stored (encrypted) in the slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// The user profile, verbatim from login.
    pub user: UserProfile,
    /// When the session was established.
    pub created_at: DateTime<Utc>,
    /// When the session stops being valid: `created_at` plus the TTL
    /// configured at save time. Never moved by later updates.
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Creates a record valid from now until now + `ttl`.
    ///
    /// The `ttl` must be positive and the resulting expiry representable;
    /// anything else is rejected, so every record built here satisfies
    /// `expires_at > created_at`.
    pub fn new(user: UserProfile, ttl: Duration) -> SessionResult<Self> {
        let created_at = Utc::now();
        let Some(expires_at) = created_at.checked_add_signed(ttl) else {
            return Err(SessionError::Config(format!(
                "session ttl {ttl} overflows the expiry instant"
            )));
        };
        if expires_at <= created_at {
            return Err(SessionError::Config(format!(
                "session ttl must be positive, got {ttl}"
            )));
        }

        Ok(Self {
            user,
            created_at,
            expires_at,
        })
    }

    /// Whether the expiry instant has passed.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Serializes the record to the plaintext the cipher operates on.
    pub fn encode(&self) -> SessionResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Deserializes a record, rejecting structurally invalid input.
    ///
    /// A record whose expiry does not lie after its creation instant is
    /// rejected as well — callers never observe a half-valid record.
    pub fn decode(bytes: &[u8]) -> SessionResult<Self> {
        let record: SessionRecord = serde_json::from_slice(bytes)
            .map_err(|e| SessionError::MalformedSession(e.to_string()))?;

        if record.expires_at <= record.created_at {
            return Err(SessionError::MalformedSession(format!(
                "expiry {} does not lie after creation {}",
                record.expires_at, record.created_at
            )));
        }

        Ok(record)
    }
}
