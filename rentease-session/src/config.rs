//! Session store configuration.

use chrono::Duration;

use crate::error::{SessionError, SessionResult};

/// Storage slot name used by the deployed application.
pub const DEFAULT_SLOT_NAME: &str = "rentease_user_session";

/// Role code the backend assigns to administrators.
pub const ADMIN_ROLE_CODE: &str = "A";

/// Configuration for one session store instance.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Name of the storage slot holding the encrypted session.
    pub slot_name: String,
    /// How long a session stays valid after `save`.
    pub ttl: Duration,
    /// Role code that grants admin privileges.
    pub admin_role_code: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            slot_name: DEFAULT_SLOT_NAME.to_string(),
            ttl: Duration::hours(24),
            admin_role_code: ADMIN_ROLE_CODE.to_string(),
        }
    }
}

impl SessionConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> SessionResult<()> {
        if !is_valid_slot_name(&self.slot_name) {
            return Err(SessionError::Config(format!(
                "slot name {:?} must be non-empty and contain only [A-Za-z0-9_-]",
                self.slot_name
            )));
        }
        if self.ttl <= Duration::zero() {
            return Err(SessionError::Config(format!(
                "session ttl must be positive, got {}",
                self.ttl
            )));
        }
        if self.admin_role_code.is_empty() {
            return Err(SessionError::Config(
                "admin role code must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// A slot name doubles as a file name, so separators are out.
pub(crate) fn is_valid_slot_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
