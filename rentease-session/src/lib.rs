//! Encrypted session persistence for RentEase clients.
//!
//! Keeps the authenticated user's session in a single storage slot,
//! encrypted with ChaCha20-Poly1305 via `rentease-crypto`, so the stored
//! blob is confidential and tamper-evident even when the backing storage
//! is readable by other software on the device.
//!
//! - [`SessionStore`] — save / load / clear / update with lazy expiry
//! - [`SessionQuery`] — logged-in / admin predicates for page guards
//! - [`SessionSlot`] backends — in-memory and single-file storage
//!
//! Ordinary failures (missing, expired, tampered, or unreadable sessions)
//! resolve to `None`/`false` at the public surface. The store logs the
//! cause and discards content it cannot trust; callers never handle
//! storage or crypto errors directly.

pub mod config;
pub mod error;
pub mod guard;
pub mod record;
pub mod slot;
pub mod store;

pub use config::{ADMIN_ROLE_CODE, DEFAULT_SLOT_NAME, SessionConfig};
pub use error::{SessionError, SessionResult};
pub use guard::SessionQuery;
pub use record::{ROLE_CODE_FIELD, SessionRecord, UserProfile};
pub use slot::{FileSlot, MemorySlot, SessionSlot};
pub use store::SessionStore;
