//! Storage slot abstraction.
//!
//! A slot is the single persistent cell an encrypted session lives in: the
//! analog of one well-known browser storage key. It holds at most one
//! string value (the serialized envelope) and is always written or deleted
//! wholesale, never partially.

mod file;
mod memory;

use async_trait::async_trait;

pub use file::FileSlot;
pub use memory::MemorySlot;

use crate::error::SessionResult;

/// A single-value storage cell.
///
/// Backends differ in persistence, not semantics:
/// - [`MemorySlot`] keeps the value in-process
/// - [`FileSlot`] keeps it in one JSON file named after the slot
#[async_trait]
pub trait SessionSlot: Send + Sync {
    /// Reads the current value, `None` if the slot is empty.
    async fn read(&self) -> SessionResult<Option<String>>;

    /// Replaces the slot content wholesale.
    async fn write(&self, value: &str) -> SessionResult<()>;

    /// Empties the slot. Clearing an already-empty slot is not an error.
    async fn clear(&self) -> SessionResult<()>;
}
