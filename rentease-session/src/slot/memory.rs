//! In-memory slot backend.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::SessionSlot;
use crate::error::SessionResult;

/// In-process slot, lost when the process exits.
///
/// Cloning yields a handle to the same cell, so a test can hand one clone
/// to a store and inspect the other directly.
#[derive(Clone, Debug, Default)]
pub struct MemorySlot {
    value: Arc<RwLock<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionSlot for MemorySlot {
    async fn read(&self) -> SessionResult<Option<String>> {
        Ok(self.value.read().await.clone())
    }

    async fn write(&self, value: &str) -> SessionResult<()> {
        *self.value.write().await = Some(value.to_string());
        Ok(())
    }

    async fn clear(&self) -> SessionResult<()> {
        *self.value.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_slot_reads_as_none() {
        let slot = MemorySlot::new();
        assert_eq!(slot.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn write_then_read_returns_value() {
        let slot = MemorySlot::new();
        slot.write("envelope-json").await.unwrap();
        assert_eq!(slot.read().await.unwrap().as_deref(), Some("envelope-json"));
    }

    #[tokio::test]
    async fn write_replaces_wholesale() {
        let slot = MemorySlot::new();
        slot.write("first").await.unwrap();
        slot.write("second").await.unwrap();
        assert_eq!(slot.read().await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let slot = MemorySlot::new();
        slot.write("value").await.unwrap();

        slot.clear().await.unwrap();
        assert_eq!(slot.read().await.unwrap(), None);

        // Clearing again is fine
        slot.clear().await.unwrap();
    }

    #[tokio::test]
    async fn clones_share_the_cell() {
        let slot = MemorySlot::new();
        let handle = slot.clone();

        slot.write("shared").await.unwrap();
        assert_eq!(handle.read().await.unwrap().as_deref(), Some("shared"));

        handle.clear().await.unwrap();
        assert_eq!(slot.read().await.unwrap(), None);
    }
}
