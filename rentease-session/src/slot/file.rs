//! File-backed slot.
//!
//! Persists the envelope as one JSON file named after the slot, mirroring
//! the one-key-one-value layout of browser storage. A missing file is an
//! empty slot, not an error.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::SessionSlot;
use crate::config::is_valid_slot_name;
use crate::error::{SessionError, SessionResult};

/// Slot persisted at `<dir>/<slot_name>.json`.
#[derive(Debug)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Creates a file slot under `dir`, creating the directory if needed.
    ///
    /// The slot name must be a plain file-name-safe identifier; anything
    /// with separators in it is rejected.
    pub fn new(dir: impl Into<PathBuf>, slot_name: &str) -> SessionResult<Self> {
        if !is_valid_slot_name(slot_name) {
            return Err(SessionError::Config(format!(
                "slot name {slot_name:?} must be non-empty and contain only [A-Za-z0-9_-]"
            )));
        }

        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            SessionError::StorageUnavailable(format!("cannot create slot directory: {e}"))
        })?;

        Ok(Self {
            path: dir.join(format!("{slot_name}.json")),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionSlot for FileSlot {
    async fn read(&self) -> SessionResult<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionError::StorageUnavailable(format!(
                "failed to read slot file: {e}"
            ))),
        }
    }

    async fn write(&self, value: &str) -> SessionResult<()> {
        tokio::fs::write(&self.path, value).await.map_err(|e| {
            SessionError::StorageUnavailable(format!("failed to write slot file: {e}"))
        })
    }

    async fn clear(&self) -> SessionResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::StorageUnavailable(format!(
                "failed to delete slot file: {e}"
            ))),
        }
    }
}
