//! In-process dashboard slot.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::StorageError;
use crate::domain::ports::{DASHBOARD_SLOT_KEY, DashboardStoragePort};

/// Slot that lives only as long as the process. Used for `--ephemeral` runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    contents: Arc<RwLock<Option<String>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStorage {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-filled with `contents`.
    #[must_use]
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Arc::new(RwLock::new(Some(contents.into()))),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns the current blob.
    pub async fn contents(&self) -> Option<String> {
        self.contents.read().await.clone()
    }

    /// Returns how many times the slot was written.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DashboardStoragePort for MemoryStorage {
    fn location(&self) -> String {
        format!("memory:{DASHBOARD_SLOT_KEY}")
    }

    async fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.contents.read().await.clone())
    }

    async fn save(&self, contents: &str) -> Result<(), StorageError> {
        *self.contents.write().await = Some(contents.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip() {
        let storage = MemoryStorage::new();
        assert!(storage.load().await.unwrap().is_none());

        storage.save("blob").await.unwrap();

        assert_eq!(storage.contents().await.as_deref(), Some("blob"));
        assert_eq!(storage.write_count(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_the_slot() {
        let storage = MemoryStorage::with_contents("a");
        let handle = storage.clone();

        handle.save("b").await.unwrap();

        assert_eq!(storage.load().await.unwrap().as_deref(), Some("b"));
    }
}
