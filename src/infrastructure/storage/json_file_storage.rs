//! File-backed dashboard slot.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::errors::StorageError;
use crate::domain::ports::{DASHBOARD_SLOT_KEY, DashboardStoragePort};

/// Stores the dashboard blob as `<dir>/dashboardData.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Creates storage for the slot file inside `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{DASHBOARD_SLOT_KEY}.json")),
        }
    }

    /// Returns the slot file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomically(path: &Path, contents: &[u8]) -> std::io::Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| std::io::Error::other("slot path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(contents)?;
        temp_file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[async_trait]
impl DashboardStoragePort for JsonFileStorage {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => {
                debug!(path = %self.path.display(), bytes = contents.len(), "Read dashboard slot");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Dashboard slot is empty");
                Ok(None)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read dashboard slot");
                Err(StorageError::read(self.location(), e.to_string()))
            }
        }
    }

    async fn save(&self, contents: &str) -> Result<(), StorageError> {
        let path = self.path.clone();
        let bytes = contents.as_bytes().to_vec();

        tokio::task::spawn_blocking(move || Self::write_atomically(&path, &bytes))
            .await
            .map_err(|e| StorageError::write(self.location(), e.to_string()))?
            .map_err(|e| {
                warn!(path = %self.path.display(), error = %e, "Failed to write dashboard slot");
                StorageError::write(self.location(), e.to_string())
            })?;

        debug!(path = %self.path.display(), bytes = contents.len(), "Dashboard slot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_slot_loads_as_none() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::in_dir(dir.path());

        assert!(storage.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::in_dir(dir.path());

        storage.save(r#"{"categories":[]}"#).await.unwrap();

        assert_eq!(
            storage.load().await.unwrap().as_deref(),
            Some(r#"{"categories":[]}"#)
        );
        assert!(storage.path().ends_with("dashboardData.json"));
    }

    #[tokio::test]
    async fn test_save_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = JsonFileStorage::in_dir(&nested);

        storage.save("{}").await.unwrap();

        assert!(nested.join("dashboardData.json").exists());
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_value() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::in_dir(dir.path());

        storage.save("first").await.unwrap();
        storage.save("second").await.unwrap();

        assert_eq!(storage.load().await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_unreadable_slot_is_an_error() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::in_dir(dir.path());
        std::fs::create_dir_all(storage.path()).unwrap();

        let result = storage.load().await;

        assert!(matches!(result, Err(StorageError::ReadFailed { .. })));
    }
}
