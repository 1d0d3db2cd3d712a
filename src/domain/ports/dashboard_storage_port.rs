//! Durable slot port definition.

use async_trait::async_trait;

use crate::domain::errors::StorageError;

/// Fixed key of the durable slot holding the serialized dashboard.
pub const DASHBOARD_SLOT_KEY: &str = "dashboardData";

/// Port for the key-value slot that survives session restarts.
///
/// The slot holds one serialized blob. Reads happen at startup; every write
/// replaces the previous value wholesale.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardStoragePort: Send + Sync {
    /// Human-readable slot location, for logs.
    fn location(&self) -> String;

    /// Reads the stored blob, `None` if the slot was never written.
    async fn load(&self) -> Result<Option<String>, StorageError>;

    /// Overwrites the slot with `contents`.
    async fn save(&self, contents: &str) -> Result<(), StorageError>;
}
