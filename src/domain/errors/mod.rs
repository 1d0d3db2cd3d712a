//! Domain error types.

mod dashboard_error;
mod storage_error;

pub use dashboard_error::{DashboardError, ValidationError};
pub use storage_error::StorageError;
