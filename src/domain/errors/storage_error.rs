//! Durable slot error types.

use thiserror::Error;

/// Persistence error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StorageError {
    #[error("failed to read dashboard slot at {location}: {message}")]
    ReadFailed { location: String, message: String },

    #[error("failed to write dashboard slot at {location}: {message}")]
    WriteFailed { location: String, message: String },

    #[error("failed to serialize dashboard: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("no data directory available for the dashboard slot")]
    LocationUnavailable,

    #[error("stored dashboard at {location} is not in a recognized format; leaving it untouched")]
    Unrecognized { location: String },
}

impl StorageError {
    /// Creates read failed error.
    #[must_use]
    pub fn read(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ReadFailed {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Creates write failed error.
    #[must_use]
    pub fn write(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::WriteFailed {
            location: location.into(),
            message: message.into(),
        }
    }
}
