//! Widget command error types.

use thiserror::Error;

use super::StorageError;
use crate::domain::entities::{CategoryId, WidgetId};

/// Required-field failures for widget forms and commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ValidationError {
    #[error("Category is required!")]
    MissingCategory,

    #[error("Widget Name is required!")]
    MissingName,

    #[error("Widget Text is required!")]
    MissingText,

    #[error("nothing to update: provide a name or text")]
    EmptyUpdate,
}

/// Errors reported by widget use cases.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    #[error("widget {widget} not found in category {category}")]
    WidgetNotFound {
        category: CategoryId,
        widget: WidgetId,
    },

    #[error("dashboard storage error: {0}")]
    Storage(#[from] StorageError),
}

impl DashboardError {
    /// Returns whether the error is a lookup miss.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CategoryNotFound(_) | Self::WidgetNotFound { .. }
        )
    }
}
