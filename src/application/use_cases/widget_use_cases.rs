//! Widget management use cases.
//!
//! The store treats unknown IDs as silent no-ops; these use cases turn the
//! outcome into an explicit error so forms and the CLI can report it.

use tracing::{debug, warn};

use crate::application::dto::{AddWidgetRequest, EditWidgetRequest};
use crate::application::services::{DashboardStore, MutationOutcome};
use crate::domain::entities::{CategoryId, WidgetId};
use crate::domain::errors::DashboardError;

/// Validates an add-widget form and appends the widget.
pub struct AddWidgetUseCase<'a> {
    store: &'a mut DashboardStore,
}

impl<'a> AddWidgetUseCase<'a> {
    /// Creates new add use case.
    #[must_use]
    pub const fn new(store: &'a mut DashboardStore) -> Self {
        Self { store }
    }

    /// Executes the add.
    ///
    /// # Errors
    /// Returns error on missing fields, unknown category or storage failure.
    pub async fn execute(self, request: AddWidgetRequest) -> Result<WidgetId, DashboardError> {
        let (category_id, draft) = request.validate().inspect_err(|e| {
            debug!(error = %e, "Add widget request rejected");
        })?;

        let outcome = self.store.add_widget(&category_id, draft).await?;
        resolve(outcome, category_id, None)
    }
}

/// Validates an inline edit and applies it.
pub struct EditWidgetUseCase<'a> {
    store: &'a mut DashboardStore,
}

impl<'a> EditWidgetUseCase<'a> {
    /// Creates new edit use case.
    #[must_use]
    pub const fn new(store: &'a mut DashboardStore) -> Self {
        Self { store }
    }

    /// Executes the edit.
    ///
    /// # Errors
    /// Returns error on blank fields, unknown IDs or storage failure.
    pub async fn execute(self, request: EditWidgetRequest) -> Result<WidgetId, DashboardError> {
        let patch = request.validate()?;
        let EditWidgetRequest {
            category_id,
            widget_id,
            ..
        } = request;

        let outcome = self
            .store
            .update_widget(&category_id, &widget_id, patch)
            .await?;
        resolve(outcome, category_id, Some(widget_id))
    }
}

/// Removes a widget.
pub struct RemoveWidgetUseCase<'a> {
    store: &'a mut DashboardStore,
}

impl<'a> RemoveWidgetUseCase<'a> {
    /// Creates new remove use case.
    #[must_use]
    pub const fn new(store: &'a mut DashboardStore) -> Self {
        Self { store }
    }

    /// Executes the removal.
    ///
    /// # Errors
    /// Returns error on unknown IDs or storage failure.
    pub async fn execute(
        self,
        category_id: CategoryId,
        widget_id: WidgetId,
    ) -> Result<WidgetId, DashboardError> {
        let outcome = self.store.remove_widget(&category_id, &widget_id).await?;
        resolve(outcome, category_id, Some(widget_id))
    }
}

fn resolve(
    outcome: MutationOutcome,
    category: CategoryId,
    widget: Option<WidgetId>,
) -> Result<WidgetId, DashboardError> {
    match outcome {
        MutationOutcome::Applied(id) => Ok(id),
        MutationOutcome::CategoryNotFound => {
            warn!(category = %category, "Category not found");
            Err(DashboardError::CategoryNotFound(category))
        }
        MutationOutcome::WidgetNotFound => {
            let widget = widget.unwrap_or_else(|| WidgetId::new(""));
            warn!(category = %category, widget = %widget, "Widget not found");
            Err(DashboardError::WidgetNotFound { category, widget })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ValidationError;
    use crate::infrastructure::storage::MemoryStorage;
    use std::sync::Arc;

    async fn store() -> (DashboardStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        (DashboardStore::open(Arc::new(storage.clone())).await, storage)
    }

    #[tokio::test]
    async fn test_add_widget() {
        let (mut store, storage) = store().await;
        let request = AddWidgetRequest::new(Some("registry".into()), "Base Images", "12 scanned");

        let id = AddWidgetUseCase::new(&mut store).execute(request).await.unwrap();

        let last = store.all_widgets().pop().unwrap();
        assert_eq!(last.widget.id(), &id);
        assert_eq!(last.widget.text(), "12 scanned");
        assert_eq!(storage.write_count(), 1);
    }

    #[tokio::test]
    async fn test_add_widget_validation_reaches_no_store() {
        let (mut store, storage) = store().await;
        let request = AddWidgetRequest::new(Some("registry".into()), "", "12 scanned");

        let result = AddWidgetUseCase::new(&mut store).execute(request).await;

        assert!(matches!(
            result,
            Err(DashboardError::Validation(ValidationError::MissingName))
        ));
        assert_eq!(storage.write_count(), 0);
    }

    #[tokio::test]
    async fn test_add_widget_unknown_category() {
        let (mut store, _) = store().await;
        let request = AddWidgetRequest::new(Some("nope".into()), "a", "b");

        let result = AddWidgetUseCase::new(&mut store).execute(request).await;

        assert!(matches!(result, Err(DashboardError::CategoryNotFound(_))));
        assert_eq!(store.total_widgets(), 6);
    }

    #[tokio::test]
    async fn test_edit_widget() {
        let (mut store, _) = store().await;
        let request = EditWidgetRequest::new("cwpp".into(), "w4".into()).with_name("Workloads");

        EditWidgetUseCase::new(&mut store).execute(request).await.unwrap();

        assert_eq!(store.all_widgets()[3].widget.name(), "Workloads");
    }

    #[tokio::test]
    async fn test_remove_unknown_widget_is_reported() {
        let (mut store, _) = store().await;

        let result = RemoveWidgetUseCase::new(&mut store)
            .execute("cwpp".into(), "w1".into())
            .await;

        let err = result.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "widget w1 not found in category cwpp");
    }
}
