//! Dashboard state container.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::entities::{
    Category, CategoryId, DashboardState, Unchanged, Widget, WidgetDraft, WidgetEntry, WidgetId,
    WidgetPatch,
};
use crate::domain::errors::StorageError;
use crate::domain::ports::DashboardStoragePort;
use crate::domain::search::SearchTerm;
use crate::domain::services::WidgetIdGenerator;

/// Result of a mutation. Misses leave the state untouched and write nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The mutation was committed; carries the affected widget.
    Applied(WidgetId),
    /// No category matched.
    CategoryNotFound,
    /// The category has no such widget.
    WidgetNotFound,
}

impl MutationOutcome {
    /// Returns whether the state changed.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

impl From<Unchanged> for MutationOutcome {
    fn from(value: Unchanged) -> Self {
        match value {
            Unchanged::UnknownCategory => Self::CategoryNotFound,
            Unchanged::UnknownWidget => Self::WidgetNotFound,
        }
    }
}

/// Sole owner and mutator of the dashboard tree.
///
/// Every applied mutation swaps in a new snapshot, notifies subscribers and
/// then overwrites the durable slot before returning. A slot holding JSON
/// that is not a dashboard is never overwritten.
pub struct DashboardStore {
    state: Arc<DashboardState>,
    storage: Arc<dyn DashboardStoragePort>,
    ids: WidgetIdGenerator,
    observers: watch::Sender<Arc<DashboardState>>,
    slot_locked: bool,
}

impl DashboardStore {
    /// Hydrates the store from the slot, falling back to the seed dataset.
    pub async fn open(storage: Arc<dyn DashboardStoragePort>) -> Self {
        Self::open_with(storage, WidgetIdGenerator::new()).await
    }

    /// Hydrates the store with a custom ID generator.
    pub async fn open_with(storage: Arc<dyn DashboardStoragePort>, ids: WidgetIdGenerator) -> Self {
        let hydrated = hydrate(storage.as_ref()).await;
        let slot_locked = matches!(hydrated, Hydrated::Unrecognized);
        let state = Arc::new(hydrated.into_state());
        let (observers, _) = watch::channel(Arc::clone(&state));

        Self {
            state,
            storage,
            ids,
            observers,
            slot_locked,
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<DashboardState> {
        Arc::clone(&self.state)
    }

    /// Subscribes to snapshots committed from now on.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardState>> {
        self.observers.subscribe()
    }

    /// Describes where the dashboard is persisted.
    #[must_use]
    pub fn location(&self) -> String {
        self.storage.location()
    }

    /// Returns categories in display order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        self.state.categories()
    }

    /// Finds a category by ID.
    #[must_use]
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.state.category(id)
    }

    /// Returns the widget count across all categories.
    #[must_use]
    pub fn total_widgets(&self) -> usize {
        self.state.total_widgets()
    }

    /// Returns every widget annotated with its category.
    #[must_use]
    pub fn all_widgets(&self) -> Vec<WidgetEntry> {
        self.state.entries()
    }

    /// Returns widgets whose name or text contains `search_term`, ignoring case.
    #[must_use]
    pub fn filtered_widgets(&self, search_term: &str) -> Vec<WidgetEntry> {
        SearchTerm::new(search_term).filter(self.all_widgets())
    }

    /// Appends a widget to the category. ID and creation time are generated here.
    ///
    /// # Errors
    /// Returns error if the new snapshot cannot be persisted. The in-memory
    /// state has already moved on when that happens.
    pub async fn add_widget(
        &mut self,
        category_id: &CategoryId,
        draft: WidgetDraft,
    ) -> Result<MutationOutcome, StorageError> {
        if self.state.category(category_id).is_none() {
            debug!(category = %category_id, "Add ignored, unknown category");
            return Ok(MutationOutcome::CategoryNotFound);
        }

        let state = Arc::clone(&self.state);
        let id = self.ids.next_id(|candidate| state.contains_widget(candidate));
        let widget = Widget::new(id.clone(), draft.name, draft.text, Utc::now());

        match self.state.with_widget_added(category_id, widget) {
            Ok(next) => {
                info!(category = %category_id, widget = %id, "Widget added");
                self.commit(next).await?;
                Ok(MutationOutcome::Applied(id))
            }
            Err(miss) => Ok(miss.into()),
        }
    }

    /// Removes a widget. Unknown IDs are a no-op.
    ///
    /// # Errors
    /// Returns error if the new snapshot cannot be persisted.
    pub async fn remove_widget(
        &mut self,
        category_id: &CategoryId,
        widget_id: &WidgetId,
    ) -> Result<MutationOutcome, StorageError> {
        match self.state.without_widget(category_id, widget_id) {
            Ok(next) => {
                info!(category = %category_id, widget = %widget_id, "Widget removed");
                self.commit(next).await?;
                Ok(MutationOutcome::Applied(widget_id.clone()))
            }
            Err(miss) => {
                debug!(category = %category_id, widget = %widget_id, reason = %miss, "Remove ignored");
                Ok(miss.into())
            }
        }
    }

    /// Merges `patch` into a widget, keeping its ID and creation time.
    ///
    /// # Errors
    /// Returns error if the new snapshot cannot be persisted.
    pub async fn update_widget(
        &mut self,
        category_id: &CategoryId,
        widget_id: &WidgetId,
        patch: WidgetPatch,
    ) -> Result<MutationOutcome, StorageError> {
        match self.state.with_widget_updated(category_id, widget_id, &patch) {
            Ok(next) => {
                info!(category = %category_id, widget = %widget_id, "Widget updated");
                self.commit(next).await?;
                Ok(MutationOutcome::Applied(widget_id.clone()))
            }
            Err(miss) => {
                debug!(category = %category_id, widget = %widget_id, reason = %miss, "Update ignored");
                Ok(miss.into())
            }
        }
    }

    async fn commit(&mut self, next: DashboardState) -> Result<(), StorageError> {
        let next = Arc::new(next);
        self.state = Arc::clone(&next);
        self.observers.send_replace(Arc::clone(&next));

        if self.slot_locked {
            return Err(StorageError::Unrecognized {
                location: self.storage.location(),
            });
        }

        let blob = serde_json::to_string(next.as_ref())?;
        self.storage.save(&blob).await
    }
}

enum Hydrated {
    Stored(DashboardState),
    Seed,
    Unrecognized,
}

impl Hydrated {
    fn into_state(self) -> DashboardState {
        match self {
            Self::Stored(state) => state,
            Self::Seed | Self::Unrecognized => DashboardState::seed(),
        }
    }
}

async fn hydrate(storage: &dyn DashboardStoragePort) -> Hydrated {
    let location = storage.location();

    let blob = match storage.load().await {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            info!(slot = %location, "No stored dashboard, using seed data");
            return Hydrated::Seed;
        }
        Err(e) => {
            warn!(slot = %location, error = %e, "Failed to read stored dashboard, using seed data");
            return Hydrated::Seed;
        }
    };

    let value = match serde_json::from_str::<serde_json::Value>(&blob) {
        Ok(value) => value,
        Err(e) => {
            warn!(slot = %location, error = %e, "Stored dashboard is not valid JSON, using seed data");
            return Hydrated::Seed;
        }
    };

    match serde_json::from_value::<DashboardState>(value) {
        Ok(state) => {
            info!(
                slot = %location,
                categories = state.categories().len(),
                widgets = state.total_widgets(),
                "Dashboard restored"
            );
            Hydrated::Stored(state)
        }
        Err(e) => {
            warn!(
                slot = %location,
                error = %e,
                "Stored dashboard has an unrecognized shape, showing seed data and leaving the slot untouched"
            );
            Hydrated::Unrecognized
        }
    }
}
