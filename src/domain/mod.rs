//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Keybinding definitions.
pub mod keybinding;
/// Toast notification definitions.
pub mod notification;
/// Port definitions.
pub mod ports;
/// Widget search matching.
pub mod search;
/// Domain services.
pub mod services;

pub use entities::{
    Category, CategoryId, DashboardState, Widget, WidgetDraft, WidgetEntry, WidgetId, WidgetPatch,
};
pub use errors::{DashboardError, StorageError, ValidationError};
pub use notification::{Notification, NotificationLevel};
pub use ports::{DASHBOARD_SLOT_KEY, DashboardStoragePort};
pub use search::SearchTerm;
pub use services::WidgetIdGenerator;
