//! Domain entity definitions.

mod category;
mod dashboard;
mod widget;

pub use category::{Category, CategoryId};
pub use dashboard::{DashboardState, SCHEMA_VERSION, Unchanged, WidgetEntry};
pub use widget::{Widget, WidgetDraft, WidgetId, WidgetPatch};
