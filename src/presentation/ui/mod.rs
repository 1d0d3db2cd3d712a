//! UI screens.

mod app;
mod dashboard_view;
mod notification_popup;
mod search_view;
mod utils;
mod widget_form;

pub use app::App;
pub use dashboard_view::{DashboardScreen, DashboardView};
pub use notification_popup::NotificationPopup;
pub use search_view::{SearchScreen, SearchView};
pub use utils::{centered_rect, widget_count_label};
pub use widget_form::{FormAction, FormField, FormMode, FormSubmission, WidgetForm};
