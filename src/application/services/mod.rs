mod dashboard_store;
mod notification_manager;

pub use dashboard_store::{DashboardStore, MutationOutcome};
pub use notification_manager::NotificationManager;
