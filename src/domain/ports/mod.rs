mod dashboard_storage_port;

pub use dashboard_storage_port::{DASHBOARD_SLOT_KEY, DashboardStoragePort};
