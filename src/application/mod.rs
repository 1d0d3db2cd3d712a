//! Application layer with the dashboard store, use cases and DTOs.

/// Data transfer objects.
pub mod dto;
/// Application services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{AddWidgetRequest, EditWidgetRequest};
pub use services::{DashboardStore, MutationOutcome, NotificationManager};
pub use use_cases::{AddWidgetUseCase, EditWidgetUseCase, RemoveWidgetUseCase};
