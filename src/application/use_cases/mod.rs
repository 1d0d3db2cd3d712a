//! Use case implementations.

mod widget_use_cases;

pub use widget_use_cases::{AddWidgetUseCase, EditWidgetUseCase, RemoveWidgetUseCase};
