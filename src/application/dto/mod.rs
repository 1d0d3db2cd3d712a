//! Data transfer objects for the application layer.

mod widget_dto;

pub use widget_dto::{AddWidgetRequest, EditWidgetRequest};
