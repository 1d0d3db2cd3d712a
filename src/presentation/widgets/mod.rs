mod content_editor;
mod footer_bar;
mod header_bar;
mod input;
mod widget_card;

pub use content_editor::ContentEditor;
pub use footer_bar::{FocusContext, FooterBar, FooterBarStyle};
pub use header_bar::{HeaderBar, HeaderBarStyle, ViewTab};
pub use input::TextInput;
pub use widget_card::WidgetCard;
