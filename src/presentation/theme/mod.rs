pub mod palette;
pub mod service;

pub use palette::CategoryPalette;
pub use service::Theme;
