//! Widget search and result labels.

use crate::domain::entities::{Widget, WidgetEntry};

/// Case-insensitive substring filter over widget titles and content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchTerm {
    raw: String,
    needle: String,
}

impl SearchTerm {
    /// Creates a term from what the user typed.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    /// An empty term matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns whether the widget's name or text contains the term.
    #[must_use]
    pub fn matches(&self, widget: &Widget) -> bool {
        self.is_empty()
            || widget.name().to_lowercase().contains(&self.needle)
            || widget.text().to_lowercase().contains(&self.needle)
    }

    /// Keeps matching entries, preserving their order.
    #[must_use]
    pub fn filter(&self, entries: Vec<WidgetEntry>) -> Vec<WidgetEntry> {
        if self.is_empty() {
            return entries;
        }
        entries
            .into_iter()
            .filter(|entry| self.matches(&entry.widget))
            .collect()
    }
}

/// Formats a result count the way the search view and CLI report it.
#[must_use]
pub fn found_label(count: usize) -> String {
    format!("Found {count} widget{}", if count == 1 { "" } else { "s" })
}
