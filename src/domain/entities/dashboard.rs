//! Dashboard state tree and its transitions.
//!
//! Every transition borrows the current tree and returns a new one, so a
//! snapshot handed to an observer never changes underneath it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::category::{Category, CategoryId};
use super::widget::{Widget, WidgetId, WidgetPatch};

/// Current persisted schema version.
pub const SCHEMA_VERSION: u32 = 1;

const fn default_version() -> u32 {
    SCHEMA_VERSION
}

/// Reason a transition left the tree untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unchanged {
    /// No category matched the requested ID.
    UnknownCategory,
    /// The category exists but holds no widget with the requested ID.
    UnknownWidget,
}

impl std::fmt::Display for Unchanged {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCategory => write!(f, "unknown category"),
            Self::UnknownWidget => write!(f, "unknown widget"),
        }
    }
}

/// A widget annotated with its owning category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetEntry {
    /// The widget itself.
    #[serde(flatten)]
    pub widget: Widget,
    /// Owning category ID.
    pub category_id: CategoryId,
    /// Owning category label.
    pub category_name: String,
    /// Owning category styling token.
    pub category_color: String,
}

impl WidgetEntry {
    fn new(category: &Category, widget: &Widget) -> Self {
        Self {
            widget: widget.clone(),
            category_id: category.id().clone(),
            category_name: category.name().to_string(),
            category_color: category.color().to_string(),
        }
    }
}

/// Full categories → widgets tree at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    #[serde(default = "default_version")]
    version: u32,
    categories: Vec<Category>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl DashboardState {
    /// Creates a tree from categories.
    #[must_use]
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            categories,
            extra: Map::new(),
        }
    }

    /// Builds the fixed seed dataset, stamped with the current time.
    #[must_use]
    pub fn seed() -> Self {
        Self::seed_at(Utc::now())
    }

    /// Builds the fixed seed dataset with the given creation time.
    #[must_use]
    pub fn seed_at(created_at: DateTime<Utc>) -> Self {
        let widget = |id: &str, name: &str, text: &str| Widget::new(id, name, text, created_at);

        Self::new(vec![
            Category::new("cspm", "CSPM Executive Dashboard", "from-blue-500 to-cyan-500")
                .with_widgets(vec![
                    widget("w1", "Cloud Accounts", "Total: 2 Connected (2)"),
                    widget(
                        "w2",
                        "Cloud Account Risk Assessment",
                        "Failed: 1689 (36%), Warning: 681 (7%), Not available: 36 (4%), Passed: 7253 (53%)",
                    ),
                ]),
            Category::new("cwpp", "CWPP Dashboard", "from-purple-500 to-pink-500").with_widgets(
                vec![
                    widget(
                        "w3",
                        "Top 5 Namespace Specific Alerts",
                        "No Graph data available!",
                    ),
                    widget("w4", "Workload Alerts", "No Graph data available!"),
                ],
            ),
            Category::new("registry", "Registry Scan", "from-green-500 to-teal-500")
                .with_widgets(vec![
                    widget(
                        "w5",
                        "Image Risk Assessment",
                        "Total Vulnerabilities: 1470, Critical: 9, High: 150",
                    ),
                    widget(
                        "w6",
                        "Image Security Issues",
                        "Total Images: 1470, Critical: 2, High: 2",
                    ),
                ]),
        ])
    }

    /// Returns the persisted schema version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns categories in display order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Finds a category by ID.
    #[must_use]
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id() == id)
    }

    /// Returns the widget count across all categories.
    #[must_use]
    pub fn total_widgets(&self) -> usize {
        self.categories.iter().map(Category::widget_count).sum()
    }

    /// Returns whether any category holds a widget with this ID.
    #[must_use]
    pub fn contains_widget(&self, id: &WidgetId) -> bool {
        self.categories.iter().any(|c| c.widget(id).is_some())
    }

    /// Flattens the tree: categories in order, widgets in order within each.
    #[must_use]
    pub fn entries(&self) -> Vec<WidgetEntry> {
        self.categories
            .iter()
            .flat_map(|category| {
                category
                    .widgets()
                    .iter()
                    .map(move |widget| WidgetEntry::new(category, widget))
            })
            .collect()
    }

    /// Returns a tree with `widget` appended to the category.
    ///
    /// # Errors
    /// Returns [`Unchanged::UnknownCategory`] if no category matches.
    pub fn with_widget_added(
        &self,
        category_id: &CategoryId,
        widget: Widget,
    ) -> Result<Self, Unchanged> {
        let index = self.category_index(category_id)?;
        let mut next = self.clone();
        next.categories[index].widgets_mut().push(widget);
        Ok(next)
    }

    /// Returns a tree without the given widget.
    ///
    /// # Errors
    /// Returns [`Unchanged`] if either ID is unknown.
    pub fn without_widget(
        &self,
        category_id: &CategoryId,
        widget_id: &WidgetId,
    ) -> Result<Self, Unchanged> {
        let (category, widget) = self.widget_position(category_id, widget_id)?;
        let mut next = self.clone();
        next.categories[category].widgets_mut().remove(widget);
        Ok(next)
    }

    /// Returns a tree with the patch merged into the given widget.
    ///
    /// # Errors
    /// Returns [`Unchanged`] if either ID is unknown.
    pub fn with_widget_updated(
        &self,
        category_id: &CategoryId,
        widget_id: &WidgetId,
        patch: &WidgetPatch,
    ) -> Result<Self, Unchanged> {
        let (category, widget) = self.widget_position(category_id, widget_id)?;
        let mut next = self.clone();
        next.categories[category].widgets_mut()[widget].apply(patch);
        Ok(next)
    }

    fn category_index(&self, id: &CategoryId) -> Result<usize, Unchanged> {
        self.categories
            .iter()
            .position(|c| c.id() == id)
            .ok_or(Unchanged::UnknownCategory)
    }

    fn widget_position(
        &self,
        category_id: &CategoryId,
        widget_id: &WidgetId,
    ) -> Result<(usize, usize), Unchanged> {
        let category = self.category_index(category_id)?;
        let widget = self.categories[category]
            .widgets()
            .iter()
            .position(|w| w.id() == widget_id)
            .ok_or(Unchanged::UnknownWidget)?;
        Ok((category, widget))
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::seed()
    }
}
