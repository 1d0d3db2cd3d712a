//! Dashboard widget entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unique identifier for a widget card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Creates an identifier from a raw string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Creates the identifier for a generated sequence number (`w<n>`).
    #[must_use]
    pub fn from_sequence(sequence: i64) -> Self {
        Self(format!("w{sequence}"))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WidgetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A single card of user-managed content.
///
/// Stored widgets written by older builds may lack `createdAt`; keys this
/// model does not know are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    id: WidgetId,
    name: String,
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Widget {
    /// Creates a widget.
    #[must_use]
    pub fn new(
        id: impl Into<WidgetId>,
        name: impl Into<String>,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            text: text.into(),
            created_at: Some(created_at),
            extra: Map::new(),
        }
    }

    /// Returns the widget ID.
    #[must_use]
    pub const fn id(&self) -> &WidgetId {
        &self.id
    }

    /// Returns the widget title.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the widget content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns when the widget was created, if the stored record says.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Merges the patch into this widget. Identity and creation time never change.
    pub(crate) fn apply(&mut self, patch: &WidgetPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(text) = &patch.text {
            self.text.clone_from(text);
        }
    }
}

/// Caller-supplied content for a new widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetDraft {
    /// Widget title.
    pub name: String,
    /// Widget content.
    pub text: String,
}

impl WidgetDraft {
    /// Creates a draft.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Partial update for an existing widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetPatch {
    /// Replacement title.
    pub name: Option<String>,
    /// Replacement content.
    pub text: Option<String>,
}

impl WidgetPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the replacement content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Returns whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.text.is_none()
    }
}
