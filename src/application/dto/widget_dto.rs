//! Widget form DTOs.

use crate::domain::entities::{CategoryId, WidgetDraft, WidgetId, WidgetPatch};
use crate::domain::errors::ValidationError;

/// Add-widget form submission.
#[derive(Debug, Clone, Default)]
pub struct AddWidgetRequest {
    /// Selected category, `None` while nothing is selected.
    pub category_id: Option<CategoryId>,
    /// Widget title as typed.
    pub name: String,
    /// Widget content as typed.
    pub text: String,
}

impl AddWidgetRequest {
    /// Creates new add request.
    #[must_use]
    pub fn new(
        category_id: Option<CategoryId>,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            category_id,
            name: name.into(),
            text: text.into(),
        }
    }

    /// Checks required fields and trims the input.
    ///
    /// # Errors
    /// Returns the first missing field.
    pub fn validate(&self) -> Result<(CategoryId, WidgetDraft), ValidationError> {
        let category_id = self
            .category_id
            .clone()
            .filter(|id| !id.as_str().is_empty())
            .ok_or(ValidationError::MissingCategory)?;
        let name = required(&self.name, ValidationError::MissingName)?;
        let text = required(&self.text, ValidationError::MissingText)?;

        Ok((category_id, WidgetDraft::new(name, text)))
    }
}

/// Inline edit submission.
#[derive(Debug, Clone)]
pub struct EditWidgetRequest {
    /// Owning category.
    pub category_id: CategoryId,
    /// Edited widget.
    pub widget_id: WidgetId,
    /// Replacement title, if changed.
    pub name: Option<String>,
    /// Replacement content, if changed.
    pub text: Option<String>,
}

impl EditWidgetRequest {
    /// Creates new edit request.
    #[must_use]
    pub const fn new(category_id: CategoryId, widget_id: WidgetId) -> Self {
        Self {
            category_id,
            widget_id,
            name: None,
            text: None,
        }
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the replacement content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builds the patch. Provided fields must not be blank.
    ///
    /// # Errors
    /// Returns error if a provided field is blank or nothing changes.
    pub fn validate(&self) -> Result<WidgetPatch, ValidationError> {
        let mut patch = WidgetPatch::new();
        if let Some(name) = &self.name {
            patch = patch.name(required(name, ValidationError::MissingName)?);
        }
        if let Some(text) = &self.text {
            patch = patch.text(required(text, ValidationError::MissingText)?);
        }
        if patch.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        Ok(patch)
    }
}

fn required(value: &str, missing: ValidationError) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(missing)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_add_request_trims_fields() {
        let request = AddWidgetRequest::new(Some("cspm".into()), "  Accounts ", "\tTotal: 2\n");

        let (category, draft) = request.validate().unwrap();

        assert_eq!(category.as_str(), "cspm");
        assert_eq!(draft.name, "Accounts");
        assert_eq!(draft.text, "Total: 2");
    }

    #[test_case(None, "a", "b", ValidationError::MissingCategory ; "no_category")]
    #[test_case(Some(""), "a", "b", ValidationError::MissingCategory ; "blank_category")]
    #[test_case(Some("cspm"), "   ", "b", ValidationError::MissingName ; "blank_name")]
    #[test_case(Some("cspm"), "a", "", ValidationError::MissingText ; "empty_text")]
    fn test_add_request_required_fields(
        category: Option<&str>,
        name: &str,
        text: &str,
        expected: ValidationError,
    ) {
        let request = AddWidgetRequest::new(category.map(CategoryId::from), name, text);

        assert_eq!(request.validate().unwrap_err(), expected);
    }

    #[test]
    fn test_edit_request_builds_partial_patch() {
        let request = EditWidgetRequest::new("cwpp".into(), "w3".into()).with_text(" 5 alerts ");

        let patch = request.validate().unwrap();

        assert_eq!(patch.name, None);
        assert_eq!(patch.text.as_deref(), Some("5 alerts"));
    }

    #[test]
    fn test_edit_request_rejects_blank_and_empty() {
        let blank = EditWidgetRequest::new("cwpp".into(), "w3".into()).with_name(" ");
        let empty = EditWidgetRequest::new("cwpp".into(), "w3".into());

        assert_eq!(blank.validate().unwrap_err(), ValidationError::MissingName);
        assert_eq!(empty.validate().unwrap_err(), ValidationError::EmptyUpdate);
    }
}
