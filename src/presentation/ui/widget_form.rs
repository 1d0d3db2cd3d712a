//! Modal form for adding and editing widgets.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::application::dto::{AddWidgetRequest, EditWidgetRequest};
use crate::domain::entities::{Category, CategoryId, Widget as DashboardWidget, WidgetId};
use crate::presentation::events::is_submit_event;
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{ContentEditor, TextInput};

use super::utils::centered_rect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit { widget_id: WidgetId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Category,
    Name,
    Content,
}

#[derive(Debug)]
pub enum FormSubmission {
    Add(AddWidgetRequest),
    Edit(EditWidgetRequest),
}

#[derive(Debug)]
pub enum FormAction {
    None,
    Cancel,
    Submit(FormSubmission),
}

pub struct WidgetForm {
    mode: FormMode,
    categories: Vec<(CategoryId, String)>,
    category_index: Option<usize>,
    name: TextInput,
    content: ContentEditor,
    focus: FormField,
    error: Option<String>,
    accent: Color,
}

impl WidgetForm {
    /// Form for a new widget, with `preselected` chosen if it exists.
    #[must_use]
    pub fn add(categories: &[Category], preselected: Option<&CategoryId>, theme: &Theme) -> Self {
        let category_index =
            preselected.and_then(|id| categories.iter().position(|c| c.id() == id));
        let mut form = Self::build(FormMode::Add, categories, category_index, theme);
        form.set_focus(if category_index.is_some() {
            FormField::Name
        } else {
            FormField::Category
        });
        form
    }

    /// Form prefilled with an existing widget. The category cannot change.
    #[must_use]
    pub fn edit(
        categories: &[Category],
        category_id: &CategoryId,
        widget: &DashboardWidget,
        theme: &Theme,
    ) -> Self {
        let category_index = categories.iter().position(|c| c.id() == category_id);
        let mode = FormMode::Edit {
            widget_id: widget.id().clone(),
        };
        let mut form = Self::build(mode, categories, category_index, theme);
        form.name.set_value(widget.name());
        form.content.set_value(widget.text());
        form.set_focus(FormField::Name);
        form
    }

    fn build(
        mode: FormMode,
        categories: &[Category],
        category_index: Option<usize>,
        theme: &Theme,
    ) -> Self {
        Self {
            mode,
            categories: categories
                .iter()
                .map(|c| (c.id().clone(), c.name().to_string()))
                .collect(),
            category_index,
            name: TextInput::new("Widget Name")
                .placeholder("Enter widget name")
                .accent(theme.accent),
            content: ContentEditor::new("Widget Text")
                .placeholder("Enter widget content")
                .accent(theme.accent),
            focus: FormField::Category,
            error: None,
            accent: theme.accent,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> &FormMode {
        &self.mode
    }

    #[must_use]
    pub const fn focus(&self) -> FormField {
        self.focus
    }

    #[must_use]
    pub fn selected_category(&self) -> Option<&CategoryId> {
        self.category_index
            .and_then(|i| self.categories.get(i))
            .map(|(id, _)| id)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Shows a rejection inline; the form stays open.
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    fn fields(&self) -> &'static [FormField] {
        match self.mode {
            FormMode::Add => &[FormField::Category, FormField::Name, FormField::Content],
            FormMode::Edit { .. } => &[FormField::Name, FormField::Content],
        }
    }

    fn set_focus(&mut self, field: FormField) {
        self.focus = field;
        self.name.set_focused(field == FormField::Name);
        self.content.set_focused(field == FormField::Content);
    }

    fn cycle_focus(&mut self, forward: bool) {
        let fields = self.fields();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % fields.len()
        } else {
            (current + fields.len() - 1) % fields.len()
        };
        self.set_focus(fields[next]);
    }

    fn step_category(&mut self, forward: bool) {
        let len = self.categories.len();
        if len == 0 {
            return;
        }
        self.category_index = Some(match (self.category_index, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        });
    }

    fn submission(&self) -> FormSubmission {
        match &self.mode {
            FormMode::Add => FormSubmission::Add(AddWidgetRequest::new(
                self.selected_category().cloned(),
                self.name.value(),
                self.content.value(),
            )),
            FormMode::Edit { widget_id } => FormSubmission::Edit(
                EditWidgetRequest::new(
                    self.selected_category()
                        .cloned()
                        .unwrap_or_else(|| CategoryId::new("")),
                    widget_id.clone(),
                )
                .with_name(self.name.value())
                .with_text(self.content.value()),
            ),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Tab => {
                self.cycle_focus(true);
                return FormAction::None;
            }
            KeyCode::BackTab => {
                self.cycle_focus(false);
                return FormAction::None;
            }
            _ => {}
        }

        let ctrl_s = key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl_s || (self.focus != FormField::Content && is_submit_event(&key)) {
            return FormAction::Submit(self.submission());
        }

        let changed = match self.focus {
            FormField::Category => {
                match key.code {
                    KeyCode::Left | KeyCode::Up => self.step_category(false),
                    KeyCode::Right | KeyCode::Down => self.step_category(true),
                    _ => return FormAction::None,
                }
                true
            }
            FormField::Name => self.name.handle_key(key),
            FormField::Content => self.content.handle_key(key),
        };
        if changed {
            self.error = None;
        }
        FormAction::None
    }

    fn render_category(&self, area: Rect, buf: &mut Buffer) {
        let focused = self.focus == FormField::Category;
        let locked = matches!(self.mode, FormMode::Edit { .. });
        let border = if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(Color::Gray)
        };
        let label = self
            .category_index
            .and_then(|i| self.categories.get(i))
            .map_or("Select a category", |(_, name)| name.as_str());
        let value_style = if self.category_index.is_some() {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let line = if locked {
            Line::from(Span::styled(label, value_style))
        } else {
            Line::from(vec![
                Span::styled("◀ ", Style::default().fg(self.accent)),
                Span::styled(label, value_style),
                Span::styled(" ▶", Style::default().fg(self.accent)),
            ])
        };

        Paragraph::new(line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(" Category "),
            )
            .render(area, buf);
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let area = centered_rect(60, 60, area);
        Clear.render(area, buf);

        let title = match self.mode {
            FormMode::Add => " Add Widget ",
            FormMode::Edit { .. } => " Edit Widget ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent))
            .title(title)
            .title_bottom(Line::from(" Tab next · Ctrl+S save · Esc cancel ").right_aligned());
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);

        self.render_category(layout[0], buf);
        (&self.name).render(layout[1], buf);
        self.content.render(layout[2], buf);

        if let Some(error) = &self.error {
            Paragraph::new(Span::styled(
                error.as_str(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
            .render(layout[3], buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::DashboardState;
    use crate::domain::errors::ValidationError;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut WidgetForm, s: &str) {
        for c in s.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn submit(form: &mut WidgetForm) -> FormSubmission {
        match form.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)) {
            FormAction::Submit(submission) => submission,
            other => panic!("expected submit, got {other:?}"),
        }
    }

    #[test]
    fn test_add_with_preselected_category() {
        let state = DashboardState::seed();
        let mut form =
            WidgetForm::add(state.categories(), Some(&CategoryId::from("cwpp")), &Theme::default());

        assert_eq!(form.focus(), FormField::Name);
        type_str(&mut form, "Alerts");
        form.handle_key(key(KeyCode::Tab));
        type_str(&mut form, "None");

        let FormSubmission::Add(request) = submit(&mut form) else {
            panic!("expected add");
        };
        let (category, draft) = request.validate().unwrap();
        assert_eq!(category.as_str(), "cwpp");
        assert_eq!(draft.name, "Alerts");
        assert_eq!(draft.text, "None");
    }

    #[test]
    fn test_category_selector_cycles() {
        let state = DashboardState::seed();
        let mut form = WidgetForm::add(state.categories(), None, &Theme::default());

        assert_eq!(form.focus(), FormField::Category);
        assert!(form.selected_category().is_none());

        form.handle_key(key(KeyCode::Left));
        assert_eq!(form.selected_category().unwrap().as_str(), "registry");
        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.selected_category().unwrap().as_str(), "cspm");
    }

    #[test]
    fn test_submit_without_category_fails_validation() {
        let state = DashboardState::seed();
        let mut form = WidgetForm::add(state.categories(), None, &Theme::default());

        let FormSubmission::Add(request) = submit(&mut form) else {
            panic!("expected add");
        };

        assert_eq!(request.validate().unwrap_err(), ValidationError::MissingCategory);
    }

    #[test]
    fn test_enter_in_content_inserts_newline() {
        let state = DashboardState::seed();
        let mut form =
            WidgetForm::add(state.categories(), Some(&CategoryId::from("cspm")), &Theme::default());
        form.handle_key(key(KeyCode::Tab));
        type_str(&mut form, "a");

        assert!(matches!(form.handle_key(key(KeyCode::Enter)), FormAction::None));
        type_str(&mut form, "b");
        form.handle_key(key(KeyCode::BackTab));

        assert!(matches!(form.handle_key(key(KeyCode::Enter)), FormAction::Submit(_)));
    }

    #[test]
    fn test_edit_prefills_and_skips_category() {
        let state = DashboardState::seed();
        let category = CategoryId::from("registry");
        let widget = state
            .category(&category)
            .and_then(|c| c.widget(&WidgetId::from("w5")))
            .unwrap();
        let mut form = WidgetForm::edit(state.categories(), &category, widget, &Theme::default());

        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus(), FormField::Content);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus(), FormField::Name);

        let FormSubmission::Edit(request) = submit(&mut form) else {
            panic!("expected edit");
        };
        assert_eq!(request.category_id.as_str(), "registry");
        assert_eq!(request.name.as_deref(), Some("Image Risk Assessment"));
    }

    #[test]
    fn test_typing_clears_error() {
        let state = DashboardState::seed();
        let mut form =
            WidgetForm::add(state.categories(), Some(&CategoryId::from("cspm")), &Theme::default());
        form.set_error(ValidationError::MissingName.to_string());

        type_str(&mut form, "x");

        assert!(form.error().is_none());
    }

    #[test]
    fn test_escape_cancels() {
        let state = DashboardState::seed();
        let mut form = WidgetForm::add(state.categories(), None, &Theme::default());
        assert!(matches!(form.handle_key(key(KeyCode::Esc)), FormAction::Cancel));
    }
}
