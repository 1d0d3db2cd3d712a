//! Live search over every widget.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::Span,
    widgets::{Paragraph, Widget},
};

use crate::application::services::DashboardStore;
use crate::domain::entities::WidgetEntry;
use crate::domain::keybinding::{Action, Keybind};
use crate::domain::search::found_label;
use crate::presentation::commands::{CommandRegistry, HasCommands};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{FocusContext, TextInput, WidgetCard};

use super::utils::clamp_selection;

const RESULT_HEIGHT: u16 = 5;

pub struct SearchView {
    input: TextInput,
    results: Vec<WidgetEntry>,
    selected: Option<usize>,
}

impl SearchView {
    #[must_use]
    pub fn new(theme: &Theme) -> Self {
        let mut input = TextInput::new("Search widgets")
            .placeholder("Type to filter by name or content")
            .accent(theme.accent);
        input.set_focused(true);
        Self {
            input,
            results: Vec::new(),
            selected: None,
        }
    }

    #[must_use]
    pub fn term(&self) -> &str {
        self.input.value()
    }

    #[must_use]
    pub fn results(&self) -> &[WidgetEntry] {
        &self.results
    }

    #[must_use]
    pub fn selected(&self) -> Option<&WidgetEntry> {
        self.selected.and_then(|i| self.results.get(i))
    }

    /// Re-runs the filter against the store's current tree.
    pub fn refresh(&mut self, store: &DashboardStore) {
        self.results = store.filtered_widgets(self.input.value());
        self.selected = clamp_selection(self.selected, self.results.len());
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.selected = None;
    }

    /// Editing and navigation keys. Returns whether the term changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => {
                self.select_previous();
                false
            }
            KeyCode::Down => {
                self.select_next();
                false
            }
            _ => {
                let changed = self.input.handle_key(key);
                if changed {
                    self.selected = None;
                }
                changed
            }
        }
    }

    pub fn select_next(&mut self) {
        if !self.results.is_empty() {
            self.selected = Some(self.selected.map_or(0, |i| (i + 1) % self.results.len()));
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.results.len();
        if len > 0 {
            self.selected = Some(self.selected.map_or(len - 1, |i| (i + len - 1) % len));
        }
    }
}

impl HasCommands for SearchView {
    fn get_commands(&self, registry: &CommandRegistry) -> Vec<Keybind> {
        registry.keybinds(
            FocusContext::Search,
            &[
                (Action::NavigateDown, "Next"),
                (Action::EditWidget, "Edit"),
                (Action::DeleteWidget, "Delete"),
                (Action::SwitchView, "Dashboard"),
                (Action::Quit, "Clear/Quit"),
            ],
        )
    }
}

pub struct SearchScreen<'a> {
    view: &'a SearchView,
    theme: &'a Theme,
    timestamp_format: Option<&'a str>,
}

impl<'a> SearchScreen<'a> {
    #[must_use]
    pub const fn new(view: &'a SearchView, theme: &'a Theme) -> Self {
        Self {
            view,
            theme,
            timestamp_format: None,
        }
    }

    #[must_use]
    pub const fn timestamp_format(mut self, format: Option<&'a str>) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl Widget for SearchScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        (&self.view.input).render(layout[0], buf);

        let count = self.view.results.len();
        Paragraph::new(Span::styled(
            format!(" {}", found_label(count)),
            self.theme.title_style.add_modifier(Modifier::ITALIC),
        ))
        .render(layout[1], buf);

        if count == 0 {
            Paragraph::new(" No widgets match your search.")
                .style(self.theme.dimmed_style)
                .render(layout[2], buf);
            return;
        }

        let visible = usize::from((layout[2].height / RESULT_HEIGHT).max(1));
        let first = self
            .view
            .selected
            .unwrap_or(0)
            .saturating_sub(visible - 1);

        let entries: Vec<_> = self
            .view
            .results
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .collect();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(RESULT_HEIGHT); entries.len()])
            .split(layout[2]);

        for ((index, entry), row) in entries.into_iter().zip(rows.iter()) {
            WidgetCard::new(&entry.widget, self.theme.category(&entry.category_color))
                .category_label(&entry.category_name)
                .timestamp_format(self.timestamp_format)
                .selected(self.view.selected == Some(index))
                .render(*row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MemoryStorage;
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;

    async fn store() -> DashboardStore {
        DashboardStore::open(Arc::new(MemoryStorage::new())).await
    }

    fn type_str(view: &mut SearchView, s: &str) {
        for c in s.chars() {
            view.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    #[tokio::test]
    async fn test_live_filtering() {
        let store = store().await;
        let mut view = SearchView::new(&Theme::default());
        view.refresh(&store);
        assert_eq!(view.results().len(), 6);

        type_str(&mut view, "image");
        view.refresh(&store);

        assert_eq!(view.results().len(), 2);
        assert_eq!(view.selected().unwrap().widget.name(), "Image Risk Assessment");
    }

    #[tokio::test]
    async fn test_no_match_clears_selection() {
        let store = store().await;
        let mut view = SearchView::new(&Theme::default());
        type_str(&mut view, "zzz");
        view.refresh(&store);

        assert!(view.results().is_empty());
        assert!(view.selected().is_none());
    }

    #[tokio::test]
    async fn test_navigation_wraps() {
        let store = store().await;
        let mut view = SearchView::new(&Theme::default());
        type_str(&mut view, "alerts");
        view.refresh(&store);

        view.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));

        assert_eq!(view.selected().unwrap().widget.name(), "Workload Alerts");
    }

    #[tokio::test]
    async fn test_render_reports_count() {
        let store = store().await;
        let mut view = SearchView::new(&Theme::default());
        type_str(&mut view, "graph");
        view.refresh(&store);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);

        SearchScreen::new(&view, &theme).render(area, &mut buf);

        let text: String = buf.content().iter().map(ratatui::buffer::Cell::symbol).collect();
        assert!(text.contains("Found 2 widgets"));
        assert!(text.contains("CWPP Dashboard"));
    }
}
