//! Category sidebar and card grid.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::domain::entities::{Category, DashboardState, Widget as DashboardWidget};
use crate::domain::keybinding::{Action, Keybind};
use crate::presentation::commands::{CommandRegistry, HasCommands};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{FocusContext, WidgetCard};

use super::utils::{clamp_selection, widget_count_label};

const CARD_HEIGHT: u16 = 6;
const GRID_COLUMNS: usize = 2;

/// Focused category and card on the dashboard.
#[derive(Debug, Default)]
pub struct DashboardView {
    category: usize,
    widget: Option<usize>,
}

impl DashboardView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamps the selection after the tree changed.
    pub fn sync(&mut self, state: &DashboardState) {
        let categories = state.categories();
        self.category = self.category.min(categories.len().saturating_sub(1));
        let count = categories.get(self.category).map_or(0, Category::widget_count);
        self.widget = clamp_selection(self.widget, count);
    }

    #[must_use]
    pub const fn category_index(&self) -> usize {
        self.category
    }

    #[must_use]
    pub const fn widget_index(&self) -> Option<usize> {
        self.widget
    }

    #[must_use]
    pub fn focused_category<'a>(&self, state: &'a DashboardState) -> Option<&'a Category> {
        state.categories().get(self.category)
    }

    #[must_use]
    pub fn selected_widget<'a>(
        &self,
        state: &'a DashboardState,
    ) -> Option<(&'a Category, &'a DashboardWidget)> {
        let category = self.focused_category(state)?;
        let widget = category.widgets().get(self.widget?)?;
        Some((category, widget))
    }

    pub fn next_category(&mut self, state: &DashboardState) {
        let len = state.categories().len();
        if len > 0 {
            self.category = (self.category + 1) % len;
            self.widget = None;
            self.sync(state);
        }
    }

    pub fn previous_category(&mut self, state: &DashboardState) {
        let len = state.categories().len();
        if len > 0 {
            self.category = (self.category + len - 1) % len;
            self.widget = None;
            self.sync(state);
        }
    }

    pub fn select_next(&mut self, state: &DashboardState) {
        let count = self.focused_category(state).map_or(0, Category::widget_count);
        if count > 0 {
            self.widget = Some(self.widget.map_or(0, |i| (i + 1) % count));
        }
    }

    pub fn select_previous(&mut self, state: &DashboardState) {
        let count = self.focused_category(state).map_or(0, Category::widget_count);
        if count > 0 {
            self.widget = Some(self.widget.map_or(count - 1, |i| (i + count - 1) % count));
        }
    }
}

impl HasCommands for DashboardView {
    fn get_commands(&self, registry: &CommandRegistry) -> Vec<Keybind> {
        registry.keybinds(
            FocusContext::Dashboard,
            &[
                (Action::NavigateDown, "Next"),
                (Action::NextCategory, "Category"),
                (Action::AddWidget, "Add"),
                (Action::EditWidget, "Edit"),
                (Action::DeleteWidget, "Delete"),
                (Action::SwitchView, "Search"),
                (Action::Quit, "Quit"),
            ],
        )
    }
}

pub struct DashboardScreen<'a> {
    state: &'a DashboardState,
    view: &'a DashboardView,
    theme: &'a Theme,
    timestamp_format: Option<&'a str>,
}

impl<'a> DashboardScreen<'a> {
    #[must_use]
    pub const fn new(state: &'a DashboardState, view: &'a DashboardView, theme: &'a Theme) -> Self {
        Self {
            state,
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

    fn render_sidebar(&self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = self
            .state
            .categories()
            .iter()
            .map(|category| {
                let palette = self.theme.category(category.color());
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled("▌", Style::default().fg(palette.start)),
                        Span::styled(
                            format!(" {}", category.name()),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(vec![
                        Span::styled("▌", Style::default().fg(palette.end)),
                        Span::styled(
                            format!(" {}", widget_count_label(category.widget_count())),
                            self.theme.dimmed_style,
                        ),
                    ]),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.dimmed_style)
                    .title(" Categories "),
            )
            .highlight_style(self.theme.selection_style);

        let mut state = ListState::default().with_selected(Some(self.view.category_index()));
        StatefulWidget::render(list, area, buf, &mut state);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_cards(&self, category: &Category, area: Rect, buf: &mut Buffer) {
        let palette = self.theme.category(category.color());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.start))
            .title(Line::from(Span::styled(
                format!(" {} ", category.name()),
                Style::default()
                    .fg(palette.start)
                    .add_modifier(Modifier::BOLD),
            )))
            .title(
                Line::from(format!(" {} ", widget_count_label(category.widget_count())))
                    .right_aligned(),
            );
        let inner = block.inner(area);
        block.render(area, buf);

        if category.widgets().is_empty() {
            Paragraph::new("No widgets yet. Press a to add one.")
                .style(self.theme.dimmed_style)
                .wrap(Wrap { trim: true })
                .render(inner, buf);
            return;
        }

        let visible_rows = usize::from((inner.height / CARD_HEIGHT).max(1));
        let selected_row = self.view.widget_index().unwrap_or(0) / GRID_COLUMNS;
        let first_row = selected_row.saturating_sub(visible_rows - 1);

        let rows: Vec<_> = category
            .widgets()
            .chunks(GRID_COLUMNS)
            .enumerate()
            .skip(first_row)
            .take(visible_rows)
            .collect();

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(CARD_HEIGHT); rows.len()])
            .split(inner);

        for ((row_index, widgets), row_area) in rows.into_iter().zip(row_areas.iter()) {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
                .split(*row_area);

            for (column, widget) in widgets.iter().enumerate() {
                let index = row_index * GRID_COLUMNS + column;
                WidgetCard::new(widget, palette)
                    .timestamp_format(self.timestamp_format)
                    .selected(self.view.widget_index() == Some(index))
                    .render(cells[column], buf);
            }
        }
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(20)])
            .split(area);

        self.render_sidebar(columns[0], buf);

        if let Some(category) = self.view.focused_category(self.state) {
            self.render_cards(category, columns[1], buf);
        } else {
            Paragraph::new("No categories")
                .style(self.theme.dimmed_style)
                .render(columns[1], buf);
        }
    }
}
