use crate::presentation::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Top-level views selectable from the header tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewTab {
    #[default]
    Dashboard,
    Search,
}

impl ViewTab {
    pub const ALL: [Self; 2] = [Self::Dashboard, Self::Search];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Search => "Search & Filter",
        }
    }

    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Dashboard => Self::Search,
            Self::Search => Self::Dashboard,
        }
    }
}

pub struct HeaderBarStyle {
    pub background: Style,
    pub app_name: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub counter: Style,
}

impl HeaderBarStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            app_name: Style::default()
                .bg(theme.accent)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            tab_active: Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            counter: theme.selection_style.add_modifier(Modifier::BOLD),
            ..Self::default()
        }
    }
}

impl Default for HeaderBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            app_name: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            tab_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            counter: Style::default().fg(Color::White),
        }
    }
}

/// Title, view tabs and the total widget counter.
pub struct HeaderBar<'a> {
    title: &'a str,
    active: ViewTab,
    total_widgets: usize,
    style: HeaderBarStyle,
}

impl<'a> HeaderBar<'a> {
    #[must_use]
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            active: ViewTab::default(),
            total_widgets: 0,
            style: HeaderBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn active(mut self, tab: ViewTab) -> Self {
        self.active = tab;
        self
    }

    #[must_use]
    pub const fn total_widgets(mut self, total: usize) -> Self {
        self.total_widgets = total;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: HeaderBarStyle) -> Self {
        self.style = style;
        self
    }

    fn counter_text(&self) -> String {
        format!(" {} widgets ", self.total_widgets)
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)]
                .set_char(' ')
                .set_style(self.style.background);
        }

        let mut spans = vec![
            Span::styled(format!(" {} ", self.title), self.style.app_name),
            Span::raw("  "),
        ];
        for tab in ViewTab::ALL {
            let style = if tab == self.active {
                self.style.tab_active
            } else {
                self.style.tab_inactive
            };
            spans.push(Span::styled(format!(" {} ", tab.title()), style));
            spans.push(Span::raw(" "));
        }
        let left_line = Line::from(spans);
        let left_width = u16::try_from(left_line.width()).unwrap_or(u16::MAX);
        Paragraph::new(left_line).render(area, buf);

        let counter = self.counter_text();
        let counter_width = u16::try_from(counter.width()).unwrap_or(u16::MAX);
        if counter_width < area.width.saturating_sub(left_width) {
            let right_x = area.right().saturating_sub(counter_width);
            let right_area = Rect::new(right_x, area.y, counter_width, 1);
            Paragraph::new(Span::styled(counter, self.style.counter)).render(right_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_toggle() {
        assert_eq!(ViewTab::Dashboard.toggle(), ViewTab::Search);
        assert_eq!(ViewTab::Search.toggle(), ViewTab::Dashboard);
        assert_eq!(ViewTab::Search.title(), "Search & Filter");
    }

    #[test]
    fn test_render_shows_title_tabs_and_count() {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);

        HeaderBar::new("CNAPP Dashboard")
            .active(ViewTab::Search)
            .total_widgets(6)
            .render(area, &mut buf);

        let text: String = buf.content().iter().map(ratatui::buffer::Cell::symbol).collect();
        assert!(text.contains("CNAPP Dashboard"));
        assert!(text.contains("Search & Filter"));
        assert!(text.contains("6 widgets"));
    }
}
