use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::domain::Widget as DashboardWidget;
use crate::presentation::theme::CategoryPalette;

/// Bordered card for one dashboard widget, colored by its category.
pub struct WidgetCard<'a> {
    widget: &'a DashboardWidget,
    palette: CategoryPalette,
    category_label: Option<&'a str>,
    timestamp_format: Option<&'a str>,
    selected: bool,
}

impl<'a> WidgetCard<'a> {
    #[must_use]
    pub const fn new(widget: &'a DashboardWidget, palette: CategoryPalette) -> Self {
        Self {
            widget,
            palette,
            category_label: None,
            timestamp_format: None,
            selected: false,
        }
    }

    /// Shows the owning category as a badge, used by search results.
    #[must_use]
    pub const fn category_label(mut self, label: &'a str) -> Self {
        self.category_label = Some(label);
        self
    }

    /// Shows the creation time in the bottom border using a `chrono` format.
    #[must_use]
    pub const fn timestamp_format(mut self, format: Option<&'a str>) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub const fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    fn timestamp(&self) -> Option<String> {
        let format = self.timestamp_format?;
        let created_at = self.widget.created_at()?;
        Some(created_at.with_timezone(&Local).format(format).to_string())
    }
}

impl Widget for WidgetCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }

        let border_style = if self.selected {
            Style::default()
                .fg(self.palette.end)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.start)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(if self.selected {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(border_style)
            .title(Line::from(Span::styled(
                format!(" {} ", self.widget.name()),
                Style::default()
                    .fg(self.palette.start)
                    .add_modifier(Modifier::BOLD),
            )));

        if let Some(label) = self.category_label {
            block = block.title(
                Line::from(Span::styled(
                    format!(" {label} "),
                    Style::default().bg(self.palette.end).fg(Color::Black),
                ))
                .right_aligned(),
            );
        }
        if let Some(stamp) = self.timestamp() {
            block = block.title_bottom(
                Line::from(Span::styled(
                    format!(" {stamp} "),
                    Style::default().fg(Color::DarkGray),
                ))
                .right_aligned(),
            );
        }
        if self.selected {
            block = block.style(Style::default().bg(self.palette.tint()));
        }

        Paragraph::new(self.widget.text())
            .block(block)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::White))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn render_text(card: WidgetCard<'_>, area: Rect) -> String {
        let mut buf = Buffer::empty(area);
        card.render(area, &mut buf);
        buf.content().iter().map(ratatui::buffer::Cell::symbol).collect()
    }

    #[test]
    fn test_card_shows_name_text_and_badge() {
        let widget = DashboardWidget::new("w1", "Cloud Accounts", "Total: 2", Utc::now());
        let palette = CategoryPalette::from_token("from-blue-500 to-cyan-500", Color::Cyan);

        let text = render_text(
            WidgetCard::new(&widget, palette).category_label("CSPM"),
            Rect::new(0, 0, 40, 5),
        );

        assert!(text.contains("Cloud Accounts"));
        assert!(text.contains("Total: 2"));
        assert!(text.contains("CSPM"));
    }

    #[test]
    fn test_timestamp_in_bottom_border() {
        let widget = DashboardWidget::new("w1", "A", "B", Utc::now());
        let palette = CategoryPalette::from_token("", Color::Cyan);

        let text = render_text(
            WidgetCard::new(&widget, palette).timestamp_format(Some("%Y")),
            Rect::new(0, 0, 30, 4),
        );

        let year = Local::now().format("%Y").to_string();
        assert!(text.contains(&year));
    }

    #[test]
    fn test_tiny_area_is_skipped() {
        let widget = DashboardWidget::new("w1", "Name", "Body", Utc::now());
        let palette = CategoryPalette::from_token("", Color::Cyan);

        let text = render_text(WidgetCard::new(&widget, palette), Rect::new(0, 0, 3, 2));

        assert!(text.trim().is_empty());
    }
}
