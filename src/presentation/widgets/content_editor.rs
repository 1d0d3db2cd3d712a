//! Multi-line editor for widget content.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};
use tui_textarea::{CursorMove, TextArea};
use unicode_width::UnicodeWidthStr;

/// Wraps a [`TextArea`] and renders it by hand, since the textarea's own
/// widget impl targets an older ratatui.
pub struct ContentEditor {
    textarea: TextArea<'static>,
    label: String,
    placeholder: String,
    focused: bool,
    accent: Color,
    scroll_offset: usize,
}

impl ContentEditor {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            textarea: TextArea::default(),
            label: label.into(),
            placeholder: String::new(),
            focused: false,
            accent: Color::Cyan,
            scroll_offset: 0,
        }
    }

    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    #[must_use]
    pub const fn accent(mut self, color: Color) -> Self {
        self.accent = color;
        self
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Content with lines joined by `\n`.
    #[must_use]
    pub fn value(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn set_value(&mut self, value: &str) {
        let lines: Vec<String> = value.split('\n').map(ToString::to_string).collect();
        self.textarea = TextArea::new(lines);
        self.textarea.move_cursor(CursorMove::Bottom);
        self.textarea.move_cursor(CursorMove::End);
        self.scroll_offset = 0;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textarea.lines().iter().all(String::is_empty)
    }

    /// Applies an editing key. Returns whether the content changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let word = key.modifiers.contains(KeyModifiers::CONTROL)
            || key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Enter => {
                self.textarea.insert_newline();
                true
            }
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.textarea.delete_word()
            }
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.textarea.insert_char(c);
                true
            }
            KeyCode::Backspace => self.textarea.delete_char(),
            KeyCode::Delete => self.textarea.delete_next_char(),
            KeyCode::Left if word => {
                self.textarea.move_cursor(CursorMove::WordBack);
                false
            }
            KeyCode::Right if word => {
                self.textarea.move_cursor(CursorMove::WordForward);
                false
            }
            KeyCode::Left => {
                self.textarea.move_cursor(CursorMove::Back);
                false
            }
            KeyCode::Right => {
                self.textarea.move_cursor(CursorMove::Forward);
                false
            }
            KeyCode::Up => {
                self.textarea.move_cursor(CursorMove::Up);
                false
            }
            KeyCode::Down => {
                self.textarea.move_cursor(CursorMove::Down);
                false
            }
            KeyCode::Home => {
                self.textarea.move_cursor(CursorMove::Head);
                false
            }
            KeyCode::End => {
                self.textarea.move_cursor(CursorMove::End);
                false
            }
            _ => false,
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.label));
        let inner = block.inner(area);
        block.render(area, buf);

        let height = usize::from(inner.height);
        if height == 0 || inner.width == 0 {
            return;
        }

        if self.is_empty() {
            Paragraph::new(self.placeholder.as_str())
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
        }

        let (row, col) = self.textarea.cursor();
        if row >= self.scroll_offset + height {
            self.scroll_offset = row + 1 - height;
        } else if row < self.scroll_offset {
            self.scroll_offset = row;
        }

        if !self.is_empty() {
            for (i, line) in self
                .textarea
                .lines()
                .iter()
                .enumerate()
                .skip(self.scroll_offset)
                .take(height)
            {
                let y = inner.y + u16::try_from(i - self.scroll_offset).unwrap_or(0);
                let line_area = Rect::new(inner.x, y, inner.width, 1);
                Paragraph::new(Line::raw(line.as_str()))
                    .style(Style::default().fg(Color::White))
                    .render(line_area, buf);
            }
        }

        if self.focused {
            let prefix: String = self.textarea.lines()[row].chars().take(col).collect();
            let x = inner.x + u16::try_from(prefix.width()).unwrap_or(u16::MAX);
            let y = inner.y + u16::try_from(row - self.scroll_offset).unwrap_or(0);
            if x < inner.right() && y < inner.bottom() {
                buf[(x, y)].set_style(Style::default().bg(Color::White).fg(Color::Black));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_typing_and_newline() {
        let mut editor = ContentEditor::new("Widget Text");
        for c in "ab".chars() {
            editor.handle_key(key(KeyCode::Char(c), KeyModifiers::NONE));
        }
        editor.handle_key(key(KeyCode::Enter, KeyModifiers::NONE));
        editor.handle_key(key(KeyCode::Char('c'), KeyModifiers::NONE));

        assert_eq!(editor.value(), "ab\nc");
    }

    #[test]
    fn test_unbound_keys_change_nothing() {
        let mut editor = ContentEditor::new("Widget Text");
        assert!(!editor.handle_key(key(KeyCode::F(2), KeyModifiers::NONE)));
        assert!(!editor.handle_key(key(KeyCode::Char('x'), KeyModifiers::CONTROL)));
        assert!(editor.is_empty());
    }

    #[test]
    fn test_set_value_then_backspace() {
        let mut editor = ContentEditor::new("Widget Text");
        editor.set_value("Total: 2\nConnected");
        editor.handle_key(key(KeyCode::Backspace, KeyModifiers::NONE));

        assert_eq!(editor.value(), "Total: 2\nConnecte");
    }

    #[test]
    fn test_render_places_text() {
        let mut editor = ContentEditor::new("Widget Text");
        editor.set_value("hello");
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);

        editor.render(area, &mut buf);

        let row: String = (1..6).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert_eq!(row, "hello");
    }
}
