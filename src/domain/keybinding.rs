use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    SwitchView,

    // Navigation
    NavigateUp,
    NavigateDown,
    NextCategory,
    PreviousCategory,

    // Widget actions
    AddWidget,
    EditWidget,
    DeleteWidget,
    FocusSearch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub key: KeyEvent,
    pub action: Action,
    pub label: Cow<'static, str>,
}

impl Keybind {
    pub fn new(key: KeyEvent, action: Action, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key,
            action,
            label: label.into(),
        }
    }

    /// Short key name for the footer, e.g. `Ctrl+D`.
    #[must_use]
    pub fn key_label(&self) -> String {
        let key = match self.key.code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::Delete => "Del".to_string(),
            other => format!("{other:?}"),
        };
        if self.key.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", key.to_uppercase())
        } else {
            key
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_labels() {
        let plain = Keybind::new(
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE),
            Action::AddWidget,
            "Add",
        );
        let ctrl = Keybind::new(
            KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL),
            Action::DeleteWidget,
            "Delete",
        );

        assert_eq!(plain.key_label(), "a");
        assert_eq!(ctrl.key_label(), "Ctrl+D");
    }
}
