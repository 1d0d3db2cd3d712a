use crate::domain::keybinding::{Action, Keybind};
use crate::presentation::widgets::FocusContext;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Key → action tables per focus context, plus the primary key of each
/// action for the footer.
pub struct CommandRegistry {
    display_bindings: HashMap<(FocusContext, Action), KeyEvent>,
    input_bindings: Vec<(FocusContext, KeyEvent, Action)>,
}

impl Default for CommandRegistry {
    #[allow(clippy::too_many_lines)]
    fn default() -> Self {
        let mut display_bindings = HashMap::new();
        let mut input_bindings = Vec::new();

        let mut register =
            |context: FocusContext, action: Action, key: KeyEvent, is_primary: bool| {
                if is_primary {
                    display_bindings.insert((context, action), key);
                }
                input_bindings.push((context, key, action));
            };

        use FocusContext::{Dashboard, Search};
        let plain = |c: char| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        let ctrl = |c: char| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        let code = |code: KeyCode| KeyEvent::new(code, KeyModifiers::NONE);

        register(Dashboard, Action::Quit, plain('q'), true);
        register(Dashboard, Action::Quit, code(KeyCode::Esc), false);
        register(Dashboard, Action::SwitchView, code(KeyCode::Tab), true);
        register(Dashboard, Action::FocusSearch, plain('/'), false);
        register(Dashboard, Action::NavigateUp, code(KeyCode::Up), true);
        register(Dashboard, Action::NavigateUp, plain('k'), false);
        register(Dashboard, Action::NavigateDown, code(KeyCode::Down), true);
        register(Dashboard, Action::NavigateDown, plain('j'), false);
        register(Dashboard, Action::PreviousCategory, code(KeyCode::Left), true);
        register(Dashboard, Action::PreviousCategory, plain('h'), false);
        register(Dashboard, Action::NextCategory, code(KeyCode::Right), true);
        register(Dashboard, Action::NextCategory, plain('l'), false);
        register(Dashboard, Action::AddWidget, plain('a'), true);
        register(Dashboard, Action::EditWidget, plain('e'), true);
        register(Dashboard, Action::DeleteWidget, plain('d'), true);
        register(Dashboard, Action::DeleteWidget, code(KeyCode::Delete), false);

        register(Search, Action::Quit, code(KeyCode::Esc), true);
        register(Search, Action::SwitchView, code(KeyCode::Tab), true);
        register(Search, Action::NavigateUp, code(KeyCode::Up), true);
        register(Search, Action::NavigateDown, code(KeyCode::Down), true);
        register(Search, Action::EditWidget, ctrl('e'), true);
        register(Search, Action::DeleteWidget, ctrl('d'), true);

        Self {
            display_bindings,
            input_bindings,
        }
    }
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, context: FocusContext, action: Action) -> Option<KeyEvent> {
        self.display_bindings.get(&(context, action)).copied()
    }

    #[must_use]
    pub fn find_action(&self, context: FocusContext, key: KeyEvent) -> Option<Action> {
        self.input_bindings
            .iter()
            .find(|(c, k, _)| *c == context && k.code == key.code && k.modifiers == key.modifiers)
            .map(|(_, _, a)| *a)
    }

    /// Footer hints for the given actions, skipping any without a primary key.
    #[must_use]
    pub fn keybinds(&self, context: FocusContext, actions: &[(Action, &'static str)]) -> Vec<Keybind> {
        actions
            .iter()
            .filter_map(|&(action, label)| {
                self.get(context, action)
                    .map(|key| Keybind::new(key, action, label))
            })
            .collect()
    }
}

pub trait HasCommands {
    fn get_commands(&self, registry: &CommandRegistry) -> Vec<Keybind>;
}
