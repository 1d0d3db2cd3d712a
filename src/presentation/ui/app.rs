//! Main application orchestrator.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, MouseEvent, MouseEventKind};
use futures_util::StreamExt;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout},
};
use tokio::sync::watch;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::application::services::{DashboardStore, NotificationManager};
use crate::application::use_cases::{AddWidgetUseCase, EditWidgetUseCase, RemoveWidgetUseCase};
use crate::domain::entities::{CategoryId, DashboardState, WidgetId};
use crate::domain::errors::DashboardError;
use crate::domain::keybinding::Action;
use crate::infrastructure::config::{AppConfig, UiConfig};
use crate::presentation::commands::{CommandRegistry, HasCommands};
use crate::presentation::events::{EventResult, is_force_quit_event, is_press};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{
    FocusContext, FooterBar, FooterBarStyle, HeaderBar, HeaderBarStyle, ViewTab,
};

use super::dashboard_view::{DashboardScreen, DashboardView};
use super::notification_popup::NotificationPopup;
use super::search_view::{SearchScreen, SearchView};
use super::widget_form::{FormAction, FormSubmission, WidgetForm};

const TITLE: &str = "CNAPP Dashboard";
const TICK_RATE: Duration = Duration::from_millis(250);

pub struct App {
    store: DashboardStore,
    changes: watch::Receiver<Arc<DashboardState>>,
    state: Arc<DashboardState>,
    tab: ViewTab,
    dashboard: DashboardView,
    search: SearchView,
    form: Option<WidgetForm>,
    notifications: NotificationManager,
    commands: CommandRegistry,
    theme: Theme,
    ui: UiConfig,
    running: bool,
}

impl App {
    #[must_use]
    pub fn new(store: DashboardStore, config: &AppConfig) -> Self {
        let theme = Theme::new(&config.theme.accent_color);
        let changes = store.subscribe();
        let state = store.snapshot();

        let mut dashboard = DashboardView::new();
        dashboard.sync(&state);
        let mut search = SearchView::new(&theme);
        search.refresh(&store);

        let notifications =
            NotificationManager::new(Duration::from_secs(config.ui.notification_duration))
                .enabled(config.ui.notifications);

        Self {
            store,
            changes,
            state,
            tab: ViewTab::Dashboard,
            dashboard,
            search,
            form: None,
            notifications,
            commands: CommandRegistry::new(),
            theme,
            ui: config.ui.clone(),
            running: true,
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut tick = interval(TICK_RATE);

        info!(
            widgets = self.state.total_widgets(),
            categories = self.state.categories().len(),
            "Dashboard opened"
        );
        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                biased;

                Ok(()) = self.changes.changed() => {
                    self.on_state_changed();
                    terminal.draw(|frame| self.render(frame))?;
                }

                Some(event) = terminal_events.next() => {
                    match event {
                        Ok(event) => {
                            if self.handle_terminal_event(event).await == EventResult::Exit {
                                self.running = false;
                            }
                        }
                        Err(e) => {
                            error!(error = %e, "Terminal event stream failed");
                            self.running = false;
                        }
                    }
                    terminal.draw(|frame| self.render(frame))?;
                }

                _ = tick.tick() => {
                    let had_toast = self.notifications.current().is_some();
                    self.notifications.tick();
                    if had_toast {
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }
            }
        }

        info!("Application exiting normally");
        Ok(())
    }

    fn on_state_changed(&mut self) {
        self.state = self.changes.borrow_and_update().clone();
        debug!(widgets = self.state.total_widgets(), "Dashboard state changed");
        self.dashboard.sync(&self.state);
        self.search.refresh(&self.store);
    }

    async fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if is_press(&key) => self.handle_key(key).await,
            Event::Mouse(mouse) if self.ui.mouse => {
                self.handle_mouse(mouse);
                EventResult::Consumed
            }
            _ => EventResult::Continue,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.form.is_some() {
            return;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => self.navigate(Action::NavigateUp),
            MouseEventKind::ScrollDown => self.navigate(Action::NavigateDown),
            _ => {}
        }
    }

    const fn focus_context(&self) -> FocusContext {
        if self.form.is_some() {
            return FocusContext::Form;
        }
        match self.tab {
            ViewTab::Dashboard => FocusContext::Dashboard,
            ViewTab::Search => FocusContext::Search,
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if let Some(form) = self.form.as_mut() {
            match form.handle_key(key) {
                FormAction::Cancel => self.form = None,
                FormAction::Submit(submission) => self.submit_form(submission).await,
                FormAction::None => {}
            }
            return EventResult::Consumed;
        }

        if is_force_quit_event(&key) {
            return EventResult::Exit;
        }

        let context = self.focus_context();
        let Some(action) = self.commands.find_action(context, key) else {
            if context == FocusContext::Search && self.search.handle_key(key) {
                self.search.refresh(&self.store);
            }
            return EventResult::Continue;
        };

        match action {
            Action::Quit => {
                if context == FocusContext::Search && !self.search.term().is_empty() {
                    self.search.clear();
                    self.search.refresh(&self.store);
                } else {
                    return EventResult::Exit;
                }
            }
            Action::SwitchView => self.switch_view(self.tab.toggle()),
            Action::FocusSearch => self.switch_view(ViewTab::Search),
            Action::NavigateUp
            | Action::NavigateDown
            | Action::NextCategory
            | Action::PreviousCategory => self.navigate(action),
            Action::AddWidget => self.open_add_form(),
            Action::EditWidget => self.open_edit_form(),
            Action::DeleteWidget => {
                if let Some((category_id, widget_id)) = self.selected_ids() {
                    self.remove_widget(category_id, widget_id).await;
                }
            }
        }
        EventResult::Consumed
    }

    fn switch_view(&mut self, tab: ViewTab) {
        self.tab = tab;
        if tab == ViewTab::Search {
            self.search.refresh(&self.store);
        }
    }

    fn navigate(&mut self, action: Action) {
        match (self.tab, action) {
            (ViewTab::Dashboard, Action::NavigateUp) => self.dashboard.select_previous(&self.state),
            (ViewTab::Dashboard, Action::NavigateDown) => self.dashboard.select_next(&self.state),
            (ViewTab::Dashboard, Action::NextCategory) => {
                self.dashboard.next_category(&self.state);
            }
            (ViewTab::Dashboard, Action::PreviousCategory) => {
                self.dashboard.previous_category(&self.state);
            }
            (ViewTab::Search, Action::NavigateUp) => self.search.select_previous(),
            (ViewTab::Search, Action::NavigateDown) => self.search.select_next(),
            _ => {}
        }
    }

    fn selected_ids(&self) -> Option<(CategoryId, WidgetId)> {
        match self.tab {
            ViewTab::Dashboard => self
                .dashboard
                .selected_widget(&self.state)
                .map(|(category, widget)| (category.id().clone(), widget.id().clone())),
            ViewTab::Search => self
                .search
                .selected()
                .map(|entry| (entry.category_id.clone(), entry.widget.id().clone())),
        }
    }

    fn open_add_form(&mut self) {
        let preselected = self
            .dashboard
            .focused_category(&self.state)
            .map(|c| c.id().clone());
        self.form = Some(WidgetForm::add(
            self.state.categories(),
            preselected.as_ref(),
            &self.theme,
        ));
    }

    fn open_edit_form(&mut self) {
        let Some((category_id, widget_id)) = self.selected_ids() else {
            return;
        };
        let Some(widget) = self
            .state
            .category(&category_id)
            .and_then(|c| c.widget(&widget_id))
        else {
            return;
        };
        self.form = Some(WidgetForm::edit(
            self.state.categories(),
            &category_id,
            widget,
            &self.theme,
        ));
    }

    async fn submit_form(&mut self, submission: FormSubmission) {
        let (result, done) = match submission {
            FormSubmission::Add(request) => (
                AddWidgetUseCase::new(&mut self.store).execute(request).await,
                "Widget added",
            ),
            FormSubmission::Edit(request) => (
                EditWidgetUseCase::new(&mut self.store).execute(request).await,
                "Widget updated",
            ),
        };

        match result {
            Ok(id) => {
                info!(widget = %id, "{done}");
                self.form = None;
                self.notifications.success(done, format!("Saved as {id}"));
            }
            Err(DashboardError::Validation(e)) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_error(e.to_string());
                }
            }
            Err(e) => {
                self.form = None;
                self.report_failure(&e);
            }
        }
    }

    async fn remove_widget(&mut self, category_id: CategoryId, widget_id: WidgetId) {
        match RemoveWidgetUseCase::new(&mut self.store)
            .execute(category_id, widget_id)
            .await
        {
            Ok(id) => {
                info!(widget = %id, "Widget removed");
                self.notifications.success("Widget removed", id.to_string());
            }
            Err(e) => self.report_failure(&e),
        }
    }

    fn report_failure(&mut self, error: &DashboardError) {
        if error.is_not_found() {
            warn!(error = %error, "Mutation ignored");
            self.notifications.warn("Nothing changed", error.to_string());
        } else {
            error!(error = %error, "Mutation failed");
            self.notifications
                .error("Failed to save dashboard", error.to_string());
        }
    }

    fn timestamp_format(&self) -> Option<&str> {
        self.ui
            .show_timestamps
            .then_some(self.ui.timestamp_format.as_str())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        frame.render_widget(
            HeaderBar::new(TITLE)
                .active(self.tab)
                .total_widgets(self.state.total_widgets())
                .style(HeaderBarStyle::from_theme(&self.theme)),
            layout[0],
        );

        let timestamps = self.timestamp_format();
        match self.tab {
            ViewTab::Dashboard => frame.render_widget(
                DashboardScreen::new(&self.state, &self.dashboard, &self.theme)
                    .timestamp_format(timestamps),
                layout[1],
            ),
            ViewTab::Search => frame.render_widget(
                SearchScreen::new(&self.search, &self.theme).timestamp_format(timestamps),
                layout[1],
            ),
        }

        let keybinds = match self.tab {
            ViewTab::Dashboard => self.dashboard.get_commands(&self.commands),
            ViewTab::Search => self.search.get_commands(&self.commands),
        };
        let storage = self.store.location();
        frame.render_widget(
            FooterBar::new(&keybinds)
                .focus_context(self.focus_context())
                .right_info(Some(storage.as_str()))
                .style(FooterBarStyle::from_theme(&self.theme)),
            layout[2],
        );

        if let Some(form) = self.form.as_mut() {
            form.render(area, frame.buffer_mut());
        }

        if let Some(notification) = self.notifications.current() {
            frame.render_widget(NotificationPopup::new(notification, &self.theme), area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MemoryStorage;
    use crossterm::event::{KeyCode, KeyModifiers};

    async fn app() -> (App, MemoryStorage) {
        let storage = MemoryStorage::new();
        let store = DashboardStore::open(Arc::new(storage.clone())).await;
        (App::new(store, &AppConfig::default()), storage)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_key(key(KeyCode::Char(c))).await;
        }
    }

    #[tokio::test]
    async fn test_add_widget_through_form() {
        let (mut app, storage) = app().await;

        app.handle_key(key(KeyCode::Char('a'))).await;
        type_str(&mut app, "Posture").await;
        app.handle_key(key(KeyCode::Tab)).await;
        type_str(&mut app, "All green").await;
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
            .await;

        assert!(app.form.is_none());
        assert_eq!(app.store.total_widgets(), 7);
        assert_eq!(storage.write_count(), 1);
        assert_eq!(app.notifications.current().unwrap().title, "Widget added");

        app.on_state_changed();
        let cspm = app.state.category(&CategoryId::from("cspm")).unwrap();
        assert_eq!(cspm.widgets().last().unwrap().name(), "Posture");
    }

    #[tokio::test]
    async fn test_blank_name_keeps_form_open() {
        let (mut app, storage) = app().await;

        app.handle_key(key(KeyCode::Char('a'))).await;
        app.handle_key(key(KeyCode::Enter)).await;

        let form = app.form.as_ref().unwrap();
        assert_eq!(form.error(), Some("Widget Name is required!"));
        assert_eq!(storage.write_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_selected_widget() {
        let (mut app, _storage) = app().await;

        app.handle_key(key(KeyCode::Char('d'))).await;
        app.on_state_changed();

        assert_eq!(app.state.total_widgets(), 5);
        assert!(!app.state.contains_widget(&WidgetId::from("w1")));
        assert_eq!(app.dashboard.widget_index(), Some(0));
    }

    #[tokio::test]
    async fn test_search_then_ctrl_d_deletes_match() {
        let (mut app, _storage) = app().await;

        app.handle_key(key(KeyCode::Tab)).await;
        assert_eq!(app.tab, ViewTab::Search);
        type_str(&mut app, "workload").await;
        assert_eq!(app.search.results().len(), 1);

        app.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL))
            .await;
        app.on_state_changed();

        assert!(!app.state.contains_widget(&WidgetId::from("w4")));
        assert!(app.search.results().is_empty());
    }

    #[tokio::test]
    async fn test_escape_in_search_clears_before_quitting() {
        let (mut app, _storage) = app().await;
        app.handle_key(key(KeyCode::Char('/'))).await;
        type_str(&mut app, "q").await;

        assert_eq!(app.handle_key(key(KeyCode::Esc)).await, EventResult::Consumed);
        assert!(app.search.term().is_empty());
        assert_eq!(app.handle_key(key(KeyCode::Esc)).await, EventResult::Exit);
    }

    #[tokio::test]
    async fn test_edit_selected_widget() {
        let (mut app, _storage) = app().await;

        app.handle_key(key(KeyCode::Char('e'))).await;
        app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL))
            .await;
        type_str(&mut app, "Accounts").await;
        app.handle_key(key(KeyCode::Enter)).await;
        app.on_state_changed();

        let (_, widget) = app.dashboard.selected_widget(&app.state).unwrap();
        assert_eq!(widget.name(), "Accounts");
        assert_eq!(widget.text(), "Total: 2 Connected (2)");
    }
}
