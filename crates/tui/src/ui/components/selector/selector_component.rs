use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{ListItem, Paragraph},
};

use crate::app::{Effect, FulfillerSelect};
use crate::ui::components::component::Component;
use crate::ui::theme::theme_helpers as th;

/// Searchable dropdown over the fulfiller options.
///
/// The first row is the filter query (or the current selection while the
/// query is empty); the rest is the option list.
#[derive(Debug)]
pub struct SelectorComponent {
    focused: bool,
}

impl Default for SelectorComponent {
    fn default() -> Self {
        Self { focused: true }
    }
}

impl SelectorComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn select_highlighted(&self, app: &mut FulfillerSelect) -> Vec<Effect> {
        let options = app.options();
        let Some(option) = options.get(app.state().highlighted()) else {
            return Vec::new();
        };
        let Some(key) = option.value.as_ref().filter(|_| option.is_actionable()) else {
            return Vec::new();
        };
        // Resolution failures are logged by `select`.
        app.select(key).unwrap_or_default()
    }
}

impl Component for SelectorComponent {
    fn handle_key_events(&mut self, app: &mut FulfillerSelect, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                app.state_mut().push_query_char(c);
            }
            KeyCode::Backspace => app.state_mut().pop_query_char(),
            KeyCode::Esc => app.state_mut().clear_query(),
            KeyCode::Up => {
                let len = app.options().len();
                app.state_mut().move_highlight(-1, len);
            }
            KeyCode::Down => {
                let len = app.options().len();
                app.state_mut().move_highlight(1, len);
            }
            KeyCode::Enter => return self.select_highlighted(app),
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut FulfillerSelect) {
        let label = app.label();
        let options = app.options();
        let theme = app.theme();

        let block = th::block(theme, Some(label.as_str()), self.focused);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let [query_area, list_area] = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(inner);

        let query = app.state().query();
        let query_line = if !query.is_empty() {
            Line::from(vec![
                Span::styled("/ ", theme.text_muted_style()),
                Span::styled(query.to_string(), theme.text_primary_style()),
            ])
        } else if let Some(selected) = app.state().selected_key() {
            options
                .iter()
                .find(|option| option.value.as_ref() == Some(selected))
                .map(|option| option.label.clone())
                .unwrap_or_default()
        } else {
            Line::from(Span::styled("/", theme.text_muted_style()))
        };
        frame.render_widget(Paragraph::new(query_line), query_area);

        let items: Vec<ListItem<'static>> = options.into_iter().map(|option| ListItem::new(option.label)).collect();
        let list = th::list_with_highlight(items, theme, None);
        let list_state = app.state_mut().list_state_mut();
        if list_state.selected().is_none() {
            list_state.select(Some(0));
        }
        frame.render_stateful_widget(list, list_area, list_state);
    }
}
