//! Component abstraction for terminal rendering.
//!
//! Components hold only view-local state. They read and mutate the
//! [`FulfillerSelect`] they are handed, and report side effects as
//! [`Effect`]s for the command layer to execute.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::app::{Effect, FulfillerSelect};

pub trait Component {
    /// Handle a key while the component has focus.
    fn handle_key_events(&mut self, _app: &mut FulfillerSelect, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Draw the component into `rect`.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut FulfillerSelect);
}
