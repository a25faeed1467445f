//! Runtime: drives a selector and executes its effects.
//!
//! [`SelectorHost`] is the embedding surface. It owns the selector, its
//! component and the channel effects report back on, so a host only feeds
//! it props, keys and frames and awaits [`SelectorHost::next_message`]
//! from its own event loop.

use std::sync::Arc;

use crossterm::event::KeyEvent;
use fulfillers_types::CompositeKey;
use fulfillers_util::Localizer;
use ratatui::{Frame, layout::Rect};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::app::{Effect, FulfillerSelect, Msg, SelectorError};
use crate::cmd::{Services, run_effects};
use crate::ui::components::{Component, SelectorComponent};
use crate::ui::components::selector::SelectorProps;

/// A mounted selector wired to its services.
pub struct SelectorHost {
    select: FulfillerSelect,
    component: SelectorComponent,
    services: Services,
    sender: mpsc::UnboundedSender<Msg>,
    receiver: mpsc::UnboundedReceiver<Msg>,
    in_flight: usize,
}

impl SelectorHost {
    pub fn new(props: SelectorProps, services: Services, localizer: Arc<Localizer>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            select: FulfillerSelect::new(props, localizer),
            component: SelectorComponent::new(),
            services,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    pub fn select(&self) -> &FulfillerSelect {
        &self.select
    }

    /// Mount (or remount) the selector and start its loads.
    pub fn mount(&mut self) -> Vec<JoinHandle<()>> {
        let effects = self.select.mount();
        self.dispatch(effects)
    }

    pub fn unmount(&mut self) {
        self.select.unmount();
    }

    pub fn set_props(&mut self, props: SelectorProps) -> Vec<JoinHandle<()>> {
        let effects = self.select.set_props(props);
        self.dispatch(effects)
    }

    pub fn choose(&mut self, key: &CompositeKey) -> Result<Vec<JoinHandle<()>>, SelectorError> {
        let effects = self.select.select(key)?;
        Ok(self.dispatch(effects))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<JoinHandle<()>> {
        let effects = self.component.handle_key_events(&mut self.select, key);
        self.dispatch(effects)
    }

    pub fn render(&mut self, frame: &mut Frame, rect: Rect) {
        self.component.render(frame, rect, &mut self.select);
    }

    /// Whether results are still expected.
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Wait for the next effect result and apply it. Returns `false` when
    /// nothing is in flight.
    pub async fn next_message(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        let Some(msg) = self.receiver.recv().await else {
            return false;
        };
        self.apply(msg);
        true
    }

    /// Apply results until nothing is in flight.
    pub async fn settle(&mut self) {
        while self.next_message().await {}
    }

    fn apply(&mut self, msg: Msg) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let effects = self.select.update(msg);
        self.dispatch(effects);
    }

    fn dispatch(&mut self, effects: Vec<Effect>) -> Vec<JoinHandle<()>> {
        let handles = run_effects(&self.services, &self.sender, effects);
        self.in_flight += handles.len();
        handles
    }
}
