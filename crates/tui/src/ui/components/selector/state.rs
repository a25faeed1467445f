use fulfillers_types::{CompositeKey, Fulfiller, FulfillerCatalog, RecencyList};
use ratatui::widgets::ListState;

use super::lookup::FulfillerLookup;

/// Where the catalog load stands.
///
/// A failed load still ends in `Ready`; the failure is carried by the
/// catalog's single synthetic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Uninitialized,
    Loading,
    Ready,
}

/// Local state of one selector instance.
#[derive(Debug, Default)]
pub struct SelectorState {
    phase: LoadPhase,
    /// Fulfillers supplied by the host, sorted.
    host: Option<FulfillerCatalog>,
    /// Result of the latest accepted fetch.
    fetched: Option<FulfillerCatalog>,
    lookup: FulfillerLookup,
    selected: Option<CompositeKey>,
    selected_id: Option<String>,
    recency: RecencyList,
    query: String,
    list_state: ListState,
    /// Incremented for every fetch started and every reset so that only
    /// the latest request may land.
    catalog_sequence: u64,
    /// Same scheme for recency reads and updates.
    recency_sequence: u64,
}

impl SelectorState {
    pub fn new(host: Option<Vec<Fulfiller>>) -> Self {
        let mut state = Self::default();
        state.set_host_fulfillers(host);
        state
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_fetching(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// The catalog to show: the latest fetch, else the host's fulfillers.
    pub fn catalog(&self) -> Option<&FulfillerCatalog> {
        self.fetched.as_ref().or(self.host.as_ref())
    }

    pub fn lookup(&self) -> &FulfillerLookup {
        &self.lookup
    }

    pub fn set_host_fulfillers(&mut self, host: Option<Vec<Fulfiller>>) {
        self.host = host.map(FulfillerCatalog::new);
        if self.host.is_some() && self.phase == LoadPhase::Uninitialized {
            self.phase = LoadPhase::Ready;
        }
        self.rebuild_lookup();
    }

    /// Start a fetch and return its sequence number.
    pub fn begin_fetch(&mut self) -> u64 {
        self.catalog_sequence += 1;
        self.phase = LoadPhase::Loading;
        self.catalog_sequence
    }

    pub fn is_current_fetch(&self, sequence: u64) -> bool {
        sequence == self.catalog_sequence
    }

    pub fn apply_catalog(&mut self, catalog: FulfillerCatalog) {
        self.fetched = Some(catalog);
        self.phase = LoadPhase::Ready;
        self.rebuild_lookup();
        self.clamp_highlight();
    }

    /// Replace the catalog with a single entry carrying `message`.
    pub fn apply_catalog_error(&mut self, message: impl Into<String>) {
        self.apply_catalog(FulfillerCatalog::load_error(message));
    }

    /// Forget the fetched catalog and invalidate any fetch in flight.
    pub fn reset_catalog(&mut self) {
        self.catalog_sequence += 1;
        self.fetched = None;
        self.phase = if self.host.is_some() { LoadPhase::Ready } else { LoadPhase::Uninitialized };
        self.rebuild_lookup();
        self.clamp_highlight();
    }

    fn rebuild_lookup(&mut self) {
        let host = self.host.as_ref().map(FulfillerCatalog::entries);
        self.lookup.rebuild(host, self.fetched.as_ref());
    }

    pub fn select(&mut self, fulfiller: &Fulfiller) {
        self.selected = Some(fulfiller.composite_key());
        self.selected_id = Some(fulfiller.fulfiller_id.clone());
    }

    pub fn selected_key(&self) -> Option<&CompositeKey> {
        self.selected.as_ref()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// The selected fulfiller, if it is still in the lookup.
    pub fn selected(&self) -> Option<&Fulfiller> {
        self.selected.as_ref().and_then(|key| self.lookup.resolve(key))
    }

    pub fn recency(&self) -> &RecencyList {
        &self.recency
    }

    pub fn set_recency(&mut self, recency: RecencyList) {
        self.recency = recency;
    }

    pub fn begin_recency_request(&mut self) -> u64 {
        self.recency_sequence += 1;
        self.recency_sequence
    }

    pub fn is_current_recency(&self, sequence: u64) -> bool {
        sequence == self.recency_sequence
    }

    /// Forget the cached list and invalidate requests in flight.
    pub fn reset_recency(&mut self) {
        self.recency_sequence += 1;
        self.recency = RecencyList::default();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
        self.list_state.select(Some(0));
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.list_state.select(Some(0));
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.list_state.select(Some(0));
    }

    pub fn highlighted(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    /// Move the highlight by `delta`, wrapping within `len` rows.
    pub fn move_highlight(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let len = len as isize;
        let next = (self.highlighted() as isize + delta).rem_euclid(len);
        self.list_state.select(Some(next as usize));
    }

    pub fn list_state_mut(&mut self) -> &mut ListState {
        &mut self.list_state
    }

    fn clamp_highlight(&mut self) {
        let len = self.catalog().map_or(1, |catalog| catalog.len().max(1));
        if self.highlighted() >= len {
            self.list_state.select(Some(0));
        }
    }
}
