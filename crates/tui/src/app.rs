//! Selector state and the pure update logic around it.
//!
//! [`FulfillerSelect`] owns the props and local state of one selector. Its
//! methods never perform I/O: they mutate state and return [`Effect`]s that
//! the command layer executes. Results come back as [`Msg`]s tagged with
//! the [`MountToken`] of the mount that asked for them.

use std::sync::Arc;

use fulfillers_api::{DirectoryError, SettingsError};
use fulfillers_types::{CompositeKey, Fulfiller, FulfillerCatalog, RecencyList};
use fulfillers_util::Localizer;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::ui::components::selector::{
    LabelContext, LoadPhase, OptionItem, SelectionEvent, SelectorProps, SelectorState, Trigger, build_options, on_mount,
    reconcile,
};
use crate::ui::theme::{NordTheme, Theme};

/// Identifies one mount of a selector. Results carrying any other token
/// belong to a previous mount and are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountToken(u64);

/// Side effects requested by the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Load the catalog from the directory.
    FetchCatalog {
        mount: MountToken,
        sequence: u64,
        access_token: String,
        include_archived: bool,
    },
    /// Load the user's recently used fulfiller ids.
    LoadRecency {
        mount: MountToken,
        sequence: u64,
        access_token: String,
    },
    /// Reload the recency list, promote `fulfiller_id` and persist it.
    UpdateRecency {
        mount: MountToken,
        sequence: u64,
        access_token: String,
        fulfiller_id: String,
        limit: usize,
    },
}

/// Results of effects, delivered back to the selector.
#[derive(Debug)]
pub enum Msg {
    CatalogLoaded {
        mount: MountToken,
        sequence: u64,
        result: Result<FulfillerCatalog, DirectoryError>,
    },
    RecencyLoaded {
        mount: MountToken,
        sequence: u64,
        access_token: String,
        result: Result<RecencyList, SettingsError>,
    },
    RecencyUpdated {
        mount: MountToken,
        sequence: u64,
        access_token: String,
        result: Result<RecencyList, SettingsError>,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("option '{0}' does not resolve to a known fulfiller")]
    UnresolvedOption(CompositeKey),
}

/// One selector instance.
pub struct FulfillerSelect {
    props: SelectorProps,
    state: SelectorState,
    localizer: Arc<Localizer>,
    theme: Arc<dyn Theme>,
    mount: Option<MountToken>,
    generation: u64,
}

impl FulfillerSelect {
    pub fn new(props: SelectorProps, localizer: Arc<Localizer>) -> Self {
        let state = SelectorState::new(props.fulfillers.clone());
        Self {
            props,
            state,
            localizer,
            theme: Arc::new(NordTheme::new()),
            mount: None,
            generation: 0,
        }
    }

    pub fn with_theme(mut self, theme: Arc<dyn Theme>) -> Self {
        self.theme = theme;
        self
    }

    pub fn props(&self) -> &SelectorProps {
        &self.props
    }

    pub fn state(&self) -> &SelectorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SelectorState {
        &mut self.state
    }

    pub fn theme(&self) -> &dyn Theme {
        self.theme.as_ref()
    }

    pub fn mount_token(&self) -> Option<MountToken> {
        self.mount
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    /// Start a new mount and return the loads it needs.
    pub fn mount(&mut self) -> Vec<Effect> {
        self.generation += 1;
        let mount = MountToken(self.generation);
        self.mount = Some(mount);
        debug!(generation = self.generation, props = ?self.props, "selector mounted");
        let triggers = on_mount(&self.props);
        self.apply_triggers(mount, triggers)
    }

    /// Drop the mount; results still in flight will be ignored.
    pub fn unmount(&mut self) {
        self.mount = None;
    }

    /// Replace the props and return the loads the change calls for.
    pub fn set_props(&mut self, next: SelectorProps) -> Vec<Effect> {
        let triggers = reconcile(&self.props, &next);
        if next.fulfillers != self.props.fulfillers {
            self.state.set_host_fulfillers(next.fulfillers.clone());
        }
        if next.token() != self.props.token() {
            self.state.reset_recency();
        }
        self.props = next;

        match self.mount {
            Some(mount) => self.apply_triggers(mount, triggers),
            None => Vec::new(),
        }
    }

    fn apply_triggers(&mut self, mount: MountToken, triggers: Vec<Trigger>) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(triggers.len());
        for trigger in triggers {
            match trigger {
                Trigger::FetchCatalog {
                    access_token,
                    include_archived,
                } => effects.push(Effect::FetchCatalog {
                    mount,
                    sequence: self.state.begin_fetch(),
                    access_token,
                    include_archived,
                }),
                Trigger::LoadRecency { access_token } => effects.push(Effect::LoadRecency {
                    mount,
                    sequence: self.state.begin_recency_request(),
                    access_token,
                }),
                Trigger::ResetCatalog => self.state.reset_catalog(),
            }
        }
        effects
    }

    /// Apply the result of an effect.
    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::CatalogLoaded { mount, sequence, result } => {
                if !self.is_current_mount(mount, "catalog") {
                    return Vec::new();
                }
                if !self.state.is_current_fetch(sequence) {
                    warn!(sequence, "dropping superseded catalog result");
                    return Vec::new();
                }
                match result {
                    Ok(catalog) => {
                        debug!(count = catalog.len(), "catalog loaded");
                        self.state.apply_catalog(catalog);
                    }
                    Err(err) => {
                        warn!(error = %err, "catalog load failed");
                        self.state.apply_catalog_error(err.message());
                    }
                }
            }
            Msg::RecencyLoaded {
                mount,
                sequence,
                access_token,
                result,
            }
            | Msg::RecencyUpdated {
                mount,
                sequence,
                access_token,
                result,
            } => {
                if !self.is_current_mount(mount, "recency") {
                    return Vec::new();
                }
                if self.props.token() != Some(access_token.as_str()) {
                    warn!("dropping recency result for a previous access token");
                    return Vec::new();
                }
                if !self.state.is_current_recency(sequence) {
                    warn!(sequence, "dropping superseded recency result");
                    return Vec::new();
                }
                match result {
                    Ok(list) => self.state.set_recency(list),
                    Err(err) => warn!(error = %err, "recency list unchanged"),
                }
            }
        }
        Vec::new()
    }

    fn is_current_mount(&self, mount: MountToken, what: &str) -> bool {
        if self.mount == Some(mount) {
            return true;
        }
        warn!(result = what, "dropping result for an inactive mount");
        false
    }

    /// Select the option whose value is `key`.
    ///
    /// The host callback runs before the recency update is requested. The
    /// load-error entry is inert.
    pub fn select(&mut self, key: &CompositeKey) -> Result<Vec<Effect>, SelectorError> {
        let Some(fulfiller) = self.state.lookup().resolve(key).cloned() else {
            error!(key = %key, "selected option is missing from the lookup");
            return Err(SelectorError::UnresolvedOption(key.clone()));
        };
        if fulfiller.is_load_error() {
            debug!("ignoring selection of the load error entry");
            return Ok(Vec::new());
        }

        self.state.select(&fulfiller);
        if let Some(callback) = &self.props.on_change {
            callback(&SelectionEvent {
                value: fulfiller.clone(),
            });
        }
        Ok(self.recency_effect(&fulfiller).into_iter().collect())
    }

    fn recency_effect(&mut self, fulfiller: &Fulfiller) -> Option<Effect> {
        let mount = self.mount?;
        let access_token = self.props.token()?.to_string();
        Some(Effect::UpdateRecency {
            mount,
            sequence: self.state.begin_recency_request(),
            access_token,
            fulfiller_id: fulfiller.fulfiller_id.clone(),
            limit: self.props.recent_limit,
        })
    }

    /// Field label: the host's override or the translated default.
    pub fn label(&self) -> String {
        match &self.props.label {
            Some(label) => label.clone(),
            None => self.localizer.translate("label", &self.props.language),
        }
    }

    pub fn options(&self) -> Vec<OptionItem> {
        let ctx = LabelContext {
            flags: self.props.display,
            localizer: &self.localizer,
            language: &self.props.language,
            theme: self.theme.as_ref(),
        };
        build_options(self.state.catalog(), self.state.is_fetching(), self.state.query(), &ctx)
    }

    pub fn phase(&self) -> LoadPhase {
        self.state.phase()
    }
}
