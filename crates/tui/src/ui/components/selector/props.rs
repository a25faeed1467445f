//! Host-facing configuration of the selector.

use std::fmt;
use std::sync::Arc;

use fulfillers_types::{DEFAULT_RECENT_LIMIT, DisplayFlags, Fulfiller};

/// Language used when the host does not pick one.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Payload handed to the host when the user picks a fulfiller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    pub value: Fulfiller,
}

/// Callback invoked synchronously on every selection.
pub type SelectionCallback = Arc<dyn Fn(&SelectionEvent) + Send + Sync>;

/// Inputs supplied by the host application.
///
/// Either an access token (the selector loads fulfillers itself) or a list
/// of fulfillers must be given for the selector to show anything useful.
#[derive(Clone)]
pub struct SelectorProps {
    pub access_token: Option<String>,
    /// Pre-fetched fulfillers; when present the mount does not fetch.
    pub fulfillers: Option<Vec<Fulfiller>>,
    pub include_archived: bool,
    pub display: DisplayFlags,
    pub language: String,
    /// Overrides the translated field label.
    pub label: Option<String>,
    pub on_change: Option<SelectionCallback>,
    /// Maximum number of recently used ids kept in user settings.
    pub recent_limit: usize,
}

impl Default for SelectorProps {
    fn default() -> Self {
        Self {
            access_token: None,
            fulfillers: None,
            include_archived: false,
            display: DisplayFlags::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            label: None,
            on_change: None,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl fmt::Debug for SelectorProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectorProps")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("fulfillers", &self.fulfillers.as_ref().map(Vec::len))
            .field("include_archived", &self.include_archived)
            .field("display", &self.display)
            .field("language", &self.language)
            .field("label", &self.label)
            .field("on_change", &self.on_change.is_some())
            .field("recent_limit", &self.recent_limit)
            .finish()
    }
}

impl SelectorProps {
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    pub fn with_fulfillers(mut self, fulfillers: Vec<Fulfiller>) -> Self {
        self.fulfillers = Some(fulfillers);
        self
    }

    pub fn include_archived(mut self, include_archived: bool) -> Self {
        self.include_archived = include_archived;
        self
    }

    pub fn with_display(mut self, display: DisplayFlags) -> Self {
        self.display = display;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn on_change(mut self, callback: impl Fn(&SelectionEvent) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(callback));
        self
    }

    pub fn with_recent_limit(mut self, recent_limit: usize) -> Self {
        self.recent_limit = recent_limit;
        self
    }

    /// Token to authenticate with, ignoring blank strings.
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|token| !token.trim().is_empty())
    }
}
