//! # Fulfiller Selector
//!
//! A searchable terminal selector for fulfillers, built on Ratatui.
//!
//! ## Key Features
//!
//! - Loads the fulfiller catalog from the directory service, or shows the
//!   fulfillers the host passes in
//! - Labels built from name, id and internal id in seven layouts, plus a
//!   translated placeholder when no field is enabled
//! - Free-text filtering with keyboard navigation
//! - Per-user recently used fulfillers kept in the settings service
//! - Localized labels and placeholders
//!
//! ## Architecture
//!
//! State updates are pure: [`FulfillerSelect`] returns [`Effect`]s, the
//! command layer runs them as Tokio tasks and the results come back as
//! [`Msg`]s tagged with the mount they belong to. [`SelectorHost`] ties the
//! two together for embedding.

mod app;
mod cmd;
mod ui;

pub use app::{Effect, FulfillerSelect, MountToken, Msg, SelectorError};
pub use cmd::{Services, run_effects};
pub use ui::components::selector::{
    DEFAULT_LANGUAGE, LabelContext, LoadPhase, OptionItem, OptionKind, SelectionCallback, SelectionEvent, SelectorProps, TitleShape,
    get_title,
};
pub use ui::components::{Component, SelectorComponent};
pub use ui::runtime::SelectorHost;
pub use ui::theme::{NordTheme, Theme, ThemeRoles};
