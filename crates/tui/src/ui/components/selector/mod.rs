//! The fulfiller selector: props, option building and its terminal view.

mod lookup;
mod options;
mod props;
mod reconcile;
mod selector_component;
mod state;
mod title;

pub use lookup::FulfillerLookup;
pub use options::{OptionItem, OptionKind, build_options, matches_query};
pub use props::{DEFAULT_LANGUAGE, SelectionCallback, SelectionEvent, SelectorProps};
pub use reconcile::{Trigger, on_mount, reconcile};
pub use selector_component::SelectorComponent;
pub use state::{LoadPhase, SelectorState};
pub use title::{LabelContext, TitleShape, get_title, line_text};
