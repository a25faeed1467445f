//! UI components.

pub mod component;
pub mod selector;

pub use component::Component;
pub use selector::SelectorComponent;
