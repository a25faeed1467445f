//! Theme roles and helpers for the selector's terminal rendering.

pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use nord::NordTheme;
pub use roles::{Theme, ThemeRoles};
