//! Terminal rendering and the runtime that drives the selector.

pub mod components;
pub mod runtime;
pub mod theme;
