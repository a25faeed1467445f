//! Helpers shared by the fulfiller selector crates: translated strings and
//! log redaction.

pub mod i18n;
pub mod language;
pub mod redact;

pub use i18n::{Localizer, LocalizerError};
pub use language::Language;
pub use redact::redact_sensitive;
