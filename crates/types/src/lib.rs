//! Shared data model for the fulfiller selector.
//!
//! The types here do no I/O: the API crate produces and
//! consumes them over HTTP, and the TUI crate renders and orders them.

use std::{error::Error, str::FromStr};

pub mod collation;
pub mod display;
pub mod fulfiller;
pub mod recency;
pub mod settings;

pub use collation::{compare_names, sort_by_name};
pub use display::DisplayFlags;
pub use fulfiller::{CompositeKey, Fulfiller, FulfillerCatalog};
pub use recency::{DEFAULT_RECENT_LIMIT, RecencyList};
pub use settings::{SettingsUpdate, UserSettings};

/// Remote services the selector talks to.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Default)]
pub enum ServiceId {
    #[default]
    FulfillerIdentity, // https://fulfilleridentity.trdlnk.cimpress.io
    Customizr,         // https://customizr.at.cimpress.io
}

impl ToServiceIdInfo for ServiceId {
    fn env_var(&self) -> &str {
        match self {
            Self::FulfillerIdentity => "FULFILLER_IDENTITY_URL",
            Self::Customizr => "CUSTOMIZR_URL",
        }
    }
    fn default_base_url(&self) -> &str {
        match self {
            Self::FulfillerIdentity => "https://fulfilleridentity.trdlnk.cimpress.io",
            Self::Customizr => "https://customizr.at.cimpress.io",
        }
    }
    fn accept_headers(&self) -> &str {
        "application/json"
    }
}

impl FromStr for ServiceId {
    type Err = ParseServiceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fulfiller-identity" => Ok(Self::FulfillerIdentity),
            "customizr" => Ok(Self::Customizr),
            _ => Err(ParseServiceIdError),
        }
    }
}

pub trait ToServiceIdInfo {
    fn env_var(&self) -> &str;
    fn default_base_url(&self) -> &str;
    fn accept_headers(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseServiceIdError;

impl std::fmt::Display for ParseServiceIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid service id; expected 'fulfiller-identity' or 'customizr'")
    }
}

impl Error for ParseServiceIdError {}
