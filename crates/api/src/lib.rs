//! Clients for the two remote services the fulfiller selector depends on.
//!
//! - [`FulfillerIdentityClient`] lists fulfillers from the fulfiller identity
//!   directory, optionally including archived ones.
//! - [`CustomizrClient`] reads and merge-writes the per-user settings
//!   document that holds the recently-used fulfiller ids.
//!
//! Both are reached through traits ([`FulfillerDirectory`],
//! [`UserSettingsStore`]) so the selector can be driven by in-memory
//! implementations in tests or offline hosts.
//!
//! Base URLs come from `FULFILLER_IDENTITY_URL` and `CUSTOMIZR_URL` (falling
//! back to the public endpoints) and are validated: non-local hosts must use
//! HTTPS and live under an allowed domain.
//!
//! # Example
//!
//! ```ignore
//! use fulfillers_api::{FetchOptions, FulfillerDirectory, FulfillerIdentityClient};
//!
//! async fn names(token: &str) -> Result<Vec<String>, fulfillers_api::DirectoryError> {
//!     let directory = FulfillerIdentityClient::from_env()?;
//!     let catalog = directory.fetch_fulfillers(token, FetchOptions::default()).await?;
//!     Ok(catalog.iter().map(|f| f.name.clone()).collect())
//! }
//! ```

pub mod client;
pub mod directory;
pub mod error;
pub mod settings;

pub use client::{ApiClient, ApiConfig};
pub use directory::{FetchOptions, FulfillerDirectory, FulfillerIdentityClient};
pub use error::{ApiConfigError, DirectoryError, SettingsError};
pub use settings::{CustomizrClient, InMemorySettingsStore, UserSettingsStore};
