//! Per-user settings storage.
//!
//! The selector keeps its recently-used fulfiller ids in a settings
//! document owned by a remote service and keyed by the caller's access
//! token. Writes are partial: only the fields present in a
//! [`SettingsUpdate`] are merged into the stored document.

use std::collections::HashMap;
use std::env;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use fulfillers_types::{ServiceId, SettingsUpdate, UserSettings};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::client::{ApiClient, ApiConfig};
use crate::error::{HttpFailure, SettingsError};

/// Environment variable overriding the settings resource id.
pub const RESOURCE_ENV: &str = "CUSTOMIZR_RESOURCE";
/// Resource the selector's settings are stored under.
pub const DEFAULT_RESOURCE: &str = "https://trdlnk.cimpress.io";

// Same characters JavaScript's encodeURIComponent leaves alone.
const RESOURCE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Read and merge-write access to a user's settings document.
///
/// Neither call retries, and implementations do not cache: freshness policy
/// belongs to the caller.
#[async_trait]
pub trait UserSettingsStore: Send + Sync {
    async fn get_settings(&self, access_token: &str) -> Result<UserSettings, SettingsError>;

    async fn put_settings(&self, access_token: &str, update: &SettingsUpdate) -> Result<(), SettingsError>;
}

/// HTTP client for the Customizr settings service.
#[derive(Debug, Clone)]
pub struct CustomizrClient {
    client: ApiClient,
    resource: String,
}

impl CustomizrClient {
    pub fn new(config: &ApiConfig, resource: impl Into<String>) -> Result<Self, SettingsError> {
        Ok(Self {
            client: ApiClient::new(config)?,
            resource: resource.into(),
        })
    }

    /// Configure from `CUSTOMIZR_URL` and `CUSTOMIZR_RESOURCE`.
    pub fn from_env() -> Result<Self, SettingsError> {
        let resource = env::var(RESOURCE_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RESOURCE.to_string());
        Self::new(&ApiConfig::from_env(ServiceId::Customizr), resource)
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    fn settings_path(&self) -> String {
        format!("/v1/resources/{}/settings", utf8_percent_encode(&self.resource, RESOURCE_ENCODE_SET))
    }
}

#[async_trait]
impl UserSettingsStore for CustomizrClient {
    async fn get_settings(&self, access_token: &str) -> Result<UserSettings, SettingsError> {
        let response = self
            .client
            .request(Method::GET, &self.settings_path(), access_token)
            .send()
            .await
            .map_err(HttpFailure::from_reqwest)?;

        // No document has been written for this user yet.
        if response.status() == StatusCode::NOT_FOUND {
            debug!(resource = %self.resource, "no settings stored yet");
            return Ok(UserSettings::default());
        }
        if !response.status().is_success() {
            return Err(HttpFailure::from_response(response).await.into());
        }

        let text = response.text().await.map_err(HttpFailure::from_reqwest)?;
        if text.trim().is_empty() {
            return Ok(UserSettings::default());
        }
        serde_json::from_str(&text).map_err(|err| SettingsError::Decode(err.to_string()))
    }

    async fn put_settings(&self, access_token: &str, update: &SettingsUpdate) -> Result<(), SettingsError> {
        let response = self
            .client
            .request(Method::PUT, &self.settings_path(), access_token)
            .json(update)
            .send()
            .await
            .map_err(HttpFailure::from_reqwest)?;

        if !response.status().is_success() {
            return Err(HttpFailure::from_response(response).await.into());
        }
        Ok(())
    }
}

/// Process-local store with the same merge semantics as the remote service.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    documents: Mutex<HashMap<String, UserSettings>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the document for `access_token`.
    pub fn with_settings(mut self, access_token: impl Into<String>, settings: UserSettings) -> Self {
        self.documents
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(access_token.into(), settings);
        self
    }

    // Every write leaves the map consistent, so a poisoned lock is recovered.
    fn documents(&self) -> MutexGuard<'_, HashMap<String, UserSettings>> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserSettingsStore for InMemorySettingsStore {
    async fn get_settings(&self, access_token: &str) -> Result<UserSettings, SettingsError> {
        Ok(self.documents().get(access_token).cloned().unwrap_or_default())
    }

    async fn put_settings(&self, access_token: &str, update: &SettingsUpdate) -> Result<(), SettingsError> {
        let mut documents = self.documents();
        update.apply_to(documents.entry(access_token.to_string()).or_default());
        Ok(())
    }
}
