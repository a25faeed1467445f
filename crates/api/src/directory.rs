//! Fulfiller directory access.

use async_trait::async_trait;
use fulfillers_types::{Fulfiller, FulfillerCatalog, ServiceId};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::client::{ApiClient, ApiConfig};
use crate::error::{DirectoryError, HttpFailure};

/// Wrapper keys a directory response may nest its list under.
const RESPONSE_ARRAY_KEYS: &[&str] = &["fulfillers", "items", "results", "data"];

/// Parameters of a directory fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    pub include_archived: bool,
}

/// Read-only source of fulfillers. One attempt per call; retries and
/// fallbacks belong to the caller.
#[async_trait]
pub trait FulfillerDirectory: Send + Sync {
    async fn fetch_fulfillers(&self, access_token: &str, options: FetchOptions) -> Result<FulfillerCatalog, DirectoryError>;
}

/// HTTP client for the fulfiller identity service.
#[derive(Debug, Clone)]
pub struct FulfillerIdentityClient {
    client: ApiClient,
}

impl FulfillerIdentityClient {
    pub fn new(config: &ApiConfig) -> Result<Self, DirectoryError> {
        Ok(Self {
            client: ApiClient::new(config)?,
        })
    }

    /// Configure from `FULFILLER_IDENTITY_URL` and friends.
    pub fn from_env() -> Result<Self, DirectoryError> {
        Self::new(&ApiConfig::from_env(ServiceId::FulfillerIdentity))
    }
}

#[async_trait]
impl FulfillerDirectory for FulfillerIdentityClient {
    async fn fetch_fulfillers(&self, access_token: &str, options: FetchOptions) -> Result<FulfillerCatalog, DirectoryError> {
        let response = self
            .client
            .request(Method::GET, "/v1/fulfillers", access_token)
            .query(&[("showArchived", options.include_archived)])
            .send()
            .await
            .map_err(HttpFailure::from_reqwest)?;

        if !response.status().is_success() {
            return Err(HttpFailure::from_response(response).await.into());
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| DirectoryError::Decode(err.to_string()))?;
        let fulfillers = decode_fulfillers(payload)?;
        debug!(count = fulfillers.len(), include_archived = options.include_archived, "fetched fulfillers");
        Ok(FulfillerCatalog::new(fulfillers))
    }
}

/// Accept either a bare array or an object wrapping exactly one array.
fn decode_fulfillers(payload: Value) -> Result<Vec<Fulfiller>, DirectoryError> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let key = RESPONSE_ARRAY_KEYS
                .iter()
                .find(|key| map.get(**key).is_some_and(Value::is_array))
                .map(|key| key.to_string())
                .or_else(|| {
                    let mut arrays = map.iter().filter(|(_, value)| value.is_array()).map(|(key, _)| key.clone());
                    let first = arrays.next()?;
                    arrays.next().is_none().then_some(first)
                })
                .ok_or_else(|| DirectoryError::Decode("response does not contain a fulfiller list".into()))?;
            match map.remove(&key) {
                Some(Value::Array(items)) => items,
                _ => return Err(DirectoryError::Decode("response does not contain a fulfiller list".into())),
            }
        }
        other => return Err(DirectoryError::Decode(format!("expected a list, got {}", kind_of(&other)))),
    };

    items
        .into_iter()
        .map(|item| serde_json::from_value::<Fulfiller>(item).map_err(|err| DirectoryError::Decode(err.to_string())))
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
