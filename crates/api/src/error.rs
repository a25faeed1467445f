//! Error types for the directory and settings clients.

use reqwest::{Response, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// Problems with client configuration, detected before any request is sent.
#[derive(Debug, Error)]
pub enum ApiConfigError {
    #[error("invalid {env_var} URL '{url}': {reason}")]
    InvalidBaseUrl { env_var: String, url: String, reason: String },

    #[error("invalid default header: {0}")]
    Header(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Failure loading fulfillers from the directory service.
///
/// The `Display` text is meant for people: it becomes the label of the
/// single placeholder entry the selector shows when loading fails.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Config(#[from] ApiConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Not authorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Unexpected fulfiller payload: {0}")]
    Decode(String),
}

impl DirectoryError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Failure reading or writing the user settings document.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] ApiConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Not authorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("Settings request failed ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected settings payload: {0}")]
    Decode(String),
}

/// Transport-level outcome shared by both clients before it is mapped onto
/// the caller's error type.
#[derive(Debug)]
pub(crate) enum HttpFailure {
    Network(String),
    Unauthorized { status: u16, message: String },
    Status { status: u16, message: String },
}

impl HttpFailure {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else {
            fulfillers_util::redact_sensitive(&err.to_string())
        };
        Self::Network(message)
    }

    /// Build a failure from a non-success response, preferring the service's
    /// own `message` (or `Message`) field over the bare status text.
    pub(crate) async fn from_response(response: Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized {
                status: status.as_u16(),
                message,
            },
            _ => Self::Status {
                status: status.as_u16(),
                message,
            },
        }
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    let from_body = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["message", "Message", "error_description", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
    });
    from_body
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| match status.canonical_reason() {
            Some(reason) => format!("HTTP {} {}", status.as_u16(), reason),
            None => format!("HTTP {}", status.as_u16()),
        })
}

impl From<HttpFailure> for DirectoryError {
    fn from(value: HttpFailure) -> Self {
        match value {
            HttpFailure::Network(message) => Self::Network(message),
            HttpFailure::Unauthorized { status, message } => Self::Unauthorized { status, message },
            HttpFailure::Status { status, message } => Self::Status { status, message },
        }
    }
}

impl From<HttpFailure> for SettingsError {
    fn from(value: HttpFailure) -> Self {
        match value {
            HttpFailure::Network(message) => Self::Network(message),
            HttpFailure::Unauthorized { status, message } => Self::Unauthorized { status, message },
            HttpFailure::Status { status, message } => Self::Status { status, message },
        }
    }
}
