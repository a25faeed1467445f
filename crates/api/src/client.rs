//! Shared HTTP plumbing for the directory and settings clients.

use std::env;
use std::time::Duration;

use fulfillers_types::{ServiceId, ToServiceIdInfo};
use reqwest::{Client, Method, RequestBuilder, Url, header};
use tracing::debug;

use crate::error::ApiConfigError;

/// Allowed hostnames or base domains for non-local base URLs. Subdomains of
/// these domains are also allowed.
const ALLOWED_DOMAINS: &[&str] = &["cimpress.io"];
/// Hostnames allowed for local development regardless of scheme.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Environment variable overriding the per-request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "FULFILLERS_HTTP_TIMEOUT_SECS";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how to reach one remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub service: ServiceId,
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Explicit configuration, typically for tests or embedding hosts that
    /// manage their own settings.
    pub fn new(service: ServiceId, base_url: impl Into<String>) -> Self {
        Self {
            service,
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Resolve configuration from the environment.
    ///
    /// The base URL is taken from the service's variable (for example
    /// `FULFILLER_IDENTITY_URL`) or falls back to the public default. The
    /// timeout comes from `FULFILLERS_HTTP_TIMEOUT_SECS` when it parses.
    pub fn from_env(service: ServiceId) -> Self {
        let base_url = env::var(service.env_var())
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| service.default_base_url().to_string());
        let timeout = env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        Self {
            service,
            base_url,
            timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone)]
/// Thin wrapper around a configured `reqwest::Client`.
///
/// Requests are built against a validated base URL with a consistent
/// User-Agent and Accept header. Credentials are per call because the
/// widget's access token can change while it is mounted.
pub struct ApiClient {
    pub base_url: String,
    pub http: Client,
    pub user_agent: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiConfigError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        validate_base_url(config.service, &base_url)?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_str(config.service.accept_headers()).map_err(|err| ApiConfigError::Header(err.to_string()))?,
        );

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(config.timeout)
            .build()
            .map_err(ApiConfigError::Client)?;

        Ok(Self {
            base_url,
            http,
            user_agent: format!("fulfillers/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
        })
    }

    /// Build a request for an API-relative path, authenticated with `access_token`.
    pub fn request(&self, method: Method, path: &str, access_token: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "building request");

        self.http
            .request(method, url)
            .header(header::USER_AGENT, &self.user_agent)
            .bearer_auth(access_token)
    }
}

/// Validate that a base URL is acceptable for use by the client.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS, and host must be one of the allowed
///   domains or a subdomain thereof
fn validate_base_url(service: ServiceId, base: &str) -> Result<(), ApiConfigError> {
    let invalid = |reason: String| ApiConfigError::InvalidBaseUrl {
        env_var: service.env_var().to_string(),
        url: base.to_string(),
        reason,
    };

    let parsed_base_url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    let host_name = parsed_base_url
        .host_str()
        .ok_or_else(|| invalid("URL must include a host".into()))?;

    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        return Ok(());
    }

    if parsed_base_url.scheme() != "https" {
        return Err(invalid(format!(
            "https is required for non-localhost hosts; got '{}://'",
            parsed_base_url.scheme()
        )));
    }

    let is_allowed_domain = ALLOWED_DOMAINS.iter().any(|&allowed_domain| {
        host_name.eq_ignore_ascii_case(allowed_domain) || host_name.ends_with(&format!(".{}", allowed_domain))
    });
    if !is_allowed_domain {
        return Err(invalid(format!(
            "host '{}' is not allowed; must be one of {:?} or a subdomain, or localhost",
            host_name, ALLOWED_DOMAINS
        )));
    }

    Ok(())
}
