//! # API Configuration
//!
//! Serializable settings for building an [`Api`](super::Api), e.g. from a JSON file:
//!
//! ```json
//! {
//!   "base_url": "https://example.com/api",
//!   "bearer_token": "secret",
//!   "headers": [["X-Client", "ios"]],
//!   "timeout_secs": 30
//! }
//! ```
use super::client::BaseRequest;
use http::{
    HeaderValue,
    header::{HeaderName, InvalidHeaderName, InvalidHeaderValue},
    uri::InvalidUri,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Errors that can occur when turning an [`ApiConfig`] into a usable API.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid URL '{0}': '{1}'")]
    InvalidUrl(String, #[source] InvalidUri),
    #[error("Invalid header key '{key}': '{source}'")]
    InvalidHeaderName {
        key: String,
        source: InvalidHeaderName,
    },
    #[error("Invalid header value for key '{key}': '{source}'")]
    InvalidHeaderValue {
        key: String,
        source: InvalidHeaderValue,
    },
    #[error("Failed to build the HTTP client: '{0}'")]
    Client(#[source] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// The URL every call is posted to.
    pub base_url: String,
    /// Sent as `Authorization: Bearer <token>` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    /// Extra headers attached to every call.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    /// Per-request timeout of the default transport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: None,
            headers: Vec::new(),
            timeout_secs: None,
        }
    }

    /// Validates the URL and headers and turns them into a [`BaseRequest`].
    pub fn base_request(&self) -> Result<BaseRequest, ConfigError> {
        let mut base_request = BaseRequest::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidUrl(self.base_url.clone(), e))?;

        for (k, v) in &self.headers {
            let name = HeaderName::from_str(k).map_err(|source| ConfigError::InvalidHeaderName {
                key: k.clone(),
                source,
            })?;
            let value =
                HeaderValue::from_str(v).map_err(|source| ConfigError::InvalidHeaderValue {
                    key: k.clone(),
                    source,
                })?;
            base_request = base_request.with_header(name, value);
        }

        if let Some(token) = &self.bearer_token {
            base_request = base_request.with_bearer_token(token).map_err(|source| {
                ConfigError::InvalidHeaderValue {
                    key: http::header::AUTHORIZATION.as_str().to_string(),
                    source,
                }
            })?;
        }

        Ok(base_request)
    }
}
