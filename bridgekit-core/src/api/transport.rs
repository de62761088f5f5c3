//! # Transport
//!
//! The seam between [`BridgeClient`](super::BridgeClient) and the network. Production code
//! uses [`ReqwestTransport`]; tests plug in an in-memory implementation.
use super::config::{ApiConfig, ConfigError};
use crate::BoxError;
use http::{Request, Response};
use std::{future::Future, time::Duration};
use tracing::trace;

/// Sends one fully built HTTP request and returns the raw response.
///
/// Implementations report only transport-level failures as errors. Non-success statuses
/// are returned as regular responses.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: Request<Vec<u8>>,
    ) -> impl Future<Output = Result<Response<Vec<u8>>, BoxError>> + Send;
}

/// A [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds a client honouring the timeout of `config`.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(ConfigError::Client)?;
        Ok(Self::new(client))
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>, BoxError> {
        let request = reqwest::Request::try_from(request)?;
        trace!(url = %request.url(), "Sending HTTP request");

        let response = self.client.execute(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        let mut converted = Response::builder().status(status).body(body.to_vec())?;
        *converted.headers_mut() = headers;
        Ok(converted)
    }
}
