//! # Remote Calls
//!
//! This module posts typed calls to the server and surfaces every failure to observers.
//!
//! * **[`ApiMethodCall`]:** A serializable call with a typed result, addressed by the
//!   `API-Type` and `API-Method` headers.
//! * **[`BridgeClient`]:** Builds the HTTP request, sends it through a [`Transport`] and
//!   maps the response status. It does not retry.
//! * **[`Api`]:** Binds a client to a [`BaseRequest`] (URL and shared headers, e.g. a
//!   bearer token) and forwards every failed call into an [`ErrorBroadcast`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use bridgekit_core::api::{Api, ApiConfig, ApiMethodCall, NoReturnValue};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Logout;
//!
//! impl ApiMethodCall for Logout {
//!     type Output = NoReturnValue;
//!     const TYPE_NAME: &'static str = "SessionAPI";
//!     const METHOD_ID: &'static str = "logout";
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let api = Api::from_config(&ApiConfig::new("https://example.com/api"))?;
//! let mut errors = api.errors();
//!
//! api.perform(&Logout).await?;
//! # Ok(())
//! # }
//! ```
pub mod broadcast;
pub mod call;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use broadcast::{ErrorBroadcast, ErrorSubscription};
pub use call::{ApiMethodCall, NoReturnValue};
pub use client::{API_METHOD_HEADER, API_TYPE_HEADER, BaseRequest, BridgeClient};
pub use config::{ApiConfig, ConfigError};
pub use error::{CallError, HttpError};
pub use transport::{ReqwestTransport, Transport};

use tracing::debug;

/// A remote API endpoint.
///
/// Every failed [`Api::perform`] is published to all current [`Api::errors`] subscribers
/// before it is returned to the caller.
#[derive(Debug, Clone)]
pub struct Api<T = ReqwestTransport> {
    base_request: BaseRequest,
    client: BridgeClient<T>,
    errors: ErrorBroadcast,
}

impl Api<ReqwestTransport> {
    /// Builds an API backed by a `reqwest` transport from configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        let base_request = config.base_request()?;
        let transport = ReqwestTransport::from_config(config)?;
        Ok(Self::new(base_request, BridgeClient::new(transport)))
    }
}

impl<T: Transport> Api<T> {
    pub fn new(base_request: BaseRequest, client: BridgeClient<T>) -> Self {
        Self {
            base_request,
            client,
            errors: ErrorBroadcast::new(),
        }
    }

    pub fn base_request(&self) -> &BaseRequest {
        &self.base_request
    }

    /// Performs `call` against this endpoint.
    pub async fn perform<C: ApiMethodCall>(&self, call: &C) -> Result<C::Output, CallError> {
        match self.client.perform(call, &self.base_request).await {
            Ok(output) => Ok(output),
            Err(err) => {
                debug!(
                    type_name = C::TYPE_NAME,
                    method = C::METHOD_ID,
                    error = %err,
                    "Broadcasting failed API call"
                );
                self.errors.publish(err.clone());
                Err(err)
            }
        }
    }

    /// Subscribes to every failure of calls performed after this point.
    pub fn errors(&self) -> ErrorSubscription {
        self.errors.subscribe()
    }
}
