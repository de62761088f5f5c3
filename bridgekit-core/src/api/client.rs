//! # Bridge Client
//!
//! Turns an [`ApiMethodCall`] into an HTTP request and its response back into the call's
//! output.
//!
//! ## Request
//!
//! * `POST` to the URL of the [`BaseRequest`], carrying its headers.
//! * `API-Type` and `API-Method` identify the server method.
//! * The JSON-encoded call is the body.
//!
//! ## Response
//!
//! * **2xx:** the body is decoded into `C::Output`. An empty body decodes as `null`.
//! * **Anything else:** fails with [`HttpError`], using the `reason` of a
//!   `{"error": true, "reason": "..."}` body when the server sent one.
use super::{
    call::ApiMethodCall,
    error::{CallError, HttpError},
    transport::{ReqwestTransport, Transport},
};
use http::{
    HeaderMap, HeaderValue, Method, Request, Uri,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderName, InvalidHeaderValue},
    uri::InvalidUri,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// `API-Type`: the server-side API type the call belongs to.
pub const API_TYPE_HEADER: HeaderName = HeaderName::from_static("api-type");
/// `API-Method`: the identifier of the called method.
pub const API_METHOD_HEADER: HeaderName = HeaderName::from_static("api-method");

/// The URL and headers shared by every call to one API.
#[derive(Debug, Clone)]
pub struct BaseRequest {
    uri: Uri,
    headers: HeaderMap,
}

impl BaseRequest {
    pub fn new(uri: Uri) -> Self {
        Self {
            uri,
            headers: HeaderMap::new(),
        }
    }

    pub fn parse(url: &str) -> Result<Self, InvalidUri> {
        url.parse().map(Self::new)
    }

    /// Sets `name` to `value` on every request, replacing earlier values.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Authenticates every request with `Authorization: Bearer <token>`.
    pub fn with_bearer_token(self, token: &str) -> Result<Self, InvalidHeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        Ok(self.with_header(AUTHORIZATION, value))
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// The body of a rejected call: `{"error": true, "reason": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    reason: String,
}

/// Performs calls through a [`Transport`].
#[derive(Debug, Clone, Default)]
pub struct BridgeClient<T = ReqwestTransport> {
    transport: T,
}

impl<T: Transport> BridgeClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `call` to the endpoint described by `base_request`.
    ///
    /// # Returns
    ///
    /// * `Ok(C::Output)` - The server accepted the call and its answer could be decoded.
    /// * `Err(CallError)` - Encoding, transport, status or decoding failure.
    pub async fn perform<C: ApiMethodCall>(
        &self,
        call: &C,
        base_request: &BaseRequest,
    ) -> Result<C::Output, CallError> {
        let request = build_request(call, base_request)?;

        debug!(
            type_name = C::TYPE_NAME,
            method = C::METHOD_ID,
            uri = %base_request.uri(),
            "Performing API call"
        );

        let response = self
            .transport
            .send(request)
            .await
            .map_err(CallError::transport)?;

        let status = response.status();
        let body = response.into_body();

        if !status.is_success() {
            let reason = serde_json::from_slice::<ErrorResponse>(&body)
                .ok()
                .map(|response| response.reason);

            warn!(
                type_name = C::TYPE_NAME,
                method = C::METHOD_ID,
                status = status.as_u16(),
                reason = reason.as_deref().unwrap_or_default(),
                "API call was rejected"
            );

            return Err(HttpError { reason, status }.into());
        }

        decode_output::<C::Output>(&body)
    }
}

fn build_request<C: ApiMethodCall>(
    call: &C,
    base_request: &BaseRequest,
) -> Result<Request<Vec<u8>>, CallError> {
    let body = serde_json::to_vec(call).map_err(|err| CallError::Encode(Arc::new(err)))?;

    let mut request = Request::builder()
        .method(Method::POST)
        .uri(base_request.uri.clone())
        .body(body)?;

    let headers = request.headers_mut();
    headers.extend(base_request.headers.clone());
    headers.insert(API_TYPE_HEADER, header_value("API-Type", C::TYPE_NAME)?);
    headers.insert(API_METHOD_HEADER, header_value("API-Method", C::METHOD_ID)?);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(request)
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, CallError> {
    HeaderValue::from_str(value).map_err(|source| CallError::InvalidHeader {
        name,
        source: Arc::new(source),
    })
}

fn decode_output<O: serde::de::DeserializeOwned>(body: &[u8]) -> Result<O, CallError> {
    let failed = |path: String, source: serde_json::Error| CallError::Decode {
        body: String::from_utf8_lossy(body).into_owned(),
        path,
        source: Arc::new(source),
    };

    let payload = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(body).map_err(|err| failed(".".to_string(), err))?
    };

    serde_path_to_error::deserialize(&payload)
        .map_err(|err| failed(err.path().to_string(), err.into_inner()))
}
