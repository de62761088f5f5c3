//! # Call Errors
use crate::BoxError;
use http::StatusCode;
use std::sync::Arc;

/// Returned when the server answers a call with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} ({})", describe(.reason, .status), .status.as_u16())]
pub struct HttpError {
    /// The reason reported by the server, if its error body could be decoded.
    pub reason: Option<String>,
    pub status: StatusCode,
}

impl HttpError {
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// `true` for 401, which usually means the login is missing or has expired.
    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }
}

fn describe<'a>(reason: &'a Option<String>, status: &StatusCode) -> &'a str {
    reason
        .as_deref()
        .or(status.canonical_reason())
        .unwrap_or("Unknown status")
}

/// Errors that can occur while performing an API call.
///
/// Cloneable so that one failure can be handed to the caller and to every error
/// subscriber.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CallError {
    #[error("Failed to encode the call body: '{0}'")]
    Encode(#[source] Arc<serde_json::Error>),
    #[error("Failed to build the request: '{0}'")]
    InvalidRequest(#[source] Arc<http::Error>),
    #[error("Invalid value for header '{name}': '{source}'")]
    InvalidHeader {
        name: &'static str,
        source: Arc<http::header::InvalidHeaderValue>,
    },
    #[error("Transport failed: '{0}'")]
    Transport(#[source] Arc<dyn std::error::Error + Send + Sync>),
    #[error(transparent)]
    Status(#[from] HttpError),
    #[error("Failed to decode '{path}' of the response body '{body}': '{source}'")]
    Decode {
        body: String,
        /// Dotted location of the failing value, `.` for the body itself.
        path: String,
        #[source]
        source: Arc<serde_json::Error>,
    },
}

impl CallError {
    pub(crate) fn transport(err: BoxError) -> Self {
        CallError::Transport(Arc::from(err))
    }

    /// The status error, if the server rejected the call.
    pub fn as_http_error(&self) -> Option<&HttpError> {
        match self {
            CallError::Status(err) => Some(err),
            _ => None,
        }
    }
}

impl From<http::Error> for CallError {
    fn from(err: http::Error) -> Self {
        CallError::InvalidRequest(Arc::new(err))
    }
}
