//! API Error Types
//!
//! Failures of the two server calls. Kept string-based so the browser
//! transport (gloo-net) and the native one (reqwest) map into the same type.

use thiserror::Error;

/// Errors returned by [`PlannerApi`](super::PlannerApi) implementations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Server answered with a non-2xx status
    #[error("Server returned status {status}")]
    Status { status: u16 },

    /// Request never produced a response (connection refused, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not the expected JSON
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request body could not be built
    #[error("Encode error: {0}")]
    Encode(String),
}

impl ApiError {
    /// The expected "no update" case, as opposed to a real failure
    pub fn is_status(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status {
                status: status.as_u16(),
            }
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;
