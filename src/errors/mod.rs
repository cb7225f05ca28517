use thiserror::Error;

use crate::api::models::ValidationError;
use crate::http::ResponseBody;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failures surfaced by the stats API client
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input rejected before any request was issued
    #[error("{operation}: {message}")]
    InvalidArgument {
        operation: &'static str,
        message: String,
    },

    /// HTTP 422 with field-level validation errors
    #[error("{message}")]
    ValidationFailure {
        status: u16,
        url: String,
        message: String,
        detail: Vec<ValidationError>,
        body: Option<ResponseBody>,
    },

    /// Any other non-success HTTP status
    #[error("{message}")]
    RequestFailure {
        status: u16,
        url: String,
        message: String,
        body: Option<ResponseBody>,
    },

    #[error("Failed to send GET request to {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} was cancelled")]
    Cancelled { url: String },

    /// Success status, but the body does not satisfy the response contract
    #[error("Unexpected response body from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl ApiError {
    pub fn invalid_argument(operation: &'static str, message: impl Into<String>) -> Self {
        ApiError::InvalidArgument {
            operation,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ValidationFailure { status, .. } | ApiError::RequestFailure { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ApiError::InvalidArgument { .. } => None,
            ApiError::ValidationFailure { url, .. }
            | ApiError::RequestFailure { url, .. }
            | ApiError::Transport { url, .. }
            | ApiError::Cancelled { url }
            | ApiError::Decode { url, .. } => Some(url.as_str()),
        }
    }

    pub fn body(&self) -> Option<&ResponseBody> {
        match self {
            ApiError::ValidationFailure { body, .. } | ApiError::RequestFailure { body, .. } => {
                body.as_ref()
            }
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled { .. })
    }
}

/// Numeric work that has no defined result for the given inputs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputationError {
    #[error("Computation undefined: {0}")]
    ComputationUndefined(String),
}
