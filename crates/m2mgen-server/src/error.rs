//! Error responses returned by the HTTP layer.

use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use m2mgen_core::{PassthroughError, ValidationError};
use serde_json::json;
use thiserror::Error;

/// An error reported to the client as `{"error": "<message>"}`
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or rejected input
    #[error("{0}")]
    BadRequest(String),

    /// The CSE did not answer in time
    #[error("{0}")]
    Timeout(String),

    /// The CSE could not be reached
    #[error("{0}")]
    Unavailable(String),

    /// Anything else, including generation failures
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request<S: Into<String>>(msg: S) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<PassthroughError> for ApiError {
    fn from(err: PassthroughError) -> Self {
        match &err {
            PassthroughError::Timeout => Self::Timeout(err.to_string()),
            PassthroughError::Connect(_) => Self::Unavailable(err.to_string()),
            PassthroughError::Other(_) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_requests() {
        let err = ApiError::from(ValidationError::PortOutOfRange);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Port must be between 1 and 65535.");
    }

    #[test]
    fn test_timeout_maps_to_408() {
        let err = ApiError::from(PassthroughError::Timeout);
        assert_eq!(err.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(err.to_string(), "Request timeout. Server did not respond.");
    }
}
