//! # HTTP Errors
//!
//! One envelope for every failure leaving the service. Classification is
//! pass-through: validation stays a client error, store and assembly
//! failures stay service errors, nothing is retried or downgraded.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::features::FeatureError;
use crate::query::QueryError;
use crate::store::StoreError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the HTTP boundary
#[derive(Debug, Error)]
pub enum ApiError {
    /// A query parameter violated its declared constraint
    #[error("{0}")]
    Validation(#[from] QueryError),

    /// No passthrough layer registered under this path
    #[error("unknown layer: {0}")]
    UnknownLayer(String),

    /// The geometry store failed or timed out
    #[error("{0}")]
    Store(#[from] StoreError),

    /// A store row could not be assembled into a feature
    #[error("{0}")]
    Assembly(#[from] FeatureError),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::UnknownLayer(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Assembly(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
            code: err.status_code().as_u16(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let err = ApiError::Validation(QueryError::LimitOutOfRange {
            got: 0,
            max: 10_000,
        });
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = ApiError::UnknownLayer("nope".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_envelope() {
        let err = ApiError::UnknownLayer("nope".to_string());
        let body = ErrorResponse::from(&err);
        assert_eq!(body.code, 404);
        assert_eq!(body.error, "unknown layer: nope");
    }
}
