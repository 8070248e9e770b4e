//! API error responses
//!
//! Every failure leaves the server as `{"error": kind, "message": text}`
//! with a status derived from the error category.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use pricer_models::functions::FunctionError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON error body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    /// Machine-readable category
    pub error: String,
    /// Human-readable detail
    pub message: String,
}

/// Errors returned by API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Function lookup, binding or validation failure
    #[error(transparent)]
    Function(#[from] FunctionError),

    /// Batch larger than `max_batch_size`
    #[error("Batch of {size} calls exceeds the limit of {limit}")]
    BatchTooLarge {
        /// Submitted call count
        size: usize,
        /// Configured limit
        limit: usize,
    },

    /// Unparseable request body
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    /// Evaluation task failed to complete
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Function(FunctionError::UnknownFunction { .. }) => StatusCode::NOT_FOUND,
            ApiError::Function(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::BatchTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable category
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Function(err) => err.kind(),
            ApiError::BatchTooLarge { .. } => "batch_too_large",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Internal(_) => "internal",
        }
    }

    /// JSON body for this error
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "request rejected");
        }
        (status, Json(self.to_response())).into_response()
    }
}
