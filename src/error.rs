// src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Outcome of the retry loop (or of the usability check on its result).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FetchError {
    #[error("upstream rate limit exceeded")]
    RateLimited,

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("upstream returned an empty payload")]
    EmptyPayload,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The fetch failed and neither a cached nor a fallback payload exists.
    #[error("no data available for {key}: {source}")]
    NoDataAvailable {
        key: String,
        #[source]
        source: FetchError,
    },

    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid admin password")]
    Unauthorized,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::NoDataAvailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::Config(_) | GatewayError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<validator::ValidationErrors> for GatewayError {
    fn from(errors: validator::ValidationErrors) -> Self {
        GatewayError::Validation(errors.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
