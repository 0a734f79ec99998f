//! Error types for the report streaming service.
//!
//! This module defines the central `Error` enum, which captures all recoverable
//! and reportable error cases of the service. It implements `IntoResponse` so
//! handlers can return it directly and clients receive an appropriate status
//! code with a `{"detail": ...}` body.
//!
//! ## Error Cases
//! - `NotFound`: A looked-up resource (e.g. a report) does not exist.
//! - `InvalidRequest`: The request body did not match any accepted shape.
//! - `ChannelError`: An internal communication failure between tasks.
//! - `Encode`: A frame or header could not be serialized.
//! - `ServiceShutdown`: A request arrived while the service was shutting down.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the report streaming service.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The requested resource does not exist.
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// The client request was malformed or did not match any accepted shape.
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// Internal channel send/receive failure (e.g., closed or full channel).
    #[error("Channel error: {context}")]
    ChannelError { context: String },

    /// Serialization of an outgoing value failed.
    #[error("Encoding error: {context}")]
    Encode { context: String },

    /// The service is in the process of shutting down.
    #[error("Service is shutting down")]
    ServiceShutdown,
}

impl Error {
    #[must_use]
    pub const fn report_not_found() -> Self {
        Self::NotFound { resource: "Report" }
    }

    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// The HTTP status this error is reported with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidRequest { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ChannelError { .. } | Self::Encode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceShutdown => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode {
            context: err.to_string(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "request rejected");
        }

        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
