use crate::validation::UploadError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use utoipa::ToSchema;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Upload rejected by validation, reported under an endpoint-specific status
    #[error("{source}")]
    Upload { source: UploadError, status: StatusCode },

    /// Request body is not a usable form (wrong encoding, missing `file` field)
    #[error("{message}")]
    InvalidForm { message: String },

    /// Invalid request data
    #[error("{message}")]
    BadRequest { message: String },

    /// Request body exceeded the transport-level body limit
    #[error("{message}")]
    PayloadTooLarge { message: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Error body shared by every endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable reason for the failure
    #[schema(example = "File type not supported.")]
    pub detail: String,
}

impl Error {
    /// Wrap a validation failure so it renders with `status`.
    pub fn upload(status: StatusCode) -> impl FnOnce(UploadError) -> Self {
        move |source| Error::Upload { source, status }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Upload { status, .. } => *status,
            Error::InvalidForm { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Error::Internal { .. } | Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::Upload { status, .. } if status.is_server_error() => "Internal server error".to_string(),
            Error::Upload { source, .. } => source.to_string(),
            Error::InvalidForm { message } | Error::BadRequest { message } | Error::PayloadTooLarge { message } => message.clone(),
            Error::Internal { .. } | Error::Other(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log full error details for debugging - different log levels based on severity
        if status.is_server_error() {
            tracing::error!("Internal service error: {:#}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = ErrorResponse {
            detail: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;
