// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Errors returned by the progress store and the API.
///
/// Each variant maps to a distinct, stable code so callers can tell a retry
/// case (`StoreUnavailable`) from a caller mistake or a data problem.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Unknown platform: {0}")]
    InvalidPlatform(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ProgressError {
    /// Stable error code exposed at the transport boundary.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::InvalidPlatform(_) => "INVALID_PLATFORM",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::MalformedRecord(_) => "MALFORMED_RECORD",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidPlatform(_) | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::MalformedRecord(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<firestore::errors::FirestoreError> for ProgressError {
    fn from(err: firestore::errors::FirestoreError) -> Self {
        use firestore::errors::FirestoreError;

        match err {
            FirestoreError::DeserializeError(_) | FirestoreError::SerializeError(_) => {
                Self::MalformedRecord(err.to_string())
            }
            // Errors raised inside a transaction arrive wrapped.
            FirestoreError::ErrorInTransaction(inner) => {
                match inner.source.downcast::<FirestoreError>() {
                    Ok(source) => Self::from(*source),
                    Err(source) => Self::StoreUnavailable(source.to_string()),
                }
            }
            other => Self::StoreUnavailable(other.to_string()),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ProgressError {
    fn into_response(self) -> Response {
        let details = match &self {
            ProgressError::UserNotFound(email) => Some(email.clone()),
            ProgressError::InvalidPlatform(name) => Some(name.clone()),
            ProgressError::InvalidInput(msg) => Some(msg.clone()),
            ProgressError::StoreUnavailable(msg) => {
                tracing::error!(error = %msg, "Store unavailable");
                None
            }
            ProgressError::MalformedRecord(msg) => {
                tracing::error!(error = %msg, "Malformed record in store");
                None
            }
            ProgressError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                None
            }
        };

        let body = ErrorResponse {
            error: self.code(),
            details,
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for the store and handlers
pub type Result<T> = std::result::Result<T, ProgressError>;
