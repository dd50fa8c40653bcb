//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps [`FortError`] variants to HTTP status codes and returns JSON bodies
//! of the form `{"error": {"code", "message"}}`. Internal failures are
//! logged in full but answered with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fort_core::FortError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed input: bad JSON, encoding, length, or range (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No ledger to score (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Well-formed request whose input cannot be scored (422).
    #[error("unprocessable: {0}")]
    Unprocessable(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Unprocessable(_) => (StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => {
                tracing::error!(error = %self, "internal server error");
                "An internal error occurred".to_string()
            }
            other => {
                tracing::debug!(error = %other, "request rejected");
                other.to_string()
            }
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<FortError> for AppError {
    fn from(err: FortError) -> Self {
        match err {
            FortError::Format(_) | FortError::Range { .. } => Self::BadRequest(err.to_string()),
            FortError::NotFound(_) => Self::NotFound(err.to_string()),
            FortError::Dimension { .. } | FortError::Ledger(_) => {
                Self::Unprocessable(err.to_string())
            }
            FortError::Config(_)
            | FortError::ModelLoad(_)
            | FortError::Canonicalization(_)
            | FortError::Crypto(_)
            | FortError::Io(_) => Self::Internal(err.to_string()),
        }
    }
}
