//! Unified error handling
//!
//! Provides the application-level error type and its HTTP mapping:
//! - [`AppError`] - application error enum
//! - [`ErrorBody`] - JSON error response body
//!
//! # Status code mapping
//!
//! | Variant | Status |
//! |---------|--------|
//! | `Validation` | 400 |
//! | `NotFound` | 404 |
//! | `ActiveRequestExists` | 409 |
//! | `InvalidTransition` | 422 |
//! | `Database` / `Internal` | 500 |
//!
//! # Usage example
//!
//! ```ignore
//! // Return an error
//! Err(AppError::not_found("Customer 42"))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// JSON error response body
///
/// ```json
/// {
///   "error": "Invalid price per can",
///   "details": "Price per can must be between 1 and 999"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Short error label
    pub error: String,
    /// Human-readable detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Expected, user-facing outcomes (4xx) ==========
    #[error("Validation failed: {0}")]
    /// Bad field values (400)
    Validation(String),

    #[error("Resource not found: {0}")]
    /// Unknown id (404)
    NotFound(String),

    #[error("Active request exists: {0}")]
    /// Duplicate active request for a customer (409)
    ActiveRequestExists(String),

    #[error("Invalid status transition: {0}")]
    /// Illegal status change (422)
    InvalidTransition(String),

    // ========== System errors (5xx) ==========
    #[error("Database error: {0}")]
    /// Storage failure, not recoverable locally (500)
    Database(String),

    #[error("Internal server error: {0}")]
    /// Internal error (500)
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, label, details) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "Validation failed", Some(msg)),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg)),

            AppError::ActiveRequestExists(msg) => {
                (StatusCode::CONFLICT, "Active request exists", Some(msg))
            }

            AppError::InvalidTransition(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid status transition",
                Some(msg),
            ),

            // Storage failures: log the cause, never leak it to the caller
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error", None)
            }

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        };

        let body = Json(ErrorBody {
            error: label.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn active_request_exists(msg: impl Into<String>) -> Self {
        Self::ActiveRequestExists(msg.into())
    }

    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
