//! Error types and HTTP error response handling.
//!
//! This module defines how failures of the balance core and of request
//! decoding are converted into HTTP responses with status codes and JSON
//! bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::BalanceError;

/// Which endpoint produced a core failure.
///
/// The two endpoints word the invalid-id message differently and existing
/// clients match on the exact text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    BalanceInfo,
    TopUp,
}

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Core Errors**: any `BalanceError` from validation or the balance service
/// - **Request Errors**: the body could not be decoded
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Validation or balance service failure, tagged with its endpoint.
    #[error("{source}")]
    Balance {
        operation: Operation,
        source: BalanceError,
    },

    /// Request body is not valid JSON of the expected shape.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("error parcing JSON")]
    InvalidRequest(String),
}

impl AppError {
    pub fn balance_info(source: BalanceError) -> Self {
        AppError::Balance {
            operation: Operation::BalanceInfo,
            source,
        }
    }

    pub fn top_up(source: BalanceError) -> Self {
        AppError::Balance {
            operation: Operation::TopUp,
            source,
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// { "error": "Human-readable error message" }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidAccountId`, `InvalidAmount`, `AccountNotFound` → 400 Bad Request
/// - `InvalidRequest` → 400 Bad Request
/// - `StoreUnavailable` → 500 Internal Server Error (details stay in the logs)
/// - `Cancelled` → 503 Service Unavailable
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Balance {
                operation: Operation::TopUp,
                source: BalanceError::InvalidAccountId,
            } => (
                StatusCode::BAD_REQUEST,
                "Incorrect value id user".to_string(),
            ),
            AppError::Balance { source, .. } => {
                let status = match source {
                    BalanceError::InvalidAccountId
                    | BalanceError::InvalidAmount(_)
                    | BalanceError::AccountNotFound => StatusCode::BAD_REQUEST,
                    BalanceError::StoreUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
                    BalanceError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
                };
                (status, source.to_string())
            }
            AppError::InvalidRequest(ref detail) => {
                tracing::debug!(%detail, "rejected request body");
                (StatusCode::BAD_REQUEST, self.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
