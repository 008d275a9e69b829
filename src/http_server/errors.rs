//! # HTTP API Errors
//!
//! Every failure a user endpoint can return, and its JSON rendering.

use axum::extract::rejection::JsonRejection;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::db::DbError;
use crate::users::ValidationError;

/// Result type for user endpoint operations
pub type ApiResult<T> = Result<T, ApiError>;

/// User endpoint errors
///
/// `Display` is the client-facing message. Causes carried by
/// `InvalidBody` and `Database` are logged, never returned.
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Required field missing or empty
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Body is not the JSON shape the endpoint expects
    #[error("Invalid JSON body")]
    InvalidBody(String),

    /// No user with the requested id
    #[error("User not found")]
    NotFound,

    /// No route matches the request path
    #[error("Route {method}:{path} not found")]
    RouteNotFound { method: Method, path: String },

    /// The path exists but not for this method
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Statement execution failed
    #[error("Database error")]
    Database(#[from] DbError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Database(cause) if cause.is_pool_exhausted() => {
                warn!(error = %cause, "no pooled connection available")
            }
            ApiError::Database(cause) => error!(error = %cause, "database error"),
            ApiError::InvalidBody(detail) => debug!(detail = %detail, "rejected request body"),
            _ => {}
        }

        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
