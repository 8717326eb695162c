//! Error handling for the Tandem server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Authenticated but not allowed to act on this resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bad request error
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Not found error
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Uniqueness or state-transition violation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Chat provider is not configured
    #[error("Chat service not available")]
    ChatUnavailable,

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Auth(_) => StatusCode::UNAUTHORIZED,
            ServerError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServerError::Validation(_) | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Conflict(_) => StatusCode::CONFLICT,
            ServerError::ChatUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::Auth(_) => "authentication_error",
            ServerError::Forbidden(_) => "forbidden",
            ServerError::Validation(_) => "validation_error",
            ServerError::BadRequest(_) => "bad_request",
            ServerError::NotFound(_) => "not_found",
            ServerError::Conflict(_) => "conflict",
            ServerError::ChatUnavailable => "chat_unavailable",
            ServerError::Database(_) => "database_error",
            ServerError::Serialization(_) => "serialization_error",
            ServerError::Internal(_) => "internal_error",
        }
    }
}

impl From<tandem::TandemError> for ServerError {
    fn from(err: tandem::TandemError) -> Self {
        match err {
            tandem::TandemError::Validation(msg) => ServerError::Validation(msg),
            tandem::TandemError::Unauthenticated(msg) => ServerError::Auth(msg),
            tandem::TandemError::Forbidden(msg) => ServerError::Forbidden(msg),
            tandem::TandemError::NotFound(msg) => ServerError::NotFound(msg),
            tandem::TandemError::Conflict(msg) => ServerError::Conflict(msg),
            tandem::TandemError::InvalidOperation(msg) => ServerError::BadRequest(msg),
            tandem::TandemError::Storage(msg) => ServerError::Database(msg),
            tandem::TandemError::Internal(msg) => ServerError::Internal(msg),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// Helper function to create a bad request error
pub fn bad_request(message: &str) -> ServerError {
    ServerError::BadRequest(message.to_string())
}
