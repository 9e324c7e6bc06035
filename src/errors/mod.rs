//! Application error type mapped to HTTP status codes.
//!
//! Every client-visible failure is a JSON object with a `message` field; the
//! mobile client shows it verbatim. Store errors are logged and collapsed to
//! a generic 500 so no driver detail leaks out.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    /// Bad credentials at login (role-specific message, 401).
    #[error("{0}")]
    AuthenticationFailed(String),

    /// Missing bearer token (401).
    #[error("Access token required")]
    TokenRequired,

    /// Bad, forged, or expired bearer token (403).
    #[error("Invalid token")]
    InvalidToken,

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::AuthenticationFailed(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::TokenRequired => {
                (StatusCode::UNAUTHORIZED, "Access token required".to_string())
            }
            AppError::InvalidToken => (StatusCode::FORBIDDEN, "Invalid token".to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_check() {
        let err = AppError::NotFound("Student not found".to_string());
        assert!(err.is_not_found());
        assert!(!AppError::InvalidToken.is_not_found());
    }

    #[test]
    fn auth_error_display() {
        let err = AppError::AuthenticationFailed("Invalid student ID".to_string());
        assert_eq!(err.to_string(), "Invalid student ID");
        assert_eq!(AppError::TokenRequired.to_string(), "Access token required");
        assert_eq!(AppError::InvalidToken.to_string(), "Invalid token");
    }

    #[test]
    fn internal_error_hides_detail() {
        let err = AppError::Internal("connection pool exhausted".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
