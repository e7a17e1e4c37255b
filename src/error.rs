//! Error handling for the repairhub server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unauthorized
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Transaction error (multi-step write aborted and rolled back)
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// SQLx database error
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Transaction(_)
            | Error::Serialization(_)
            | Error::Sqlx(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error_code, message) = match &self {
            Error::NotFound(msg) => ("NOT_FOUND", msg.clone()),
            Error::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            Error::Unauthorized(msg) => ("UNAUTHORIZED", msg.clone()),
            Error::Transaction(msg) => ("TRANSACTION_ERROR", msg.clone()),
            Error::Serialization(e) => ("SERIALIZATION_ERROR", e.to_string()),
            Error::Sqlx(e) => ("DATABASE_ERROR", e.to_string()),
            Error::Internal(msg) => ("INTERNAL_ERROR", msg.clone()),
        };

        tracing::error!(
            status = %status,
            error_code = %error_code,
            message = %message,
            "Request error"
        );

        let body = Json(json!({
            "error_code": error_code,
            "message": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = Error::NotFound("customer x".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = Error::Validation("name is required".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unauthorized_maps_to_401() {
        let err = Error::Unauthorized("missing bearer token".to_string());
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_transaction_maps_to_500() {
        let err = Error::Transaction("commit failed".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_sqlx_error_maps_to_500() {
        let err = Error::Sqlx(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
