//! Error types for the notes server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Message shared by never-existed and expired notes.
pub const NOT_FOUND_MESSAGE: &str = "Note not found or has expired";

// == Note Error Enum ==
/// Unified error type for the notes server.
#[derive(Error, Debug)]
pub enum NoteError {
    /// Malformed input, e.g. non-text content
    #[error("{0}")]
    Validation(String),

    /// Note never existed or has expired
    #[error("Note not found or has expired")]
    NotFound,

    /// Underlying persistence failure
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for NoteError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            NoteError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            NoteError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()),
            NoteError::Storage(e) => {
                tracing::error!(error = %e, "Storage failure while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to access note storage".to_string(),
                )
            }
            NoteError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal failure while handling request");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the notes server.
pub type Result<T> = std::result::Result<T, NoteError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_error_status_codes() {
        let test_cases = vec![
            (NoteError::Validation("bad".to_string()), StatusCode::BAD_REQUEST),
            (NoteError::NotFound, StatusCode::NOT_FOUND),
            (NoteError::Storage(sqlx::Error::PoolClosed), StatusCode::INTERNAL_SERVER_ERROR),
            (NoteError::Internal("boom".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should map to correct HTTP status"
            );
        }
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = NoteError::NotFound.into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["error"], NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn test_storage_error_hides_details() {
        let response = NoteError::Storage(sqlx::Error::PoolClosed).into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["error"], "Failed to access note storage");
    }
}
