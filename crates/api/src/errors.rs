use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::models::{ErrorResponse, NotFoundResponse, EMPTY_LISTING_HINT, INTERNAL_ERROR, NOT_FOUND_ERROR};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("File not found: {path}")]
    NotFound {
        path: String,
        available: Vec<String>,
    },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("{0}")]
    InternalError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

/// Scanned files followed by `/health`, or a hint when nothing is hosted yet.
pub fn available_endpoints(files: Vec<String>) -> Vec<String> {
    if files.is_empty() {
        vec!["/health".to_string(), EMPTY_LISTING_HINT.to_string()]
    } else {
        let mut endpoints = files;
        endpoints.push("/health".to_string());
        endpoints
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound { path, available } => (
                StatusCode::NOT_FOUND,
                Json(NotFoundResponse {
                    error: NOT_FOUND_ERROR.to_string(),
                    path,
                    available_endpoints: available_endpoints(available),
                }),
            )
                .into_response(),
            ApiError::InvalidPath(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid path".to_string(),
                    message: msg,
                }),
            )
                .into_response(),
            err => {
                tracing::error!("Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: INTERNAL_ERROR.to_string(),
                        message: err.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_endpoints() {
        assert_eq!(
            available_endpoints(vec!["/1.1.0/App.msi".to_string()]),
            vec!["/1.1.0/App.msi", "/health"]
        );
        assert_eq!(
            available_endpoints(vec![]),
            vec!["/health", EMPTY_LISTING_HINT]
        );
    }

    #[test]
    fn test_status_codes() {
        let not_found = ApiError::NotFound {
            path: "/x".to_string(),
            available: vec![],
        };
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::InvalidPath("..".to_string()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InternalError("boom".to_string()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
