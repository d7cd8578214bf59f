use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors returned from HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short, human-readable error class
    pub fn label(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "Bad request",
            Self::NotFound(_) => "Not found",
            Self::Internal(_) => "Internal server error",
        }
    }
}

impl From<crate::error::Error> for AppError {
    fn from(err: crate::error::Error) -> Self {
        use crate::error::Error;
        match err {
            Error::Validation(msg) => Self::BadRequest(msg),
            Error::UnknownMood(_) => Self::NotFound(err.to_string()),
            Error::Catalog(_) | Error::Http(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(format!("Worker task failed: {err}"))
    }
}

/// JSON error body: `{"error": ..., "message": ...}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Error processing request: {self}");
        }
        let body = ErrorResponse {
            error: self.label(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_core_errors_map_to_status() {
        let validation: AppError = Error::Validation("bad".to_string()).into();
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);

        let unknown: AppError = Error::UnknownMood("meh".to_string()).into();
        assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);
        assert!(unknown.to_string().contains("Available moods"));

        let catalog: AppError = Error::Catalog("down".to_string()).into();
        assert_eq!(catalog.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
