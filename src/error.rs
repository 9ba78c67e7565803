//! Error types for the DocShare server

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::html::{error_page, not_found_page};

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Document service error: {0}")]
    Service(#[from] ServiceError),
}

/// Errors raised by the document service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Transient failure of the backing service
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    /// Status code, error kind and client-facing message
    pub fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            AppError::Service(e) => match e {
                ServiceError::DocumentNotFound(id) => (
                    StatusCode::NOT_FOUND,
                    "not_found",
                    format!("Document not found: {}", id),
                ),
                ServiceError::FolderNotFound(id) => (
                    StatusCode::BAD_REQUEST,
                    "bad_request",
                    format!("Folder not found: {}", id),
                ),
                ServiceError::InvalidInput(msg) => {
                    (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
                }
                ServiceError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
                ServiceError::Unavailable(_) => {
                    tracing::error!("Document service error: {}", e);
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "service_unavailable",
                        "Document service unavailable".to_string(),
                    )
                }
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = self.classify();

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}

/// Errors of HTML page handlers, rendered as pages instead of JSON
#[derive(Debug)]
pub enum PageError {
    /// The document does not exist
    NotFound { user_id: Option<String> },
    /// Fetching page data failed
    Failed { user_id: Option<String> },
}

impl PageError {
    /// Wrap a service failure, logging it
    pub fn service(error: ServiceError, user_id: Option<&str>) -> Self {
        let user_id = user_id.map(str::to_string);
        match error {
            ServiceError::DocumentNotFound(_) => PageError::NotFound { user_id },
            other => {
                tracing::error!("Failed to load page data: {}", other);
                PageError::Failed { user_id }
            }
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound { user_id } => {
                (StatusCode::NOT_FOUND, Html(not_found_page(user_id.as_deref()))).into_response()
            }
            PageError::Failed { user_id } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(error_page(user_id.as_deref())),
            )
                .into_response(),
        }
    }
}
