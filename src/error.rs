//! Error types for Bookshelf server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Carries a message that is safe to show to clients
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Replace a datastore failure with a client-safe message.
    /// The underlying cause is logged and never leaves the process.
    pub fn masked(self, message: &str) -> Self {
        match self {
            AppError::Database(e) => {
                tracing::error!(error = ?e, "{}", message);
                AppError::Internal(message.to_string())
            }
            AppError::Migration(e) => {
                tracing::error!(error = ?e, "{}", message);
                AppError::Internal(message.to_string())
            }
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Migration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        details.sort();
        AppError::Validation(details)
    }
}

/// Error envelope
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Always `true`
    pub error: bool,
    pub message: String,
    /// Field-level reasons for a failed validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            details: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => ErrorResponse::new(msg),
            AppError::Validation(details) => ErrorResponse {
                details: Some(details),
                ..ErrorResponse::new("Validation failed")
            },
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                ErrorResponse::new("Internal server error")
            }
            AppError::Migration(e) => {
                tracing::error!("Migration error: {:?}", e);
                ErrorResponse::new("Internal server error")
            }
            AppError::Internal(msg) => ErrorResponse::new(msg),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
