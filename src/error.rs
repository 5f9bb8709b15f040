//! Error types for the equipment server

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// State guard violation, or a concurrent writer changed the item first
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short message shown to clients (and stored in batch failure lists)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Authentication(msg)
            | AppError::Authorization(msg)
            | AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::Duplicate(msg) => msg.clone(),
            AppError::Database(_) => "Database error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Authorization(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Duplicate(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            _ => {}
        }

        let body = Json(ErrorResponse {
            success: false,
            error: self.user_message(),
        });

        (self.status_code(), body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
