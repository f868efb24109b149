//! Error types and handling.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// One or more field rules failed
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation not allowed in the record's current state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Request body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a not found error with message
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a conflict error with message
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Whether the failure was caused by the request rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound(_) | Self::Conflict(_) | Self::Json(_)
        )
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
