use thiserror::Error;

use crate::domain::{DeductionError, TransitionError, ValidationErrors};

/// Coarse classification of an `AppError`, for whoever translates failures
/// into a response (exit message, status code, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    ValidationFailed,
    Conflict,
    Internal,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        AppError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::ValidationFailed(_) => ErrorKind::ValidationFailed,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::Database(_) => ErrorKind::Internal,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::ValidationFailed(errors)
    }
}

impl From<TransitionError> for AppError {
    fn from(error: TransitionError) -> Self {
        AppError::Conflict(error.to_string())
    }
}

impl From<DeductionError> for AppError {
    fn from(error: DeductionError) -> Self {
        AppError::Conflict(error.to_string())
    }
}
