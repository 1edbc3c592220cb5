use thiserror::Error;

use crate::domain::task_validation::ValidationError;

/// Errors surfaced by repository round-trips and the task store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaskStoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Failed to {operation}: {message}")]
    Repository { operation: String, message: String },
}

impl TaskStoreError {
    pub fn task_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Task",
            id: id.into(),
        }
    }

    pub fn category_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Category",
            id: id.into(),
        }
    }

    pub fn repository(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Repository {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<ValidationError> for TaskStoreError {
    fn from(err: ValidationError) -> Self {
        Self::Validation {
            field: err.field().to_string(),
            reason: err.to_string(),
        }
    }
}
