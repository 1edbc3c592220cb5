use super::task::{CreateTaskInput, Task};

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyTitle,
    InconsistentDates { field: String, reason: String },
    InvalidCompletedState { is_completed: bool },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "Task title cannot be empty"),
            ValidationError::InconsistentDates { field, reason } => {
                write!(f, "Date validation failed for {}: {}", field, reason)
            }
            ValidationError::InvalidCompletedState { is_completed } => {
                if *is_completed {
                    write!(f, "completed task is missing completed_at")
                } else {
                    write!(f, "completed_at should only be set when the task is completed")
                }
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyTitle => "title",
            ValidationError::InconsistentDates { field, .. } => field,
            ValidationError::InvalidCompletedState { .. } => "completed_at",
        }
    }
}

pub struct TaskValidator;

impl TaskValidator {
    /// Validate client input before it is sent to the repository
    pub fn validate_new(input: &CreateTaskInput) -> Result<(), ValidationError> {
        if input.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Validate a stored record against the data contract
    pub fn validate(task: &Task) -> Result<(), ValidationError> {
        Self::validate_title(task)?;
        Self::validate_dates(task)?;
        Self::validate_completed_state(task)?;
        Ok(())
    }

    fn validate_title(task: &Task) -> Result<(), ValidationError> {
        if task.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }

    fn validate_dates(task: &Task) -> Result<(), ValidationError> {
        if task.updated_at < task.created_at {
            return Err(ValidationError::InconsistentDates {
                field: "updated_at".to_string(),
                reason: "cannot be before created_at".to_string(),
            });
        }
        Ok(())
    }

    fn validate_completed_state(task: &Task) -> Result<(), ValidationError> {
        if task.is_completed != task.completed_at.is_some() {
            return Err(ValidationError::InvalidCompletedState {
                is_completed: task.is_completed,
            });
        }
        Ok(())
    }
}
