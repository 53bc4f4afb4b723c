use thiserror::Error;

/// Errors raised by task store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Task reference '{0}' matches more than one task. Use more characters of the id.")]
    AmbiguousReference(String),

    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidField { field: String, value: String },

    #[error("Failed to encode tasks: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl StoreError {
    /// Errors caused by what the user typed, as opposed to storage failures
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            StoreError::TaskNotFound(_) | StoreError::AmbiguousReference(_) | StoreError::InvalidField { .. }
        )
    }
}
