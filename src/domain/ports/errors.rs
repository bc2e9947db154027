use thiserror::Error;

use crate::domain::models::TaskId;

/// Errors raised by fact store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("A task with id {0} already exists")]
    Duplicate(TaskId),

    #[error("No task with id {0}")]
    NotFound(TaskId),

    #[error("Replacement for {expected} carries id {actual}")]
    IdMismatch { expected: TaskId, actual: TaskId },

    #[error("Store backend failure: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
