//! Domain errors for the task scheduler.

use thiserror::Error;

use super::models::TaskId;
use super::ports::errors::StoreError;

/// Domain-level errors surfaced to callers of the scheduler.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("missing field {0}")]
    MissingField(&'static str),

    #[error("missing name")]
    MissingIdentifier,

    #[error("Task already exists: {0}")]
    DuplicateTask(TaskId),

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Validation errors abort the operation before the store is touched.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField(_) | Self::MissingIdentifier)
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
