//! Incoming task payload and its validation.

use serde::{Deserialize, Serialize};

use super::task::{Task, TaskId, TaskPriority};
use crate::domain::errors::{DomainError, DomainResult};

/// Raw add-task request. Every field is required; absence is reported by
/// [`NewTaskPayload::validate`] rather than by deserialization so callers get
/// a `missing field <name>` error instead of a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTaskPayload {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<String>,
    pub priority: Option<String>,
    pub dependencies: Option<Vec<String>>,
}

impl NewTaskPayload {
    /// Check required fields in declaration order and build a pending task.
    ///
    /// The id and every dependency id are trimmed, matching how completion
    /// reads its identifier.
    pub fn validate(self) -> DomainResult<Task> {
        let id = self
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or(DomainError::MissingField("id"))?;
        let title = self.title.ok_or(DomainError::MissingField("title"))?;
        let description = self
            .description
            .ok_or(DomainError::MissingField("description"))?;
        let deadline = self.deadline.ok_or(DomainError::MissingField("deadline"))?;
        let priority = self.priority.ok_or(DomainError::MissingField("priority"))?;
        let dependencies = self
            .dependencies
            .ok_or(DomainError::MissingField("dependencies"))?;

        let task = Task::new(TaskId::new(id), title)
            .with_description(description)
            .with_deadline(deadline)
            .with_priority(TaskPriority::parse(&priority));
        Ok(dependencies
            .iter()
            .map(|dep| dep.trim())
            .filter(|dep| !dep.is_empty())
            .fold(task, |task, dep| task.with_dependency(dep)))
    }
}
