use async_trait::async_trait;

use crate::domain::models::{Task, TaskId, TaskStatus};
use crate::domain::ports::errors::StoreError;

/// Pattern used to select task facts.
#[derive(Default, Debug, Clone)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    /// Only tasks whose dependency set contains this id
    pub depends_on: Option<TaskId>,
    pub limit: Option<usize>,
}

impl TaskFilter {
    pub fn with_status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn dependents_of(task_id: TaskId) -> Self {
        Self {
            depends_on: Some(task_id),
            ..Default::default()
        }
    }

    /// Whether a single fact matches the status and dependency pattern.
    /// `limit` is applied by the store.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(ref dep) = self.depends_on {
            if !task.depends_on(dep) {
                return false;
            }
        }
        true
    }
}

/// Port for the task fact store.
///
/// Records are returned in store iteration order. `replace` and
/// `replace_all` are the only ways to change a record and must be atomic: no
/// reader may observe the store between the removal of an old record and the
/// insertion of its replacement.
#[async_trait]
pub trait FactStore: Send + Sync {
    /// Insert a new record. Fails with `Duplicate` if the id is live.
    async fn insert(&self, task: &Task) -> Result<(), StoreError>;

    /// Get a record by id
    async fn get(&self, id: &TaskId) -> Result<Option<Task>, StoreError>;

    /// All records matching the filter, in iteration order
    async fn query(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError>;

    /// Atomically swap the record for `id` with `task`, keeping its position
    async fn replace(&self, id: &TaskId, task: &Task) -> Result<(), StoreError>;

    /// Replace every record keyed by its own id, all or nothing. Fails with
    /// `NotFound` and changes nothing if any id is absent.
    async fn replace_all(&self, tasks: &[Task]) -> Result<(), StoreError>;

    /// Number of live records
    async fn count(&self) -> Result<usize, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches_status_and_dependency() {
        let task = Task::new("D", "Deploy").with_dependency("A");

        assert!(TaskFilter::default().matches(&task));
        assert!(TaskFilter::with_status(TaskStatus::Pending).matches(&task));
        assert!(!TaskFilter::with_status(TaskStatus::Completed).matches(&task));
        assert!(TaskFilter::dependents_of(TaskId::from("A")).matches(&task));
        assert!(!TaskFilter::dependents_of(TaskId::from("B")).matches(&task));
    }
}
