//! In-memory implementation of the FactStore.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::models::{Task, TaskId};
use crate::domain::ports::{FactStore, StoreError, TaskFilter};

/// Vec-backed fact store. Iteration order is insertion order; every
/// operation holds one lock for its whole duration.
#[derive(Debug, Default)]
pub struct InMemoryFactStore {
    tasks: RwLock<Vec<Task>>,
}

impl InMemoryFactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FactStore for InMemoryFactStore {
    async fn insert(&self, task: &Task) -> Result<(), StoreError> {
        let mut tasks = self.tasks.write().await;
        if tasks.iter().any(|t| t.id == task.id) {
            return Err(StoreError::Duplicate(task.id.clone()));
        }
        tasks.push(task.clone());
        Ok(())
    }

    async fn get(&self, id: &TaskId) -> Result<Option<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|t| &t.id == id).cloned())
    }

    async fn query(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        let matching = tasks.iter().filter(|t| filter.matches(t)).cloned();
        Ok(match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }

    async fn replace(&self, id: &TaskId, task: &Task) -> Result<(), StoreError> {
        if &task.id != id {
            return Err(StoreError::IdMismatch {
                expected: id.clone(),
                actual: task.id.clone(),
            });
        }

        let mut tasks = self.tasks.write().await;
        let slot = tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn replace_all(&self, replacements: &[Task]) -> Result<(), StoreError> {
        let mut tasks = self.tasks.write().await;

        let mut slots = Vec::with_capacity(replacements.len());
        for replacement in replacements {
            let slot = tasks
                .iter()
                .position(|t| t.id == replacement.id)
                .ok_or_else(|| StoreError::NotFound(replacement.id.clone()))?;
            slots.push(slot);
        }
        for (slot, replacement) in slots.into_iter().zip(replacements) {
            tasks[slot] = replacement.clone();
        }
        Ok(())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.tasks.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::TaskStatus;

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemoryFactStore::new();
        store.insert(&Task::new("A", "Alpha")).await.unwrap();

        let found = store.get(&TaskId::from("A")).await.unwrap();
        assert_eq!(found.unwrap().title, "Alpha");
        assert!(store.get(&TaskId::from("B")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let store = InMemoryFactStore::new();
        store.insert(&Task::new("A", "Alpha")).await.unwrap();

        let err = store.insert(&Task::new("A", "Again")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(id) if id.as_str() == "A"));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_replace_keeps_position() {
        let store = InMemoryFactStore::new();
        for id in ["A", "B", "C"] {
            store.insert(&Task::new(id, id)).await.unwrap();
        }

        let b = store.get(&TaskId::from("B")).await.unwrap().unwrap();
        store.replace(&b.id, &b.completed()).await.unwrap();

        let all = store.query(&TaskFilter::default()).await.unwrap();
        let ids: Vec<_> = all.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(all[1].status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_replace_missing_and_mismatched() {
        let store = InMemoryFactStore::new();
        store.insert(&Task::new("A", "Alpha")).await.unwrap();

        let err = store
            .replace(&TaskId::from("Z"), &Task::new("Z", "Zed"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        let err = store
            .replace(&TaskId::from("A"), &Task::new("B", "Bravo"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::IdMismatch { .. }));
    }

    #[tokio::test]
    async fn test_replace_all_is_all_or_nothing() {
        let store = InMemoryFactStore::new();
        store.insert(&Task::new("A", "Alpha")).await.unwrap();
        store.insert(&Task::new("D", "Delta").with_dependency("A")).await.unwrap();

        let batch = [Task::new("A", "Alpha").completed(), Task::new("Z", "Zed")];
        let err = store.replace_all(&batch).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id.as_str() == "Z"));
        let a = store.get(&TaskId::from("A")).await.unwrap().unwrap();
        assert_eq!(a.status, TaskStatus::Pending);

        let d = store.get(&TaskId::from("D")).await.unwrap().unwrap();
        let batch = [a.completed(), d.without_dependency(&a.id)];
        store.replace_all(&batch).await.unwrap();

        let all = store.query(&TaskFilter::default()).await.unwrap();
        assert_eq!(all[0].status, TaskStatus::Completed);
        assert!(all[1].dependencies.is_empty());
    }

    #[tokio::test]
    async fn test_query_with_limit() {
        let store = InMemoryFactStore::new();
        for id in ["A", "B", "C"] {
            store.insert(&Task::new(id, id)).await.unwrap();
        }

        let filter = TaskFilter {
            limit: Some(2),
            ..Default::default()
        };
        assert_eq!(store.query(&filter).await.unwrap().len(), 2);
    }
}
