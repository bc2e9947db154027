//! SQLite implementation of the FactStore.

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::domain::models::{Task, TaskId, TaskPriority, TaskStatus};
use crate::domain::ports::{FactStore, StoreError, TaskFilter};

use super::parse_datetime;

#[derive(Clone)]
pub struct SqliteFactStore {
    pool: SqlitePool,
}

impl SqliteFactStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const INSERT_TASK: &str = r"INSERT INTO tasks (seq, id, title, description, deadline, priority,
    dependencies, status, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

#[async_trait]
impl FactStore for SqliteFactStore {
    async fn insert(&self, task: &Task) -> Result<(), StoreError> {
        let dependencies_json = serde_json::to_string(&task.dependencies)?;

        let result = sqlx::query(INSERT_TASK)
            .bind(None::<i64>)
            .bind(task.id.as_str())
            .bind(&task.title)
            .bind(&task.description)
            .bind(&task.deadline)
            .bind(task.priority.label())
            .bind(&dependencies_json)
            .bind(task.status.as_str())
            .bind(task.created_at.to_rfc3339())
            .bind(task.updated_at.to_rfc3339())
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::Duplicate(task.id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, id: &TaskId) -> Result<Option<Task>, StoreError> {
        let row: Option<TaskRow> = sqlx::query_as("SELECT * FROM tasks WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Task::try_from).transpose()
    }

    async fn query(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        let mut sql = String::from("SELECT * FROM tasks WHERE 1 = 1");
        if filter.status.is_some() {
            sql.push_str(" AND status = ?");
        }
        if filter.depends_on.is_some() {
            sql.push_str(" AND EXISTS (SELECT 1 FROM json_each(tasks.dependencies) WHERE json_each.value = ?)");
        }
        sql.push_str(" ORDER BY seq ASC");
        if filter.limit.is_some() {
            sql.push_str(" LIMIT ?");
        }

        let mut q = sqlx::query_as::<_, TaskRow>(&sql);
        if let Some(status) = filter.status {
            q = q.bind(status.as_str());
        }
        if let Some(ref dep) = filter.depends_on {
            q = q.bind(dep.as_str());
        }
        if let Some(limit) = filter.limit {
            q = q.bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows = q.fetch_all(&self.pool).await?;
        rows.into_iter().map(Task::try_from).collect()
    }

    async fn replace(&self, id: &TaskId, task: &Task) -> Result<(), StoreError> {
        if &task.id != id {
            return Err(StoreError::IdMismatch {
                expected: id.clone(),
                actual: task.id.clone(),
            });
        }

        let mut tx = self.pool.begin().await?;
        replace_in_transaction(&mut tx, task).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn replace_all(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        for task in tasks {
            // An early return drops the transaction, which rolls it back
            replace_in_transaction(&mut tx, task).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

/// Delete and re-insert `task` under its existing `seq`.
async fn replace_in_transaction(
    tx: &mut Transaction<'_, Sqlite>,
    task: &Task,
) -> Result<(), StoreError> {
    let dependencies_json = serde_json::to_string(&task.dependencies)?;

    let seq: Option<(i64,)> = sqlx::query_as("SELECT seq FROM tasks WHERE id = ?")
        .bind(task.id.as_str())
        .fetch_optional(&mut **tx)
        .await?;
    let Some((seq,)) = seq else {
        return Err(StoreError::NotFound(task.id.clone()));
    };

    sqlx::query("DELETE FROM tasks WHERE seq = ?")
        .bind(seq)
        .execute(&mut **tx)
        .await?;

    sqlx::query(INSERT_TASK)
        .bind(seq)
        .bind(task.id.as_str())
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.deadline)
        .bind(task.priority.label())
        .bind(&dependencies_json)
        .bind(task.status.as_str())
        .bind(task.created_at.to_rfc3339())
        .bind(task.updated_at.to_rfc3339())
        .execute(&mut **tx)
        .await?;

    Ok(())
}

#[derive(sqlx::FromRow)]
#[allow(dead_code)]
struct TaskRow {
    seq: i64,
    id: String,
    title: String,
    description: String,
    deadline: String,
    priority: String,
    dependencies: String,
    status: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<TaskRow> for Task {
    type Error = StoreError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let status = TaskStatus::from_str(&row.status)
            .ok_or_else(|| StoreError::Serialization(format!("Invalid status: {}", row.status)))?;
        let dependencies: Vec<TaskId> = serde_json::from_str(&row.dependencies)?;

        Ok(Task {
            id: TaskId::new(row.id),
            title: row.title,
            description: row.description,
            deadline: row.deadline,
            priority: TaskPriority::parse(&row.priority),
            dependencies,
            status,
            created_at: parse_datetime(&row.created_at)?,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}
