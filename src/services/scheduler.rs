//! Scheduler service: schedule computation, task intake and completion.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    DuplicateIdPolicy, MissingTaskPolicy, NewTaskPayload, ScheduleUpdate, SchedulerConfig, Task,
    TaskId, TaskStatus, TaskSummary,
};
use crate::domain::ports::{FactStore, StoreError, TaskFilter};

/// Order tasks by priority rank, then deadline.
///
/// The sort is stable, so tasks with equal keys keep store iteration order.
/// Status is not inspected here; callers pass only the tasks they want ranked.
pub fn order_schedule(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(|a, b| {
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then_with(|| a.deadline.cmp(&b.deadline))
    });
    tasks
}

/// Records to write when `id` is completed: the target itself (if stored)
/// marked Completed, and every dependent with `id` dropped from its
/// dependency set. A target that lists itself gets both changes.
fn completion_updates(id: &TaskId, target: Option<Task>, dependents: Vec<Task>) -> Vec<Task> {
    let mut updates: Vec<Task> = target.iter().map(Task::completed).collect();
    for dependent in dependents {
        match updates.iter_mut().find(|t| t.id == dependent.id) {
            Some(existing) => *existing = existing.without_dependency(id),
            None => updates.push(dependent.without_dependency(id)),
        }
    }
    updates
}

pub struct SchedulerService<S: FactStore> {
    store: Arc<S>,
    config: SchedulerConfig,
    /// Held across every mutating operation so cascades never interleave.
    write_lock: Mutex<()>,
}

impl<S: FactStore> SchedulerService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, SchedulerConfig::default())
    }

    pub fn with_config(store: Arc<S>, config: SchedulerConfig) -> Self {
        Self {
            store,
            config,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Pending tasks in recommended order. Dependencies do not gate ordering.
    #[instrument(skip(self))]
    pub async fn full_schedule(&self) -> DomainResult<Vec<TaskSummary>> {
        let pending = self
            .store
            .query(&TaskFilter::with_status(TaskStatus::Pending))
            .await?;
        let schedule: Vec<TaskSummary> = order_schedule(pending).iter().map(TaskSummary::from).collect();
        debug!(pending = schedule.len(), "schedule computed");
        Ok(schedule)
    }

    /// Head of the schedule, `None` when nothing is pending.
    pub async fn next_task(&self) -> DomainResult<Option<TaskSummary>> {
        Ok(self.full_schedule().await?.into_iter().next())
    }

    /// Validate and store a new task, then return the updated schedule.
    #[instrument(skip(self, payload))]
    pub async fn add_task(&self, payload: NewTaskPayload) -> DomainResult<ScheduleUpdate> {
        let task = payload.validate()?;
        let guard = self.write_lock.lock().await;

        match self.store.insert(&task).await {
            Ok(()) => {
                info!(task_id = %task.id, priority = %task.priority, deadline = %task.deadline, "task added");
            }
            Err(StoreError::Duplicate(id)) => match self.config.duplicate_ids {
                DuplicateIdPolicy::Reject => {
                    warn!(task_id = %id, "rejected duplicate task id");
                    return Err(DomainError::DuplicateTask(id));
                }
                DuplicateIdPolicy::Replace => {
                    self.store.replace(&id, &task).await?;
                    info!(task_id = %id, "existing task replaced");
                }
            },
            Err(e) => return Err(e.into()),
        }
        drop(guard);

        Ok(ScheduleUpdate {
            message: format!("Task '{}' added successfully", task.id),
            schedule: self.full_schedule().await?,
        })
    }

    /// Mark a task completed and remove it from every dependency set.
    ///
    /// `task_id` is optional because the caller's payload may omit it; an
    /// absent or blank identifier is a validation error. The status update
    /// and the whole cascade are written in one `replace_all`, so a store
    /// fault leaves every record as it was.
    #[instrument(skip(self))]
    pub async fn complete_task(&self, task_id: Option<&str>) -> DomainResult<ScheduleUpdate> {
        let id = task_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(TaskId::from)
            .ok_or(DomainError::MissingIdentifier)?;

        let guard = self.write_lock.lock().await;

        let target = self.store.get(&id).await?;
        if target.is_none() {
            match self.config.missing_task {
                MissingTaskPolicy::Ignore => {
                    debug!(task_id = %id, "completing unknown task, status update skipped");
                }
                MissingTaskPolicy::Error => return Err(DomainError::TaskNotFound(id)),
            }
        }

        let dependents = self.store.query(&TaskFilter::dependents_of(id.clone())).await?;
        let released = dependents.len();
        let updates = completion_updates(&id, target, dependents);
        self.store.replace_all(&updates).await?;
        drop(guard);

        info!(task_id = %id, dependents = released, "task marked completed");
        Ok(ScheduleUpdate {
            message: format!("Task '{id}' marked as completed"),
            schedule: self.full_schedule().await?,
        })
    }

    /// All facts matching `filter`, completed ones included.
    pub async fn list_tasks(&self, filter: TaskFilter) -> DomainResult<Vec<Task>> {
        Ok(self.store.query(&filter).await?)
    }

    pub async fn get_task(&self, id: &TaskId) -> DomainResult<Option<Task>> {
        Ok(self.store.get(id).await?)
    }
}
