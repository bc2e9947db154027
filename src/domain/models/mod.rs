//! Domain models for the task scheduler.

pub mod config;
pub mod payload;
pub mod task;

pub use config::{
    Config, DatabaseConfig, DuplicateIdPolicy, LoggingConfig, MissingTaskPolicy, SchedulerConfig,
};
pub use payload::NewTaskPayload;
pub use task::{
    priority_rank, ScheduleUpdate, Task, TaskId, TaskPriority, TaskStatus, TaskSummary,
    PRIORITY_RANKS, UNRANKED,
};
