//! Taskbrain - task scheduling core
//!
//! Stores tasks with a priority, deadline and dependency set, and recommends
//! which pending task to work on next.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): task facts, payload validation, errors, and
//!   the `FactStore` port
//! - **Service Layer** (`services`): schedule ordering and completion cascade
//! - **Adapters** (`adapters`): in-memory and SQLite fact stores
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskbrain::{InMemoryFactStore, NewTaskPayload, SchedulerService};
//!
//! # async fn example() -> Result<(), taskbrain::DomainError> {
//! let scheduler = SchedulerService::new(Arc::new(InMemoryFactStore::new()));
//! scheduler
//!     .add_task(NewTaskPayload {
//!         id: Some("write-report".into()),
//!         title: Some("Write report".into()),
//!         description: Some(String::new()),
//!         deadline: Some("2024-01-10".into()),
//!         priority: Some("High".into()),
//!         dependencies: Some(vec![]),
//!     })
//!     .await?;
//! let next = scheduler.next_task().await?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::{InMemoryFactStore, SqliteFactStore};
pub use domain::models::{
    Config, DuplicateIdPolicy, MissingTaskPolicy, NewTaskPayload, ScheduleUpdate, SchedulerConfig,
    Task, TaskId, TaskPriority, TaskStatus, TaskSummary,
};
pub use domain::ports::{FactStore, StoreError, TaskFilter};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{order_schedule, SchedulerService};
