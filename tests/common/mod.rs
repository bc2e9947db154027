//! Common test utilities for integration tests
//!
//! Provides payload builders and store fixtures shared across test files.

use std::sync::Arc;

use taskbrain::adapters::sqlite::{all_embedded_migrations, create_test_pool, Migrator};
use taskbrain::{NewTaskPayload, SchedulerConfig, SchedulerService, SqliteFactStore};

/// Complete add-task payload.
pub fn payload(id: &str, priority: &str, deadline: &str, deps: &[&str]) -> NewTaskPayload {
    NewTaskPayload {
        id: Some(id.to_string()),
        title: Some(format!("Task {id}")),
        description: Some(format!("Description of {id}")),
        deadline: Some(deadline.to_string()),
        priority: Some(priority.to_string()),
        dependencies: Some(deps.iter().map(ToString::to_string).collect()),
    }
}

/// Fresh in-memory SQLite store with the schema applied.
pub async fn sqlite_store() -> SqliteFactStore {
    let pool = create_test_pool().await.expect("Failed to create test pool");
    Migrator::new(pool.clone())
        .run_embedded_migrations(all_embedded_migrations())
        .await
        .expect("Failed to run migrations");
    SqliteFactStore::new(pool)
}

#[allow(dead_code)]
pub async fn sqlite_scheduler(config: SchedulerConfig) -> SchedulerService<SqliteFactStore> {
    SchedulerService::with_config(Arc::new(sqlite_store().await), config)
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
#[allow(dead_code)]
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
