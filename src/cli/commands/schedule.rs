//! Schedule CLI commands: full schedule and next task.

use anyhow::{Context, Result};

use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::TaskSummary;
use crate::domain::ports::FactStore;
use crate::services::SchedulerService;

#[derive(Debug, serde::Serialize)]
pub struct ScheduleOutput {
    pub schedule: Vec<TaskSummary>,
}

impl CommandOutput for ScheduleOutput {
    fn to_human(&self) -> String {
        if self.schedule.is_empty() {
            return "No pending tasks.".to_string();
        }
        TableFormatter::new().format_schedule(&self.schedule)
    }
}

#[derive(Debug, serde::Serialize)]
pub struct NextTaskOutput {
    pub next_task: Option<TaskSummary>,
}

impl CommandOutput for NextTaskOutput {
    fn to_human(&self) -> String {
        let Some(task) = &self.next_task else {
            return "none".to_string();
        };

        let mut lines = vec![
            format!("Next task: {} ({})", task.title, task.id),
            format!("  Priority: {}", task.priority),
            format!("  Deadline: {}", task.deadline),
        ];
        if !task.dependencies.is_empty() {
            let deps: Vec<&str> = task.dependencies.iter().map(|d| d.as_str()).collect();
            lines.push(format!("  Depends on: {}", deps.join(", ")));
        }
        lines.join("\n")
    }
}

pub async fn handle_schedule<S: FactStore>(service: &SchedulerService<S>, json: bool) -> Result<()> {
    let schedule = service.full_schedule().await.context("Failed to compute schedule")?;
    output(&ScheduleOutput { schedule }, json);
    Ok(())
}

pub async fn handle_next<S: FactStore>(service: &SchedulerService<S>, json: bool) -> Result<()> {
    let next_task = service.next_task().await.context("Failed to compute schedule")?;
    output(&NextTaskOutput { next_task }, json);
    Ok(())
}
