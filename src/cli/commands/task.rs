//! Task CLI commands: add, complete, list, show.

use anyhow::{Context, Result};
use clap::Args;
use std::io::Read;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{NewTaskPayload, ScheduleUpdate, Task, TaskId, TaskStatus};
use crate::domain::ports::{FactStore, TaskFilter};
use crate::services::SchedulerService;

/// Arguments for `add`. Every field is optional here so that a missing one
/// is reported by the scheduler as `missing field <name>`.
#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Task ID (unique)
    #[arg(long)]
    pub id: Option<String>,
    /// Short title
    #[arg(short, long)]
    pub title: Option<String>,
    /// Longer description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Deadline, ISO-8601 recommended so it sorts chronologically
    #[arg(long)]
    pub deadline: Option<String>,
    /// Priority label (High, Medium, Low)
    #[arg(short, long)]
    pub priority: Option<String>,
    /// ID of a task this one depends on (repeatable)
    #[arg(long = "depends-on", value_name = "ID")]
    pub depends_on: Vec<String>,
    /// Read the whole payload as JSON from a file, or `-` for stdin
    #[arg(long, value_name = "FILE", conflicts_with_all = ["id", "title", "description", "deadline", "priority", "depends_on"])]
    pub from_json: Option<PathBuf>,
}

impl AddArgs {
    /// Build the payload the scheduler validates.
    pub fn into_payload(self) -> Result<NewTaskPayload> {
        let Some(path) = self.from_json else {
            return Ok(NewTaskPayload {
                id: self.id,
                title: self.title,
                description: self.description,
                deadline: self.deadline,
                priority: self.priority,
                dependencies: Some(self.depends_on),
            });
        };

        let raw = if path.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read payload from stdin")?;
            buf
        } else {
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read payload from {}", path.display()))?
        };

        serde_json::from_str(&raw).context("Task payload is not a valid JSON object")
    }
}

#[derive(Debug, serde::Serialize)]
pub struct UpdateOutput(pub ScheduleUpdate);

impl CommandOutput for UpdateOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.0.message.clone()];
        if self.0.schedule.is_empty() {
            lines.push("No pending tasks.".to_string());
        } else {
            lines.push(TableFormatter::new().format_schedule(&self.0.schedule));
        }
        lines.join("\n")
    }
}

#[derive(Debug, serde::Serialize)]
pub struct TaskListOutput {
    pub tasks: Vec<Task>,
    pub total: usize,
}

impl CommandOutput for TaskListOutput {
    fn to_human(&self) -> String {
        if self.tasks.is_empty() {
            return "No tasks found.".to_string();
        }
        format!(
            "{}\nShowing {} task(s)",
            TableFormatter::new().format_tasks(&self.tasks),
            self.total
        )
    }
}

#[derive(Debug, serde::Serialize)]
pub struct TaskDetailOutput {
    pub task: Task,
}

impl CommandOutput for TaskDetailOutput {
    fn to_human(&self) -> String {
        let task = &self.task;
        let mut lines = vec![
            "Task Details:".to_string(),
            format!("  ID: {}", task.id),
            format!("  Title: {}", task.title),
            format!("  Status: {}", task.status),
            format!("  Priority: {} (rank {})", task.priority, task.priority.rank()),
            format!("  Deadline: {}", task.deadline),
        ];
        if !task.description.is_empty() {
            lines.push(format!("  Description: {}", task.description));
        }
        lines.push(format!(
            "  Created at: {}",
            task.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        lines.push(format!(
            "  Updated at: {}",
            task.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        if !task.dependencies.is_empty() {
            lines.push("  Dependencies:".to_string());
            lines.extend(task.dependencies.iter().map(|dep| format!("    - {dep}")));
        }
        lines.join("\n")
    }
}

pub async fn handle_add<S: FactStore>(service: &SchedulerService<S>, args: AddArgs, json: bool) -> Result<()> {
    let payload = args.into_payload()?;
    let update = service.add_task(payload).await.context("Failed to add task")?;
    output(&UpdateOutput(update), json);
    Ok(())
}

pub async fn handle_complete<S: FactStore>(
    service: &SchedulerService<S>,
    id: Option<String>,
    json: bool,
) -> Result<()> {
    let update = service
        .complete_task(id.as_deref())
        .await
        .context("Failed to complete task")?;
    output(&UpdateOutput(update), json);
    Ok(())
}

pub async fn handle_list<S: FactStore>(
    service: &SchedulerService<S>,
    status: Option<String>,
    json: bool,
) -> Result<()> {
    let status = status
        .map(|s| {
            TaskStatus::from_str(&s)
                .ok_or_else(|| anyhow::anyhow!("Invalid status '{s}'. Must be one of: pending, completed"))
        })
        .transpose()?;

    let filter = TaskFilter {
        status,
        ..Default::default()
    };
    let tasks = service.list_tasks(filter).await.context("Failed to list tasks")?;
    let total = tasks.len();
    output(&TaskListOutput { tasks, total }, json);
    Ok(())
}

pub async fn handle_show<S: FactStore>(service: &SchedulerService<S>, id: String, json: bool) -> Result<()> {
    let task = service
        .get_task(&TaskId::from(id.as_str()))
        .await
        .context("Failed to retrieve task")?
        .ok_or_else(|| anyhow::anyhow!("Task {id} not found. Use 'taskbrain list' to see available tasks."))?;

    output(&TaskDetailOutput { task }, json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flags_become_payload_with_dependencies() {
        let args = AddArgs {
            id: Some("A".to_string()),
            title: Some("Alpha".to_string()),
            ..Default::default()
        };
        let payload = args.into_payload().unwrap();
        assert_eq!(payload.id.as_deref(), Some("A"));
        assert_eq!(payload.dependencies, Some(vec![]));
        assert!(payload.deadline.is_none());
    }

    #[test]
    fn test_payload_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"id": "A", "title": "Alpha", "description": "", "deadline": "2024-01-01", "priority": "High", "dependencies": ["B"]}}"#
        )
        .unwrap();

        let args = AddArgs {
            from_json: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let task = args.into_payload().unwrap().validate().unwrap();
        assert_eq!(task.dependencies, vec![TaskId::from("B")]);
    }

    #[test]
    fn test_update_output_json_shape() {
        let update = ScheduleUpdate {
            message: "Task 'A' added successfully".to_string(),
            schedule: vec![],
        };
        let json = UpdateOutput(update).to_json();
        assert_eq!(json["message"], "Task 'A' added successfully");
        assert!(json["schedule"].as_array().unwrap().is_empty());
    }
}
