//! Table output formatting for CLI commands
//!
//! Renders schedules and task listings using comfy-table.

use crate::domain::models::{Task, TaskPriority, TaskStatus, TaskSummary};
use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use super::truncate;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Format an ordered schedule; the first column is the position.
    pub fn format_schedule(&self, schedule: &[TaskSummary]) -> String {
        let mut table = Self::create_base_table();

        table.set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Priority").add_attribute(Attribute::Bold),
            Cell::new("Deadline").add_attribute(Attribute::Bold),
            Cell::new("Depends On").add_attribute(Attribute::Bold),
        ]);

        for (position, task) in schedule.iter().enumerate() {
            table.add_row(vec![
                Cell::new(position + 1),
                Cell::new(task.id.as_str()),
                Cell::new(truncate(&task.title, 40)),
                self.priority_cell(&task.priority),
                Cell::new(&task.deadline),
                Cell::new(format_dependencies(&task.dependencies)),
            ]);
        }

        table.to_string()
    }

    /// Format full task records, completed ones included.
    pub fn format_tasks(&self, tasks: &[Task]) -> String {
        let mut table = Self::create_base_table();

        table.set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Priority").add_attribute(Attribute::Bold),
            Cell::new("Deadline").add_attribute(Attribute::Bold),
            Cell::new("Depends On").add_attribute(Attribute::Bold),
        ]);

        for task in tasks {
            let status_cell = if self.use_colors {
                Cell::new(task.status).fg(status_color(task.status))
            } else {
                Cell::new(format!("{} {}", status_icon(task.status), task.status))
            };

            table.add_row(vec![
                Cell::new(task.id.as_str()),
                Cell::new(truncate(&task.title, 40)),
                status_cell,
                self.priority_cell(&task.priority),
                Cell::new(&task.deadline),
                Cell::new(format_dependencies(&task.dependencies)),
            ]);
        }

        table.to_string()
    }

    fn priority_cell(&self, priority: &TaskPriority) -> Cell {
        let cell = Cell::new(priority.label());
        if self.use_colors {
            cell.fg(priority_color(priority))
        } else {
            cell
        }
    }

    fn create_base_table() -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if color output is supported
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}

fn format_dependencies(deps: &[crate::domain::models::TaskId]) -> String {
    if deps.is_empty() {
        "-".to_string()
    } else {
        deps.iter().map(|d| d.as_str()).collect::<Vec<_>>().join(", ")
    }
}

fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Pending => Color::White,
        TaskStatus::Completed => Color::Green,
    }
}

fn status_icon(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "○",
        TaskStatus::Completed => "✓",
    }
}

fn priority_color(priority: &TaskPriority) -> Color {
    match priority {
        TaskPriority::High => Color::Red,
        TaskPriority::Medium => Color::Yellow,
        TaskPriority::Low => Color::Cyan,
        TaskPriority::Unrecognized(_) => Color::DarkGrey,
    }
}
