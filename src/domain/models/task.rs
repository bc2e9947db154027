//! Task domain model.
//!
//! A task is the only fact the store holds. Every mutation replaces the
//! whole record, so the helpers here return modified copies instead of
//! editing in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process-wide priority rank table. Lower rank is scheduled first.
pub static PRIORITY_RANKS: [(&str, u32); 3] = [("High", 1), ("Medium", 2), ("Low", 3)];

/// Rank given to any label missing from [`PRIORITY_RANKS`].
pub const UNRANKED: u32 = 99;

/// Look up the rank of a priority label.
pub fn priority_rank(label: &str) -> u32 {
    PRIORITY_RANKS
        .iter()
        .find(|(name, _)| *name == label)
        .map_or(UNRANKED, |(_, rank)| *rank)
}

/// Caller-supplied task identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "completed" | "complete" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority label of a task.
///
/// Labels are matched exactly against [`PRIORITY_RANKS`]. Anything else is
/// kept verbatim so it round-trips, and sorts after every known label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskPriority {
    High,
    #[default]
    Medium,
    Low,
    Unrecognized(String),
}

impl TaskPriority {
    const RANKED: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Resolve a label to its variant; unlisted labels are kept as
    /// `Unrecognized`. Ranks always come from [`PRIORITY_RANKS`].
    pub fn parse(label: &str) -> Self {
        Self::RANKED
            .into_iter()
            .find(|known| known.label() == label)
            .unwrap_or_else(|| Self::Unrecognized(label.to_string()))
    }

    pub fn label(&self) -> &str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Unrecognized(label) => label,
        }
    }

    pub fn rank(&self) -> u32 {
        priority_rank(self.label())
    }
}

impl From<String> for TaskPriority {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<TaskPriority> for String {
    fn from(priority: TaskPriority) -> Self {
        priority.label().to_string()
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One task fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, immutable once created
    pub id: TaskId,
    /// Human-readable title
    pub title: String,
    /// Longer description from the caller's payload
    #[serde(default)]
    pub description: String,
    /// Lexically ordered deadline (ISO-like strings sort chronologically)
    pub deadline: String,
    /// Priority label
    pub priority: TaskPriority,
    /// Task IDs this depends on; targets need not exist
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
    /// Current status
    #[serde(default)]
    pub status: TaskStatus,
    /// When created
    pub created_at: DateTime<Utc>,
    /// When the record was last replaced
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a pending task with no dependencies.
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            deadline: String::new(),
            priority: TaskPriority::default(),
            dependencies: Vec::new(),
            status: TaskStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = deadline.into();
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Add a dependency. Duplicates are ignored.
    pub fn with_dependency(mut self, task_id: impl Into<TaskId>) -> Self {
        let task_id = task_id.into();
        if !self.dependencies.contains(&task_id) {
            self.dependencies.push(task_id);
        }
        self
    }

    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    pub fn depends_on(&self, task_id: &TaskId) -> bool {
        self.dependencies.contains(task_id)
    }

    /// Copy of this record with status Completed. Dependencies are kept.
    pub fn completed(&self) -> Self {
        Self {
            status: TaskStatus::Completed,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    /// Copy of this record with `task_id` dropped from its dependencies.
    pub fn without_dependency(&self, task_id: &TaskId) -> Self {
        Self {
            dependencies: self
                .dependencies
                .iter()
                .filter(|dep| *dep != task_id)
                .cloned()
                .collect(),
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}

/// Schedule-facing projection of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub id: TaskId,
    pub title: String,
    pub deadline: String,
    pub priority: TaskPriority,
    pub dependencies: Vec<TaskId>,
}

impl From<&Task> for TaskSummary {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            deadline: task.deadline.clone(),
            priority: task.priority.clone(),
            dependencies: task.dependencies.clone(),
        }
    }
}

/// Reply to a mutating operation: what happened plus the schedule afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleUpdate {
    pub message: String,
    pub schedule: Vec<TaskSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ranks() {
        assert_eq!(TaskPriority::High.rank(), 1);
        assert_eq!(TaskPriority::Medium.rank(), 2);
        assert_eq!(TaskPriority::Low.rank(), 3);
        assert_eq!(TaskPriority::parse("Urgent").rank(), UNRANKED);
        // Labels are exact
        assert_eq!(TaskPriority::parse("high").rank(), UNRANKED);
    }

    #[test]
    fn test_rank_table_and_variants_agree() {
        for (label, rank) in PRIORITY_RANKS {
            let priority = TaskPriority::parse(label);
            assert!(!matches!(priority, TaskPriority::Unrecognized(_)), "{label} has no variant");
            assert_eq!(priority.label(), label);
            assert_eq!(priority.rank(), rank);
        }
        for known in TaskPriority::RANKED {
            assert_ne!(known.rank(), UNRANKED, "{known} missing from the rank table");
        }
    }

    #[test]
    fn test_priority_label_round_trip() {
        let json = serde_json::to_string(&TaskPriority::parse("Urgent")).unwrap();
        assert_eq!(json, "\"Urgent\"");
        let parsed: TaskPriority = serde_json::from_str("\"High\"").unwrap();
        assert_eq!(parsed, TaskPriority::High);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(TaskStatus::from_str("Pending"), Some(TaskStatus::Pending));
        assert_eq!(TaskStatus::from_str("complete"), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::from_str("done"), None);
    }

    #[test]
    fn test_with_dependency_dedups() {
        let task = Task::new("D", "Deploy")
            .with_dependency("A")
            .with_dependency("A")
            .with_dependency("B");
        assert_eq!(task.dependencies, vec![TaskId::from("A"), TaskId::from("B")]);
    }

    #[test]
    fn test_completed_keeps_dependencies() {
        let task = Task::new("D", "Deploy").with_dependency("A");
        let done = task.completed();
        assert_eq!(done.status, TaskStatus::Completed);
        assert_eq!(done.dependencies, task.dependencies);
        assert_eq!(done.id, task.id);
    }

    #[test]
    fn test_without_dependency() {
        let task = Task::new("D", "Deploy")
            .with_dependency("A")
            .with_dependency("B");
        let trimmed = task.without_dependency(&TaskId::from("A"));
        assert_eq!(trimmed.dependencies, vec![TaskId::from("B")]);
        assert_eq!(trimmed.status, task.status);
    }

    #[test]
    fn test_summary_drops_description() {
        let task = Task::new("A", "Write report")
            .with_description("Quarterly numbers")
            .with_deadline("2024-01-10")
            .with_priority(TaskPriority::High);
        let summary = TaskSummary::from(&task);
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("description").is_none());
        assert_eq!(json["priority"], "High");
        assert_eq!(json["deadline"], "2024-01-10");
    }
}
