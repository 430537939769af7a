use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::id::{ColumnId, TaskId};

pub const DEFAULT_AVATAR_URL: &str = "https://i.pravatar.cc/40";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            other => Err(format!(
                "Invalid priority '{}'. Use low, medium, high, or urgent",
                other
            )),
        }
    }
}

/// Completion percentage, always within 0..=100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    pub const MAX: u8 = 100;

    /// Out-of-range values are clamped rather than rejected.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(0, Self::MAX as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Progress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Ok(Self::new(raw.round() as i64))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default = "default_avatar_url")]
    pub avatar_url: String,
}

fn default_avatar_url() -> String {
    DEFAULT_AVATAR_URL.to_string()
}

impl Assignee {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: String::new(),
            avatar_url: default_avatar_url(),
        }
    }
}

impl Default for Assignee {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// A persisted task. Which column holds it is not a field of the task: the
/// owning [`crate::Column`] is the single record of its status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub progress: Progress,
    #[serde(default)]
    pub assignee: Assignee,
    /// Name of whoever handed the task out.
    #[serde(default)]
    pub allocator: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            progress: Progress::default(),
            assignee: Assignee::default(),
            allocator: String::new(),
            created_at: Utc::now(),
            deadline: None,
        }
    }
}

/// A task the user is still composing. It has no id and is never installed in
/// the board store; it becomes a [`Task`] once the remote create returns one.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub column_id: ColumnId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub progress: Progress,
    pub assignee: Assignee,
    pub allocator: String,
    pub created_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
}

impl TaskDraft {
    pub fn new(column_id: ColumnId) -> Self {
        Self {
            column_id,
            title: String::new(),
            description: String::new(),
            priority: Priority::Medium,
            progress: Progress::default(),
            assignee: Assignee::default(),
            allocator: String::new(),
            created_at: Utc::now(),
            deadline: None,
        }
    }

    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            progress: self.progress,
            assignee: self.assignee,
            allocator: self.allocator,
            created_at: self.created_at,
            deadline: self.deadline,
        }
    }
}
