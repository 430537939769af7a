use serde::{Deserialize, Serialize};

use crate::id::{ColumnId, TaskId};
use crate::task::Task;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn new(id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            tasks: Vec::new(),
        }
    }

    pub fn position_of(&self, task_id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == task_id)
    }

    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.position_of(task_id).is_some()
    }

    pub fn task_ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|t| t.id.clone()).collect()
    }
}

/// The fixed set of columns every new board starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultColumn {
    pub title: String,
    /// 1-based display order sent to the remote collaborator.
    pub order: u32,
}

impl DefaultColumn {
    pub fn from_titles<I, S>(titles: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        titles
            .into_iter()
            .enumerate()
            .map(|(i, title)| Self {
                title: title.into(),
                order: i as u32 + 1,
            })
            .collect()
    }
}
