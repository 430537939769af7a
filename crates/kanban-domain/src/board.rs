use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::column::Column;
use crate::id::{BoardId, ColumnId, TaskId};
use crate::task::Task;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    /// False for name-only stubs whose columns and tasks were never fetched.
    #[serde(default)]
    pub loaded: bool,
}

/// Where a task currently lives.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskLocation {
    pub column_id: ColumnId,
    pub column_index: usize,
    pub index: usize,
    pub task: Task,
}

impl Board {
    pub fn new(id: BoardId, name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            id,
            name: name.into(),
            columns,
            loaded: true,
        }
    }

    pub fn stub(id: BoardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            columns: Vec::new(),
            loaded: false,
        }
    }

    pub fn update_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn column(&self, column_id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == column_id)
    }

    pub fn column_by_title(&self, title: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.title == title)
    }

    /// Scan columns in order for the task. Column membership is the canonical
    /// answer to "which column is this task in".
    pub fn find_task(&self, task_id: &TaskId) -> Option<TaskLocation> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(column_index, column)| {
                column.position_of(task_id).map(|index| TaskLocation {
                    column_id: column.id.clone(),
                    column_index,
                    index,
                    task: column.tasks[index].clone(),
                })
            })
    }

    /// The task's status: the id of the column containing it.
    pub fn status_of(&self, task_id: &TaskId) -> Option<&ColumnId> {
        self.columns
            .iter()
            .find(|c| c.contains(task_id))
            .map(|c| &c.id)
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.iter().flat_map(|c| c.tasks.iter())
    }

    /// True when no task id appears more than once across the board.
    pub fn is_consistent(&self) -> bool {
        let mut seen = HashSet::new();
        self.tasks().all(|t| seen.insert(&t.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        let mut pending = Column::new(ColumnId::from("pending"), "Pending");
        pending.tasks.push(Task::new(TaskId::from("t1"), "One"));
        pending.tasks.push(Task::new(TaskId::from("t2"), "Two"));
        let mut doing = Column::new(ColumnId::from("doing"), "In progress");
        doing.tasks.push(Task::new(TaskId::from("t3"), "Three"));
        Board::new(BoardId::from("b1"), "Alpha", vec![pending, doing])
    }

    #[test]
    fn test_find_task_scans_columns_in_order() {
        let board = board();
        let location = board.find_task(&TaskId::from("t3")).unwrap();
        assert_eq!(location.column_id, ColumnId::from("doing"));
        assert_eq!(location.column_index, 1);
        assert_eq!(location.index, 0);
        assert_eq!(location.task.title, "Three");

        assert!(board.find_task(&TaskId::from("missing")).is_none());
    }

    #[test]
    fn test_status_follows_membership() {
        let board = board();
        assert_eq!(
            board.status_of(&TaskId::from("t2")),
            Some(&ColumnId::from("pending"))
        );
        assert_eq!(board.status_of(&TaskId::from("nope")), None);
    }

    #[test]
    fn test_consistency_detects_duplicates() {
        let mut board = board();
        assert!(board.is_consistent());
        assert_eq!(board.task_count(), 3);

        let dup = board.columns[0].tasks[0].clone();
        board.columns[1].tasks.push(dup);
        assert!(!board.is_consistent());
    }

    #[test]
    fn test_stub_is_not_loaded() {
        let stub = Board::stub(BoardId::from("b2"), "Later");
        assert!(!stub.loaded);
        assert!(stub.columns.is_empty());
    }
}
