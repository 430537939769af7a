use super::Command;
use crate::editable::TaskFields;
use crate::id::{BoardId, ColumnId, TaskId};
use crate::reorder;
use crate::store::BoardStore;
use crate::{Board, Task};
use kanban_core::{Editable, KanbanResult};

/// Insert a persisted task into a column (appended when `index` is `None`)
pub struct InsertTask {
    pub board_id: BoardId,
    pub column_id: ColumnId,
    pub index: Option<usize>,
    pub task: Task,
}

impl Command for InsertTask {
    fn execute(&self, store: &mut BoardStore) -> KanbanResult<()> {
        // A task id already on the board would end up in two places.
        if store.find_task(&self.board_id, &self.task.id).is_some() {
            return Ok(());
        }
        store.replace_board(&self.board_id, |board| {
            let mut next = board.clone();
            if let Some(column) = next.columns.iter_mut().find(|c| c.id == self.column_id) {
                let index = self
                    .index
                    .unwrap_or(column.tasks.len())
                    .min(column.tasks.len());
                column.tasks.insert(index, self.task.clone());
            }
            next
        });
        Ok(())
    }

    fn description(&self) -> String {
        format!(
            "Insert task '{}' into column {}",
            self.task.title, self.column_id
        )
    }
}

/// Remove a task from whichever column holds it
pub struct RemoveTask {
    pub board_id: BoardId,
    pub task_id: TaskId,
}

impl Command for RemoveTask {
    fn execute(&self, store: &mut BoardStore) -> KanbanResult<()> {
        store.replace_board(&self.board_id, |board| {
            let mut next = board.clone();
            for column in next.columns.iter_mut() {
                column.tasks.retain(|t| t.id != self.task_id);
            }
            next
        });
        Ok(())
    }

    fn description(&self) -> String {
        format!("Remove task {}", self.task_id)
    }
}

/// Overwrite a task's editable fields, leaving its position alone
pub struct UpdateTask {
    pub board_id: BoardId,
    pub task_id: TaskId,
    pub fields: TaskFields,
}

impl Command for UpdateTask {
    fn execute(&self, store: &mut BoardStore) -> KanbanResult<()> {
        store.replace_board(&self.board_id, |board| {
            let mut next = board.clone();
            if let Some(task) = next
                .columns
                .iter_mut()
                .flat_map(|c| c.tasks.iter_mut())
                .find(|t| t.id == self.task_id)
            {
                self.fields.clone().apply_to(task);
            }
            next
        });
        Ok(())
    }

    fn description(&self) -> String {
        format!("Update task {}", self.task_id)
    }
}

/// Move a task to a column at a given index (clamped)
pub struct MoveTask {
    pub board_id: BoardId,
    pub task_id: TaskId,
    pub column_id: ColumnId,
    pub index: usize,
}

impl Command for MoveTask {
    fn execute(&self, store: &mut BoardStore) -> KanbanResult<()> {
        store.replace_board(&self.board_id, |board| {
            match reorder::move_task_to(&board.columns, &self.task_id, &self.column_id, self.index)
            {
                Some(columns) => Board {
                    columns,
                    ..board.clone()
                },
                None => board.clone(),
            }
        });
        Ok(())
    }

    fn description(&self) -> String {
        format!(
            "Move task {} to column {} at {}",
            self.task_id, self.column_id, self.index
        )
    }
}
