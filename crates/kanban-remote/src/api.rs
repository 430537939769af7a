use async_trait::async_trait;
use kanban_core::KanbanResult;
use kanban_domain::{BoardId, ColumnId, TaskId};

use crate::wire::{
    ApiBoard, ApiColumn, ApiTask, BoardPatch, ColumnPatch, NewBoard, NewColumn, TaskPayload,
};

/// The remote collaborator that owns the persisted boards, columns ("cards"
/// in the remote vocabulary), and tasks.
///
/// Every call is a single request with no retries. Failures of any kind come
/// back as `KanbanError::Remote`.
#[async_trait]
pub trait KanbanApi: Send + Sync {
    async fn list_boards(&self) -> KanbanResult<Vec<ApiBoard>>;
    async fn get_board(&self, id: &BoardId) -> KanbanResult<ApiBoard>;
    async fn create_board(&self, board: &NewBoard) -> KanbanResult<ApiBoard>;
    async fn update_board(&self, id: &BoardId, patch: &BoardPatch) -> KanbanResult<()>;
    async fn delete_board(&self, id: &BoardId) -> KanbanResult<()>;

    async fn list_columns(&self, board_id: &BoardId) -> KanbanResult<Vec<ApiColumn>>;
    async fn create_column(&self, board_id: &BoardId, column: &NewColumn)
        -> KanbanResult<ApiColumn>;
    async fn update_column(&self, column_id: &ColumnId, patch: &ColumnPatch) -> KanbanResult<()>;
    async fn delete_column(&self, column_id: &ColumnId) -> KanbanResult<()>;

    async fn list_tasks(&self, board_id: &BoardId) -> KanbanResult<Vec<ApiTask>>;
    async fn create_task(&self, board_id: &BoardId, task: &TaskPayload) -> KanbanResult<ApiTask>;
    /// Full replace of the task. Returns the stored record when the collaborator
    /// echoes one back.
    async fn update_task(&self, task_id: &TaskId, task: &TaskPayload)
        -> KanbanResult<Option<ApiTask>>;
    async fn delete_task(&self, task_id: &TaskId) -> KanbanResult<()>;
}
