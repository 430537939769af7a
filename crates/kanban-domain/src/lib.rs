pub mod board;
pub mod column;
pub mod commands;
pub mod editable;
pub mod field_update;
pub mod id;
pub mod reorder;
pub mod store;
pub mod task;

pub use board::{Board, TaskLocation};
pub use column::{Column, DefaultColumn};
pub use editable::{TaskFields, TaskUpdate};
pub use field_update::FieldUpdate;
pub use id::{BoardId, ColumnId, EntityId, TaskId};
pub use reorder::{DragItem, DragPhase};
pub use store::BoardStore;
pub use task::{Assignee, Priority, Progress, Task, TaskDraft};
