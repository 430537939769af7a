use kanban_core::KanbanResult;

use crate::store::BoardStore;

pub mod board_commands;
pub mod task_commands;

pub use board_commands::*;
pub use task_commands::*;

/// Trait for store commands that mutate state
/// Commands represent intent and can be executed, logged, and replayed
pub trait Command: Send + Sync {
    /// Execute this command against the board store
    fn execute(&self, store: &mut BoardStore) -> KanbanResult<()>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}
