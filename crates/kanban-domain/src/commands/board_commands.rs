use super::Command;
use crate::id::BoardId;
use crate::store::BoardStore;
use kanban_core::KanbanResult;

/// Rename a board
pub struct RenameBoard {
    pub board_id: BoardId,
    pub name: String,
}

impl Command for RenameBoard {
    fn execute(&self, store: &mut BoardStore) -> KanbanResult<()> {
        store.replace_board(&self.board_id, |board| {
            let mut next = board.clone();
            next.update_name(self.name.clone());
            next
        });
        Ok(())
    }

    fn description(&self) -> String {
        format!("Rename board {} to '{}'", self.board_id, self.name)
    }
}
