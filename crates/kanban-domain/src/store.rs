//! The board store: the one in-memory record of every loaded board.
//!
//! Writers never edit a board in place. `replace_board` hands the updater a
//! shared reference and installs whatever it returns, so a reader holding a
//! clone of the previous board never sees half of a change.

use kanban_core::{KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};

use crate::board::{Board, TaskLocation};
use crate::column::Column;
use crate::id::{BoardId, TaskId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardStore {
    boards: Vec<Board>,
    active: Option<BoardId>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_boards(boards: Vec<Board>) -> Self {
        let active = boards.first().map(|b| b.id.clone());
        Self { boards, active }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    pub fn board(&self, id: &BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| &b.id == id)
    }

    pub fn position_of(&self, id: &BoardId) -> Option<usize> {
        self.boards.iter().position(|b| &b.id == id)
    }

    pub fn active_id(&self) -> Option<&BoardId> {
        self.active.as_ref()
    }

    /// The selected board, or `None` when nothing is loaded.
    pub fn active_board(&self) -> Option<&Board> {
        self.active.as_ref().and_then(|id| self.board(id))
    }

    /// Select a board. Unknown ids are ignored and reported as `false`.
    pub fn set_active(&mut self, id: &BoardId) -> bool {
        if self.board(id).is_some() {
            self.active = Some(id.clone());
            true
        } else {
            false
        }
    }

    /// Apply a pure transformation to one board. Returns `false` (and changes
    /// nothing) when no loaded board has this id.
    pub fn replace_board<F>(&mut self, id: &BoardId, updater: F) -> bool
    where
        F: FnOnce(&Board) -> Board,
    {
        match self.boards.iter().position(|b| &b.id == id) {
            Some(index) => {
                let next = updater(&self.boards[index]);
                self.boards[index] = next;
                true
            }
            None => false,
        }
    }

    /// Install a new column arrangement for a board.
    pub fn install_columns(&mut self, id: &BoardId, columns: Vec<Column>) -> bool {
        self.replace_board(id, |board| Board {
            columns,
            loaded: true,
            ..board.clone()
        })
    }

    pub fn find_task(&self, board_id: &BoardId, task_id: &TaskId) -> Option<TaskLocation> {
        self.board(board_id)?.find_task(task_id)
    }

    /// Replace the board list with freshly listed stubs. Boards that are
    /// already loaded keep their columns; the active selection survives if its
    /// board is still listed, otherwise the first board becomes active.
    pub fn install_boards(&mut self, listed: Vec<Board>) {
        let boards = listed
            .into_iter()
            .map(|stub| match self.board(&stub.id) {
                Some(existing) if existing.loaded => Board {
                    name: stub.name,
                    ..existing.clone()
                },
                _ => stub,
            })
            .collect::<Vec<_>>();
        self.boards = boards;

        let still_listed = self
            .active
            .as_ref()
            .map(|id| self.board(id).is_some())
            .unwrap_or(false);
        if !still_listed {
            self.active = self.boards.first().map(|b| b.id.clone());
        }
    }

    pub fn push_board(&mut self, board: Board) {
        self.boards.push(board);
    }

    /// Put a board back at a given position (clamped).
    pub fn insert_board_at(&mut self, index: usize, board: Board) {
        let index = index.min(self.boards.len());
        self.boards.insert(index, board);
    }

    /// Remove a board. Removing the only remaining board is rejected with no
    /// change. When the removed board was active, the first remaining board
    /// becomes active.
    pub fn remove_board(&mut self, id: &BoardId) -> KanbanResult<(usize, Board)> {
        let index = self
            .position_of(id)
            .ok_or_else(|| KanbanError::NotFound(format!("Board {}", id)))?;
        if self.boards.len() == 1 {
            return Err(KanbanError::Validation(
                "Cannot delete the only remaining board".to_string(),
            ));
        }

        let removed = self.boards.remove(index);
        if self.active.as_ref() == Some(id) {
            self.active = self.boards.first().map(|b| b.id.clone());
        }
        Ok((index, removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ColumnId;
    use crate::task::Task;

    fn loaded(id: &str) -> Board {
        let mut column = Column::new(ColumnId::from(format!("{}-c1", id)), "Pending");
        column
            .tasks
            .push(Task::new(TaskId::from(format!("{}-t1", id)), "Task"));
        Board::new(BoardId::from(id), id, vec![column])
    }

    #[test]
    fn test_active_board_defaults_to_first() {
        let store = BoardStore::with_boards(vec![loaded("a"), loaded("b")]);
        assert_eq!(store.active_board().unwrap().id, BoardId::from("a"));
        assert!(BoardStore::new().active_board().is_none());
    }

    #[test]
    fn test_replace_board_touches_only_target() {
        let mut store = BoardStore::with_boards(vec![loaded("a"), loaded("b")]);
        let before_b = store.board(&BoardId::from("b")).cloned();

        let replaced = store.replace_board(&BoardId::from("a"), |board| Board {
            name: "renamed".to_string(),
            ..board.clone()
        });

        assert!(replaced);
        assert_eq!(store.board(&BoardId::from("a")).unwrap().name, "renamed");
        assert_eq!(store.board(&BoardId::from("b")).cloned(), before_b);
    }

    #[test]
    fn test_replace_unknown_board_is_noop() {
        let mut store = BoardStore::with_boards(vec![loaded("a")]);
        let before = store.clone();
        assert!(!store.replace_board(&BoardId::from("zzz"), |b| b.clone()));
        assert_eq!(store, before);
    }

    #[test]
    fn test_find_task() {
        let store = BoardStore::with_boards(vec![loaded("a"), loaded("b")]);
        let location = store
            .find_task(&BoardId::from("b"), &TaskId::from("b-t1"))
            .unwrap();
        assert_eq!(location.column_id, ColumnId::from("b-c1"));
        assert!(store
            .find_task(&BoardId::from("a"), &TaskId::from("b-t1"))
            .is_none());
    }

    #[test]
    fn test_remove_sole_board_is_rejected() {
        let mut store = BoardStore::with_boards(vec![loaded("a")]);
        let before = store.clone();

        let result = store.remove_board(&BoardId::from("a"));
        assert!(matches!(result, Err(KanbanError::Validation(_))));
        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_active_board_selects_fallback() {
        let mut store = BoardStore::with_boards(vec![loaded("a"), loaded("b"), loaded("c")]);
        store.set_active(&BoardId::from("b"));

        let (index, removed) = store.remove_board(&BoardId::from("b")).unwrap();
        assert_eq!(index, 1);
        assert_eq!(removed.id, BoardId::from("b"));
        assert_eq!(store.active_id(), Some(&BoardId::from("a")));
    }

    #[test]
    fn test_install_boards_keeps_loaded_content() {
        let mut store = BoardStore::with_boards(vec![loaded("a")]);
        store.install_boards(vec![
            Board::stub(BoardId::from("a"), "A renamed"),
            Board::stub(BoardId::from("b"), "B"),
        ]);

        let a = store.board(&BoardId::from("a")).unwrap();
        assert!(a.loaded);
        assert_eq!(a.name, "A renamed");
        assert_eq!(a.task_count(), 1);
        assert!(!store.board(&BoardId::from("b")).unwrap().loaded);
        assert_eq!(store.active_id(), Some(&BoardId::from("a")));
    }

    #[test]
    fn test_set_active_unknown_is_ignored() {
        let mut store = BoardStore::with_boards(vec![loaded("a")]);
        assert!(!store.set_active(&BoardId::from("x")));
        assert_eq!(store.active_id(), Some(&BoardId::from("a")));
    }
}
