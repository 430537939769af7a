use kanban_domain::{BoardId, ColumnId, DragItem};

use crate::sequencer::Ticket;

/// An in-progress drag gesture on one board.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub board_id: BoardId,
    pub active: DragItem,
    /// Column and index the dragged task started from.
    pub origin: Option<(ColumnId, usize)>,
    /// Last element the pointer passed over.
    pub hovered: Option<DragItem>,
    pub(crate) ticket: Option<Ticket>,
}

impl DragSession {
    pub(crate) fn new(
        board_id: BoardId,
        active: DragItem,
        origin: Option<(ColumnId, usize)>,
        ticket: Option<Ticket>,
    ) -> Self {
        Self {
            board_id,
            active,
            origin,
            hovered: None,
            ticket,
        }
    }

    pub fn is_task_drag(&self) -> bool {
        matches!(self.active, DragItem::Task(_))
    }
}
