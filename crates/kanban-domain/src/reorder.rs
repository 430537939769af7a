//! Drag-and-drop reordering.
//!
//! Every function here is pure: it reads the current arrangement and returns a
//! new one, or `None` when the gesture leaves the arrangement unchanged. Stale
//! or unknown identifiers are treated as "unchanged" rather than as errors, so
//! a result can never hold a task in zero or two columns.
//!
//! Column membership is resolved by a linear scan on every call. Hover
//! recomputation runs on every pointer move, and a scan over the board's tasks
//! is cheap enough that no secondary index has to be kept in sync.

use crate::column::Column;
use crate::id::{ColumnId, TaskId};

/// The element being dragged, or the element under the pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DragItem {
    Column(ColumnId),
    Task(TaskId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// Intermediate pointer position.
    Hover,
    /// Terminal event of the gesture.
    Drop,
}

/// Compute the arrangement produced by dragging `active` over `over`.
///
/// Cases, in precedence order:
/// 1. column over column: positional move, applied on drop only;
/// 2. task over task: reinsert at the over task's index, across columns if needed;
/// 3. task over a column body: append to that column.
pub fn reorder(
    columns: &[Column],
    active: &DragItem,
    over: &DragItem,
    phase: DragPhase,
) -> Option<Vec<Column>> {
    if active == over {
        return None;
    }

    match (active, over) {
        (DragItem::Column(active), DragItem::Column(over)) => match phase {
            DragPhase::Drop => move_column(columns, active, over),
            DragPhase::Hover => None,
        },
        (DragItem::Task(active), DragItem::Task(over)) => {
            move_task_over_task(columns, active, over)
        }
        (DragItem::Task(task), DragItem::Column(column)) => {
            move_task_to_column(columns, task, column)
        }
        (DragItem::Column(_), DragItem::Task(_)) => None,
    }
}

/// Move the active column to the over column's position. Task lists travel
/// with their columns untouched.
pub fn move_column(columns: &[Column], active: &ColumnId, over: &ColumnId) -> Option<Vec<Column>> {
    let from = column_index(columns, active)?;
    let to = column_index(columns, over)?;
    if from == to {
        return None;
    }
    Some(array_move(columns, from, to))
}

/// Reinsert `active` at the index `over` currently occupies.
pub fn move_task_over_task(
    columns: &[Column],
    active: &TaskId,
    over: &TaskId,
) -> Option<Vec<Column>> {
    if active == over {
        return None;
    }
    let (source, from) = locate_task(columns, active)?;
    let (target, to) = locate_task(columns, over)?;

    let mut next = columns.to_vec();
    if source == target {
        next[source].tasks = array_move(&columns[source].tasks, from, to);
    } else {
        let task = next[source].tasks.remove(from);
        next[target].tasks.insert(to, task);
    }
    Some(next)
}

/// Append the task to the end of `column`. Dropping a task on its own column
/// is a no-op.
pub fn move_task_to_column(
    columns: &[Column],
    task: &TaskId,
    column: &ColumnId,
) -> Option<Vec<Column>> {
    let (source, from) = locate_task(columns, task)?;
    let target = column_index(columns, column)?;
    if source == target {
        return None;
    }

    let mut next = columns.to_vec();
    let moved = next[source].tasks.remove(from);
    next[target].tasks.push(moved);
    Some(next)
}

/// Place the task in `column` at `index`, clamped to the column's bounds.
///
/// Used for explicit move requests and to put a task back where it was when a
/// remote move is rolled back.
pub fn move_task_to(
    columns: &[Column],
    task: &TaskId,
    column: &ColumnId,
    index: usize,
) -> Option<Vec<Column>> {
    let (source, from) = locate_task(columns, task)?;
    let target = column_index(columns, column)?;

    let mut next = columns.to_vec();
    if source == target {
        let to = index.min(columns[source].tasks.len() - 1);
        if to == from {
            return None;
        }
        next[source].tasks = array_move(&columns[source].tasks, from, to);
    } else {
        let moved = next[source].tasks.remove(from);
        let to = index.min(next[target].tasks.len());
        next[target].tasks.insert(to, moved);
    }
    Some(next)
}

/// `(column index, task index)` of a task, scanning columns in order.
pub fn locate_task(columns: &[Column], task: &TaskId) -> Option<(usize, usize)> {
    columns
        .iter()
        .enumerate()
        .find_map(|(ci, column)| column.position_of(task).map(|ti| (ci, ti)))
}

fn column_index(columns: &[Column], column: &ColumnId) -> Option<usize> {
    columns.iter().position(|c| &c.id == column)
}

/// Remove the element at `from` and insert it at `to`; everything in between
/// shifts by one toward the vacated slot.
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut next = items.to_vec();
    let item = next.remove(from);
    next.insert(to, item);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;

    fn column(id: &str, tasks: &[&str]) -> Column {
        let mut column = Column::new(ColumnId::from(id), id);
        column.tasks = tasks
            .iter()
            .map(|t| Task::new(TaskId::from(*t), *t))
            .collect();
        column
    }

    fn ids(column: &Column) -> Vec<&str> {
        column.tasks.iter().map(|t| t.id.as_str()).collect()
    }

    fn task(id: &str) -> DragItem {
        DragItem::Task(TaskId::from(id))
    }

    fn col(id: &str) -> DragItem {
        DragItem::Column(ColumnId::from(id))
    }

    fn assert_each_task_once(columns: &[Column], expected: usize) {
        let mut all: Vec<&str> = columns.iter().flat_map(ids).collect();
        assert_eq!(all.len(), expected);
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), expected);
    }

    #[test]
    fn test_same_item_is_noop_for_every_case() {
        let columns = vec![column("pending", &["t1", "t2"]), column("doing", &[])];
        for phase in [DragPhase::Hover, DragPhase::Drop] {
            assert!(reorder(&columns, &task("t1"), &task("t1"), phase).is_none());
            assert!(reorder(&columns, &col("doing"), &col("doing"), phase).is_none());
        }
    }

    #[test]
    fn test_move_to_other_column_at_over_index() {
        let columns = vec![
            column("pending", &["t1", "t2"]),
            column("doing", &["t3", "t4"]),
        ];

        let next = reorder(&columns, &task("t1"), &task("t4"), DragPhase::Hover).unwrap();
        assert_eq!(ids(&next[0]), vec!["t2"]);
        assert_eq!(ids(&next[1]), vec!["t3", "t1", "t4"]);
        assert_each_task_once(&next, 4);
    }

    #[test]
    fn test_same_column_first_to_last_shifts_others_up() {
        let columns = vec![column("pending", &["t1", "t2", "t3", "t4"])];

        let next = reorder(&columns, &task("t1"), &task("t4"), DragPhase::Drop).unwrap();
        assert_eq!(ids(&next[0]), vec!["t2", "t3", "t4", "t1"]);
    }

    #[test]
    fn test_same_column_moving_up() {
        let columns = vec![column("pending", &["t1", "t2", "t3"])];

        let next = reorder(&columns, &task("t3"), &task("t1"), DragPhase::Hover).unwrap();
        assert_eq!(ids(&next[0]), vec!["t3", "t1", "t2"]);
    }

    #[test]
    fn test_task_over_column_appends() {
        let columns = vec![column("pending", &["t1", "t2"]), column("doing", &["t3"])];

        let next = reorder(&columns, &task("t1"), &col("doing"), DragPhase::Hover).unwrap();
        assert_eq!(ids(&next[0]), vec!["t2"]);
        assert_eq!(ids(&next[1]), vec!["t3", "t1"]);
    }

    #[test]
    fn test_task_over_own_column_is_noop() {
        let columns = vec![column("pending", &["t1", "t2"]), column("doing", &[])];
        assert!(reorder(&columns, &task("t1"), &col("pending"), DragPhase::Drop).is_none());
    }

    #[test]
    fn test_task_over_empty_column() {
        let columns = vec![column("pending", &["t1"]), column("done", &[])];

        let next = reorder(&columns, &task("t1"), &col("done"), DragPhase::Drop).unwrap();
        assert!(next[0].tasks.is_empty());
        assert_eq!(ids(&next[1]), vec!["t1"]);
    }

    #[test]
    fn test_column_move_only_on_drop() {
        let columns = vec![
            column("a", &["t1"]),
            column("b", &["t2"]),
            column("c", &[]),
        ];

        assert!(reorder(&columns, &col("a"), &col("c"), DragPhase::Hover).is_none());

        let next = reorder(&columns, &col("a"), &col("c"), DragPhase::Drop).unwrap();
        let order: Vec<&str> = next.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
        assert_eq!(ids(&next[2]), vec!["t1"]);
        assert_eq!(ids(&next[0]), vec!["t2"]);
    }

    #[test]
    fn test_column_over_task_is_noop() {
        let columns = vec![column("a", &["t1"]), column("b", &[])];
        assert!(reorder(&columns, &col("b"), &task("t1"), DragPhase::Drop).is_none());
    }

    #[test]
    fn test_unknown_ids_leave_arrangement_unchanged() {
        let columns = vec![column("a", &["t1"]), column("b", &["t2"])];

        assert!(reorder(&columns, &task("gone"), &task("t2"), DragPhase::Drop).is_none());
        assert!(reorder(&columns, &task("t1"), &task("gone"), DragPhase::Drop).is_none());
        assert!(reorder(&columns, &task("t1"), &col("gone"), DragPhase::Drop).is_none());
        assert!(reorder(&columns, &col("gone"), &col("a"), DragPhase::Drop).is_none());
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let columns = vec![column("a", &["t1", "t2"]), column("b", &[])];
        let before = columns.clone();

        let _ = reorder(&columns, &task("t1"), &col("b"), DragPhase::Drop);
        assert_eq!(columns, before);
    }

    #[test]
    fn test_move_away_and_back_restores_column() {
        let columns = vec![
            column("a", &["t1", "t2", "t3"]),
            column("b", &["t4"]),
        ];

        let moved = move_task_to(&columns, &TaskId::from("t2"), &ColumnId::from("b"), 0).unwrap();
        assert_eq!(ids(&moved[0]), vec!["t1", "t3"]);
        assert_eq!(ids(&moved[1]), vec!["t2", "t4"]);

        let back = move_task_to(&moved, &TaskId::from("t2"), &ColumnId::from("a"), 1).unwrap();
        assert_eq!(ids(&back[0]), ids(&columns[0]));
        assert_eq!(back, columns);
    }

    #[test]
    fn test_move_task_to_clamps_index() {
        let columns = vec![column("a", &["t1", "t2"]), column("b", &["t3"])];

        let next = move_task_to(&columns, &TaskId::from("t1"), &ColumnId::from("b"), 99).unwrap();
        assert_eq!(ids(&next[1]), vec!["t3", "t1"]);

        let next = move_task_to(&columns, &TaskId::from("t1"), &ColumnId::from("a"), 99).unwrap();
        assert_eq!(ids(&next[0]), vec!["t2", "t1"]);

        assert!(move_task_to(&columns, &TaskId::from("t2"), &ColumnId::from("a"), 5).is_none());
    }

    #[test]
    fn test_long_gesture_keeps_every_task_once() {
        let mut columns = vec![
            column("a", &["t1", "t2", "t3"]),
            column("b", &["t4", "t5"]),
            column("c", &[]),
        ];
        let path = [
            task("t5"),
            col("c"),
            task("t2"),
            col("b"),
            task("t1"),
            task("t4"),
            col("a"),
        ];

        for over in path.iter() {
            if let Some(next) = reorder(&columns, &task("t1"), over, DragPhase::Hover) {
                columns = next;
            }
            assert_each_task_once(&columns, 5);
        }
    }

    #[test]
    fn test_array_move() {
        assert_eq!(array_move(&[1, 2, 3, 4], 0, 3), vec![2, 3, 4, 1]);
        assert_eq!(array_move(&[1, 2, 3, 4], 3, 1), vec![1, 4, 2, 3]);
    }
}
