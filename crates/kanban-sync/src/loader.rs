use kanban_domain::{Column, TaskId};
use kanban_remote::{ApiColumn, ApiTask};
use std::collections::HashSet;

use crate::column_map::ColumnRefMap;

/// Build a board's column arrangement from the remote listings.
///
/// Columns are ordered by their remote `order` (unordered ones last, in
/// listing order). Each task lands in the column its remote reference names;
/// tasks whose reference resolves to nothing go to the first column. Repeated
/// task ids are kept once.
pub fn assemble_columns(
    mut api_columns: Vec<ApiColumn>,
    api_tasks: Vec<ApiTask>,
) -> (Vec<Column>, ColumnRefMap) {
    api_columns.sort_by_key(|c| c.order.unwrap_or(i64::MAX));

    let mut map = ColumnRefMap::new();
    let mut columns = api_columns
        .into_iter()
        .map(|api| {
            map.insert(api.id.clone(), api.id.clone());
            let title = api.display_title();
            Column::new(api.id, title)
        })
        .collect::<Vec<_>>();

    let mut seen: HashSet<TaskId> = HashSet::new();
    for api_task in api_tasks {
        if !seen.insert(api_task.id.clone()) {
            tracing::warn!("Task {} listed twice, keeping the first copy", api_task.id);
            continue;
        }

        let target = api_task
            .column_ref()
            .and_then(|r| map.locate(&columns, r))
            .and_then(|id| columns.iter().position(|c| c.id == id))
            .or_else(|| (!columns.is_empty()).then_some(0));

        match target {
            Some(index) => columns[index].tasks.push(api_task.into_task()),
            None => tracing::warn!("Dropping task {}: board has no columns", api_task.id),
        }
    }

    (columns, map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_domain::{ColumnId, EntityId};
    use serde_json::json;

    fn column(id: i64, title: &str, order: Option<i64>) -> ApiColumn {
        ApiColumn {
            id: id.into(),
            title: Some(title.to_string()),
            name: None,
            order,
        }
    }

    fn task(value: serde_json::Value) -> ApiTask {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_tasks_land_in_referenced_columns() {
        let (columns, map) = assemble_columns(
            vec![column(2, "Done", Some(2)), column(1, "Pending", Some(1))],
            vec![
                task(json!({"id": 10, "taskName": "A", "card_id": 2})),
                task(json!({"id": 11, "taskName": "B", "status": "Pending"})),
                task(json!({"id": 12, "taskName": "C", "card_id": 99})),
            ],
        );

        assert_eq!(columns[0].title, "Pending");
        assert_eq!(columns[1].title, "Done");
        assert_eq!(columns[0].task_ids(), vec!["11".into(), "12".into()]);
        assert_eq!(columns[1].task_ids(), vec!["10".into()]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.remote_of(&ColumnId::from("2")), Some(&EntityId::from("2")));
    }

    #[test]
    fn test_duplicate_tasks_are_kept_once() {
        let (columns, _) = assemble_columns(
            vec![column(1, "Pending", None)],
            vec![
                task(json!({"id": 10, "card_id": 1})),
                task(json!({"id": 10, "card_id": 1})),
            ],
        );
        assert_eq!(columns[0].tasks.len(), 1);
    }

    #[test]
    fn test_tasks_without_columns_are_dropped() {
        let (columns, map) =
            assemble_columns(Vec::new(), vec![task(json!({"id": 10, "card_id": 1}))]);
        assert!(columns.is_empty());
        assert!(map.is_empty());
    }
}
