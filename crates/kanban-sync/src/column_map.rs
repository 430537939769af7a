use kanban_domain::{Column, ColumnId, EntityId};
use std::collections::HashMap;

/// Local column id -> remote column reference, for one board.
///
/// Filled when columns are loaded or created. Placeholder columns (whose
/// remote creation failed) are never entered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnRefMap {
    refs: HashMap<ColumnId, EntityId>,
}

impl ColumnRefMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, local: ColumnId, remote: EntityId) {
        self.refs.insert(local, remote);
    }

    pub fn remove(&mut self, local: &ColumnId) -> Option<EntityId> {
        self.refs.remove(local)
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn remote_of(&self, local: &ColumnId) -> Option<&EntityId> {
        self.refs.get(local)
    }

    pub fn local_of(&self, remote: &EntityId) -> Option<&ColumnId> {
        self.refs
            .iter()
            .find(|(_, r)| *r == remote)
            .map(|(local, _)| local)
    }

    /// Remote reference for `target` within `columns`.
    ///
    /// Order of resolution: the mapped reference of `target`; the mapped
    /// reference of another column with the same title; the first mapped
    /// column in board order; the first column's own id. `None` only when
    /// the board has no columns.
    pub fn resolve(&self, columns: &[Column], target: &ColumnId) -> Option<EntityId> {
        if let Some(remote) = self.remote_of(target) {
            return Some(remote.clone());
        }

        let title = columns.iter().find(|c| &c.id == target).map(|c| &c.title);
        if let Some(title) = title {
            let by_title = columns
                .iter()
                .filter(|c| &c.title == title)
                .find_map(|c| self.remote_of(&c.id));
            if let Some(remote) = by_title {
                return Some(remote.clone());
            }
        }

        columns
            .iter()
            .find_map(|c| self.remote_of(&c.id))
            .cloned()
            .or_else(|| columns.first().map(|c| c.id.clone()))
    }

    /// Local column a remote reference points at. The reference may be a
    /// remote column id or, from older records, a column title.
    pub fn locate(&self, columns: &[Column], remote: &EntityId) -> Option<ColumnId> {
        if let Some(local) = self.local_of(remote) {
            return Some(local.clone());
        }
        columns
            .iter()
            .find(|c| c.title.eq_ignore_ascii_case(remote.as_str()))
            .map(|c| c.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column> {
        vec![
            Column::new(ColumnId::from("10"), "Pending"),
            Column::new(ColumnId::placeholder("In review"), "In review"),
            Column::new(ColumnId::from("12"), "Done"),
        ]
    }

    fn mapped(columns: &[Column]) -> ColumnRefMap {
        let mut map = ColumnRefMap::new();
        for column in columns.iter().filter(|c| !c.id.is_placeholder()) {
            map.insert(column.id.clone(), column.id.clone());
        }
        map
    }

    #[test]
    fn test_resolve_mapped_column() {
        let columns = columns();
        let map = mapped(&columns);
        assert_eq!(
            map.resolve(&columns, &ColumnId::from("12")),
            Some(EntityId::from("12"))
        );
    }

    #[test]
    fn test_resolve_placeholder_falls_back_to_first_mapped() {
        let columns = columns();
        let map = mapped(&columns);
        assert_eq!(
            map.resolve(&columns, &columns[1].id),
            Some(EntityId::from("10"))
        );
    }

    #[test]
    fn test_resolve_by_title() {
        let mut columns = columns();
        columns.push(Column::new(ColumnId::from("local-done"), "Done"));
        let map = mapped(&columns[..3]);
        assert_eq!(
            map.resolve(&columns, &ColumnId::from("local-done")),
            Some(EntityId::from("12"))
        );
    }

    #[test]
    fn test_resolve_without_any_mapping_uses_first_column() {
        let columns = columns();
        let map = ColumnRefMap::new();
        assert_eq!(
            map.resolve(&columns, &ColumnId::from("12")),
            Some(EntityId::from("10"))
        );
        assert_eq!(map.resolve(&[], &ColumnId::from("12")), None);
    }

    #[test]
    fn test_locate_by_id_or_title() {
        let columns = columns();
        let map = mapped(&columns);
        assert_eq!(
            map.locate(&columns, &EntityId::from(12)),
            Some(ColumnId::from("12"))
        );
        assert_eq!(
            map.locate(&columns, &EntityId::from("pending")),
            Some(ColumnId::from("10"))
        );
        assert_eq!(map.locate(&columns, &EntityId::from("99")), None);
    }
}
