//! The sync coordinator.
//!
//! Each mutation runs the same sequence: take a ticket, apply the change to
//! the store, call the remote API, then reconcile. Reconciliation only ever
//! touches the entity the ticket was issued for, and only while that ticket
//! is still the newest one for the entity.
//!
//! Store locks are never held across an `.await`.

use kanban_core::{AppConfig, Editable, KanbanError, KanbanResult};
use kanban_domain::commands::{
    Command, InsertTask, MoveTask, RemoveTask, RenameBoard, UpdateTask,
};
use kanban_domain::{
    reorder, Board, BoardId, BoardStore, Column, ColumnId, DefaultColumn, DragItem, DragPhase,
    EntityId, Task, TaskDraft, TaskFields, TaskId,
};
use kanban_remote::{BoardPatch, ColumnPatch, KanbanApi, NewBoard, NewColumn, TaskPayload};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

use crate::column_map::ColumnRefMap;
use crate::drag::DragSession;
use crate::loader::assemble_columns;
use crate::sequencer::{EntityKey, Sequencer, Ticket};

pub struct SyncCoordinator<A: KanbanApi> {
    api: Arc<A>,
    store: Arc<RwLock<BoardStore>>,
    column_refs: Mutex<HashMap<BoardId, ColumnRefMap>>,
    sequencer: Mutex<Sequencer>,
    drag: Mutex<Option<DragSession>>,
    last_error: Mutex<Option<String>>,
    default_columns: Vec<DefaultColumn>,
}

impl<A: KanbanApi> SyncCoordinator<A> {
    pub fn new(api: Arc<A>) -> Self {
        let titles = AppConfig::default().effective_default_columns();
        Self {
            api,
            store: Arc::new(RwLock::new(BoardStore::new())),
            column_refs: Mutex::new(HashMap::new()),
            sequencer: Mutex::new(Sequencer::new()),
            drag: Mutex::new(None),
            last_error: Mutex::new(None),
            default_columns: DefaultColumn::from_titles(titles),
        }
    }

    pub fn with_default_columns(mut self, columns: Vec<DefaultColumn>) -> Self {
        self.default_columns = columns;
        self
    }

    /// Shared handle to the store for readers that render it.
    pub fn store(&self) -> Arc<RwLock<BoardStore>> {
        Arc::clone(&self.store)
    }

    pub fn snapshot(&self) -> BoardStore {
        self.store.read().clone()
    }

    pub fn active_board(&self) -> Option<Board> {
        self.store.read().active_board().cloned()
    }

    pub fn board(&self, board_id: &BoardId) -> Option<Board> {
        self.store.read().board(board_id).cloned()
    }

    pub fn default_columns(&self) -> &[DefaultColumn] {
        &self.default_columns
    }

    /// The most recent failure reported by any mutation.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }

    pub fn clear_error(&self) {
        *self.last_error.lock() = None;
    }

    fn report(&self, action: &str, err: &KanbanError) {
        tracing::error!("{} failed: {}", action, err);
        *self.last_error.lock() = Some(format!("{}: {}", action, err));
    }

    fn issue(&self, key: EntityKey) -> Ticket {
        self.sequencer.lock().issue(key)
    }

    fn is_current(&self, ticket: &Ticket) -> bool {
        self.sequencer.lock().is_current(ticket)
    }

    fn finish(&self, ticket: &Ticket) {
        self.sequencer.lock().finish(ticket);
    }

    fn execute(&self, command: &dyn Command) -> KanbanResult<()> {
        tracing::debug!("{}", command.description());
        command.execute(&mut self.store.write())
    }

    /// Remote reference for a column of a board.
    fn resolve_column(&self, board: &Board, column_id: &ColumnId) -> EntityId {
        let refs = self.column_refs.lock();
        let empty = ColumnRefMap::new();
        refs.get(&board.id)
            .unwrap_or(&empty)
            .resolve(&board.columns, column_id)
            .unwrap_or_else(|| column_id.clone())
    }

    /// Full payload for a task as it currently sits in the store.
    fn task_payload(&self, board_id: &BoardId, task_id: &TaskId) -> KanbanResult<TaskPayload> {
        let store = self.store.read();
        let board = store
            .board(board_id)
            .ok_or_else(|| KanbanError::NotFound(format!("Board {}", board_id)))?;
        let location = board
            .find_task(task_id)
            .ok_or_else(|| KanbanError::NotFound(format!("Task {}", task_id)))?;
        let card_id = self.resolve_column(board, &location.column_id);
        Ok(TaskPayload::from_task(&location.task, card_id))
    }

    /// List boards, install them as stubs, and load whichever is active.
    pub async fn load_boards(&self) -> KanbanResult<()> {
        let listed = match self.api.list_boards().await {
            Ok(listed) => listed,
            Err(e) => {
                self.report("Loading boards", &e);
                return Err(e);
            }
        };

        let stubs = listed
            .into_iter()
            .map(|b| Board::stub(b.id, b.name))
            .collect::<Vec<_>>();
        tracing::info!("Loaded {} boards", stubs.len());

        let active = {
            let mut store = self.store.write();
            store.install_boards(stubs);
            store.active_id().cloned()
        };

        match active {
            Some(id) => self.load_board(&id).await,
            None => Ok(()),
        }
    }

    /// Make a board active and fetch its contents.
    pub async fn select_board(&self, board_id: &BoardId) -> KanbanResult<()> {
        if !self.store.write().set_active(board_id) {
            return Err(KanbanError::NotFound(format!("Board {}", board_id)));
        }
        self.load_board(board_id).await
    }

    /// Fetch a board's columns and tasks concurrently and install them.
    ///
    /// One failing listing still yields a partially populated board. The
    /// result is dropped if another load of the board started meanwhile or
    /// the board is no longer the active one.
    pub async fn load_board(&self, board_id: &BoardId) -> KanbanResult<()> {
        let ticket = self.issue(EntityKey::BoardLoad(board_id.clone()));

        let (columns, tasks) = futures::join!(
            self.api.list_columns(board_id),
            self.api.list_tasks(board_id)
        );

        let (columns, tasks) = match (columns, tasks) {
            (Err(e), Err(_)) => {
                self.finish(&ticket);
                self.report("Loading board", &e);
                return Err(e);
            }
            (Err(e), Ok(tasks)) => {
                tracing::warn!("Columns of board {} failed to load: {}", board_id, e);
                self.report("Loading columns", &e);
                (Vec::new(), tasks)
            }
            (Ok(columns), Err(e)) => {
                tracing::warn!("Tasks of board {} failed to load: {}", board_id, e);
                self.report("Loading tasks", &e);
                (columns, Vec::new())
            }
            (Ok(columns), Ok(tasks)) => (columns, tasks),
        };

        let still_wanted = self.is_current(&ticket)
            && self.store.read().active_id() == Some(board_id);
        self.finish(&ticket);
        if !still_wanted {
            tracing::warn!("Discarding stale load of board {}", board_id);
            return Ok(());
        }

        let (columns, refs) = assemble_columns(columns, tasks);
        tracing::info!(
            "Board {} loaded: {} columns, {} tasks",
            board_id,
            columns.len(),
            columns.iter().map(|c| c.tasks.len()).sum::<usize>()
        );
        self.store.write().install_columns(board_id, columns);
        self.column_refs.lock().insert(board_id.clone(), refs);
        Ok(())
    }

    /// Start dragging a column or task of a loaded board. Replaces any
    /// unfinished gesture without restoring it.
    pub fn begin_drag(&self, board_id: &BoardId, active: DragItem) -> KanbanResult<()> {
        let origin = {
            let store = self.store.read();
            let board = store
                .board(board_id)
                .filter(|b| b.loaded)
                .ok_or_else(|| KanbanError::NotFound(format!("Board {}", board_id)))?;
            match &active {
                DragItem::Task(task_id) => {
                    let location = board
                        .find_task(task_id)
                        .ok_or_else(|| KanbanError::NotFound(format!("Task {}", task_id)))?;
                    Some((location.column_id, location.index))
                }
                DragItem::Column(column_id) => {
                    board
                        .column(column_id)
                        .ok_or_else(|| KanbanError::NotFound(format!("Column {}", column_id)))?;
                    None
                }
            }
        };

        let ticket = match &active {
            DragItem::Task(task_id) => {
                Some(self.issue(EntityKey::TaskPlacement(task_id.clone())))
            }
            DragItem::Column(_) => None,
        };

        let session = DragSession::new(board_id.clone(), active, origin, ticket);
        *self.drag.lock() = Some(session);
        Ok(())
    }

    /// Pointer passed over `over`. Returns whether the arrangement changed.
    pub fn drag_over(&self, over: DragItem) -> bool {
        let (board_id, active) = {
            let mut drag = self.drag.lock();
            let Some(session) = drag.as_mut() else {
                return false;
            };
            session.hovered = Some(over.clone());
            (session.board_id.clone(), session.active.clone())
        };
        self.apply_reorder(&board_id, &active, &over, DragPhase::Hover)
    }

    /// Finish the gesture. A task that ended in a different column is
    /// confirmed remotely and put back where it started if that fails.
    /// Reordering within a column and moving columns stay local.
    pub async fn drop(&self, over: Option<DragItem>) -> KanbanResult<()> {
        let session = self
            .drag
            .lock()
            .take()
            .ok_or_else(|| KanbanError::Validation("No drag in progress".to_string()))?;

        if let Some(over) = over {
            // Hover already placed the task for this target; applying it again
            // would move the task a second time.
            let already_applied =
                session.is_task_drag() && session.hovered.as_ref() == Some(&over);
            if !already_applied {
                self.apply_reorder(&session.board_id, &session.active, &over, DragPhase::Drop);
            }
        }

        let (DragItem::Task(task_id), Some(origin), Some(ticket)) =
            (&session.active, session.origin.clone(), session.ticket.clone())
        else {
            return Ok(());
        };

        let current = self.store.read().find_task(&session.board_id, task_id);
        match current {
            Some(location) if location.column_id != origin.0 => {
                self.confirm_move(&session.board_id, task_id, origin, ticket)
                    .await
            }
            _ => {
                self.finish(&ticket);
                Ok(())
            }
        }
    }

    /// Abandon the gesture, putting a dragged task back where it started.
    pub fn cancel_drag(&self) {
        let Some(session) = self.drag.lock().take() else {
            return;
        };
        if let (DragItem::Task(task_id), Some((column_id, index))) =
            (&session.active, session.origin.clone())
        {
            let restore = MoveTask {
                board_id: session.board_id.clone(),
                task_id: task_id.clone(),
                column_id,
                index,
            };
            if let Err(e) = self.execute(&restore) {
                tracing::warn!("Could not restore dragged task {}: {}", task_id, e);
            }
        }
        if let Some(ticket) = &session.ticket {
            self.finish(ticket);
        }
    }

    pub fn drag_session(&self) -> Option<DragSession> {
        self.drag.lock().clone()
    }

    fn apply_reorder(
        &self,
        board_id: &BoardId,
        active: &DragItem,
        over: &DragItem,
        phase: DragPhase,
    ) -> bool {
        let mut changed = false;
        self.store.write().replace_board(board_id, |board| {
            match reorder::reorder(&board.columns, active, over, phase) {
                Some(columns) => {
                    changed = true;
                    Board {
                        columns,
                        ..board.clone()
                    }
                }
                None => board.clone(),
            }
        });
        if changed {
            tracing::debug!("Reordered {:?} over {:?} ({:?})", active, over, phase);
        }
        changed
    }

    /// Move a task to `column_id` at `index` and confirm it remotely.
    pub async fn move_task(
        &self,
        board_id: &BoardId,
        task_id: &TaskId,
        column_id: &ColumnId,
        index: usize,
    ) -> KanbanResult<()> {
        let origin = {
            let store = self.store.read();
            let board = store
                .board(board_id)
                .ok_or_else(|| KanbanError::NotFound(format!("Board {}", board_id)))?;
            if board.column(column_id).is_none() {
                return Err(KanbanError::NotFound(format!("Column {}", column_id)));
            }
            let location = board
                .find_task(task_id)
                .ok_or_else(|| KanbanError::NotFound(format!("Task {}", task_id)))?;
            (location.column_id, location.index)
        };

        let ticket = self.issue(EntityKey::TaskPlacement(task_id.clone()));
        self.execute(&MoveTask {
            board_id: board_id.clone(),
            task_id: task_id.clone(),
            column_id: column_id.clone(),
            index,
        })?;
        self.confirm_move(board_id, task_id, origin, ticket).await
    }

    async fn confirm_move(
        &self,
        board_id: &BoardId,
        task_id: &TaskId,
        origin: (ColumnId, usize),
        ticket: Ticket,
    ) -> KanbanResult<()> {
        let payload = match self.task_payload(board_id, task_id) {
            Ok(payload) => payload,
            Err(e) => {
                self.finish(&ticket);
                return Err(e);
            }
        };

        match self.api.update_task(task_id, &payload).await {
            Ok(_) => {
                tracing::info!("Task {} moved to column {}", task_id, payload.card_id);
                self.finish(&ticket);
                Ok(())
            }
            Err(e) => {
                if self.is_current(&ticket) {
                    let (column_id, index) = origin;
                    self.execute(&MoveTask {
                        board_id: board_id.clone(),
                        task_id: task_id.clone(),
                        column_id,
                        index,
                    })?;
                    self.finish(&ticket);
                } else {
                    tracing::warn!("Ignoring stale move failure for task {}", task_id);
                }
                self.report("Moving task", &e);
                Err(e)
            }
        }
    }

    /// Start editing a new task in a column. Nothing enters the store until
    /// the draft is submitted with `create_task`.
    pub fn new_task_draft(&self, board_id: &BoardId, column_id: &ColumnId) -> KanbanResult<TaskDraft> {
        let store = self.store.read();
        let board = store
            .board(board_id)
            .ok_or_else(|| KanbanError::NotFound(format!("Board {}", board_id)))?;
        if board.column(column_id).is_none() {
            return Err(KanbanError::NotFound(format!("Column {}", column_id)));
        }
        Ok(TaskDraft::new(column_id.clone()))
    }

    /// Create the task remotely, then insert the returned record at the end of
    /// the draft's column.
    pub async fn create_task(&self, board_id: &BoardId, draft: TaskDraft) -> KanbanResult<Task> {
        let card_id = {
            let store = self.store.read();
            let board = store
                .board(board_id)
                .ok_or_else(|| KanbanError::NotFound(format!("Board {}", board_id)))?;
            if board.column(&draft.column_id).is_none() {
                return Err(KanbanError::NotFound(format!("Column {}", draft.column_id)));
            }
            self.resolve_column(board, &draft.column_id)
        };

        let payload = TaskPayload::from_draft(&draft, card_id);
        let created = match self.api.create_task(board_id, &payload).await {
            Ok(created) => created.into_task(),
            Err(e) => {
                self.report("Creating task", &e);
                return Err(e);
            }
        };

        tracing::info!("Task {} created in column {}", created.id, draft.column_id);
        self.execute(&InsertTask {
            board_id: board_id.clone(),
            column_id: draft.column_id,
            index: None,
            task: created.clone(),
        })?;
        Ok(created)
    }

    /// Apply edited fields and send the full record. A failure is reported
    /// and the edit stays in place.
    ///
    /// The record carries the task's column, so a successful update also
    /// settles its placement: see `adopt_sent_placement`.
    pub async fn update_task(
        &self,
        board_id: &BoardId,
        task_id: &TaskId,
        fields: TaskFields,
    ) -> KanbanResult<()> {
        let sent = self
            .store
            .read()
            .find_task(board_id, task_id)
            .ok_or_else(|| KanbanError::NotFound(format!("Task {}", task_id)))?;
        let placement_seq = self
            .sequencer
            .lock()
            .last_issued(&EntityKey::TaskPlacement(task_id.clone()));

        let ticket = self.issue(EntityKey::Task(task_id.clone()));
        self.execute(&UpdateTask {
            board_id: board_id.clone(),
            task_id: task_id.clone(),
            fields,
        })?;

        let payload = match self.task_payload(board_id, task_id) {
            Ok(payload) => payload,
            Err(e) => {
                self.finish(&ticket);
                return Err(e);
            }
        };

        match self.api.update_task(task_id, &payload).await {
            Ok(echoed) => {
                if let Some(stored) = echoed.filter(|_| self.is_current(&ticket)) {
                    self.execute(&UpdateTask {
                        board_id: board_id.clone(),
                        task_id: task_id.clone(),
                        fields: TaskFields::from_entity(&stored.into_task()),
                    })?;
                }
                self.finish(&ticket);
                self.adopt_sent_placement(
                    board_id,
                    task_id,
                    (sent.column_id, sent.index),
                    placement_seq,
                )?;
                tracing::info!("Task {} updated", task_id);
                Ok(())
            }
            Err(e) => {
                self.finish(&ticket);
                self.report("Updating task", &e);
                Err(e)
            }
        }
    }

    /// The remote side now has the task in the column an accepted update
    /// carried. Unless a newer move started after that update was sent, a
    /// move still in flight can no longer roll back, and a move that already
    /// rolled back is reapplied.
    fn adopt_sent_placement(
        &self,
        board_id: &BoardId,
        task_id: &TaskId,
        sent: (ColumnId, usize),
        placement_seq: Option<u64>,
    ) -> KanbanResult<()> {
        let dragged = DragItem::Task(task_id.clone());
        let dragging = self
            .drag
            .lock()
            .as_ref()
            .is_some_and(|session| session.active == dragged);
        if dragging {
            return Ok(());
        }

        let key = EntityKey::TaskPlacement(task_id.clone());
        {
            let mut sequencer = self.sequencer.lock();
            if sequencer.last_issued(&key) != placement_seq {
                return Ok(());
            }
            if placement_seq.is_some() {
                sequencer.supersede(key);
            }
        }

        let current = self.store.read().find_task(board_id, task_id);
        match current {
            Some(location) if location.column_id != sent.0 => {
                tracing::warn!(
                    "Task {} was accepted in column {}, moving it back there",
                    task_id,
                    sent.0
                );
                let (column_id, index) = sent;
                self.execute(&MoveTask {
                    board_id: board_id.clone(),
                    task_id: task_id.clone(),
                    column_id,
                    index,
                })
            }
            _ => Ok(()),
        }
    }

    /// Remove the task and delete it remotely. "Not found" counts as done;
    /// any other failure puts the task back where it was.
    pub async fn delete_task(&self, board_id: &BoardId, task_id: &TaskId) -> KanbanResult<()> {
        let location = self
            .store
            .read()
            .find_task(board_id, task_id)
            .ok_or_else(|| KanbanError::NotFound(format!("Task {}", task_id)))?;

        let ticket = self.issue(EntityKey::Task(task_id.clone()));
        self.sequencer
            .lock()
            .supersede(EntityKey::TaskPlacement(task_id.clone()));
        self.execute(&RemoveTask {
            board_id: board_id.clone(),
            task_id: task_id.clone(),
        })?;

        match self.api.delete_task(task_id).await {
            Ok(()) => {
                tracing::info!("Task {} deleted", task_id);
                self.finish(&ticket);
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                tracing::info!("Task {} was already gone remotely", task_id);
                self.finish(&ticket);
                Ok(())
            }
            Err(e) => {
                if self.is_current(&ticket) {
                    self.execute(&InsertTask {
                        board_id: board_id.clone(),
                        column_id: location.column_id,
                        index: Some(location.index),
                        task: location.task,
                    })?;
                    self.finish(&ticket);
                } else {
                    tracing::warn!("Ignoring stale delete failure for task {}", task_id);
                }
                self.report("Deleting task", &e);
                Err(e)
            }
        }
    }

    /// Optimistic column rename; failures are reported, not undone.
    pub async fn rename_column(
        &self,
        board_id: &BoardId,
        column_id: &ColumnId,
        title: &str,
    ) -> KanbanResult<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(KanbanError::Validation("Column title cannot be empty".to_string()));
        }

        let remote = {
            let mut store = self.store.write();
            let exists = store
                .board(board_id)
                .map(|b| b.column(column_id).is_some())
                .unwrap_or(false);
            if !exists {
                return Err(KanbanError::NotFound(format!("Column {}", column_id)));
            }
            store.replace_board(board_id, |board| {
                let mut next = board.clone();
                if let Some(column) = next.columns.iter_mut().find(|c| &c.id == column_id) {
                    column.title = title.to_string();
                }
                next
            });
            self.column_refs
                .lock()
                .get(board_id)
                .and_then(|refs| refs.remote_of(column_id).cloned())
        };

        let Some(remote) = remote else {
            tracing::warn!("Column {} has no remote counterpart, renamed locally", column_id);
            return Ok(());
        };

        let patch = ColumnPatch {
            title: Some(title.to_string()),
            order: None,
        };
        match self.api.update_column(&remote, &patch).await {
            Ok(()) => {
                tracing::info!("Column {} renamed to '{}'", column_id, title);
                Ok(())
            }
            Err(e) => {
                self.report("Renaming column", &e);
                Err(e)
            }
        }
    }

    /// Create a board remotely, then its default columns one at a time. A
    /// column whose creation fails gets a placeholder id so the board is
    /// still usable. The new board becomes active.
    pub async fn create_board(&self, name: &str) -> KanbanResult<Board> {
        let name = name.trim();
        if name.is_empty() {
            return Err(KanbanError::Validation("Board name cannot be empty".to_string()));
        }

        let request = NewBoard {
            name: name.to_string(),
            num_cards: self.default_columns.len() as u32,
        };
        let created = match self.api.create_board(&request).await {
            Ok(created) => created,
            Err(e) => {
                self.report("Creating board", &e);
                return Err(e);
            }
        };

        let mut refs = ColumnRefMap::new();
        let mut columns = Vec::with_capacity(self.default_columns.len());
        for default in &self.default_columns {
            let request = NewColumn {
                title: default.title.clone(),
                order: default.order,
            };
            let column = match self.api.create_column(&created.id, &request).await {
                Ok(api) => {
                    refs.insert(api.id.clone(), api.id.clone());
                    Column::new(api.id, default.title.clone())
                }
                Err(e) => {
                    tracing::warn!(
                        "Column '{}' of board {} failed to create, using a placeholder: {}",
                        default.title,
                        created.id,
                        e
                    );
                    Column::new(ColumnId::placeholder(&default.title), default.title.clone())
                }
            };
            columns.push(column);
        }

        let board_name = if created.name.trim().is_empty() {
            name.to_string()
        } else {
            created.name
        };
        let board = Board::new(created.id, board_name, columns);
        tracing::info!("Board {} created with {} columns", board.id, board.columns.len());

        {
            let mut store = self.store.write();
            store.push_board(board.clone());
            store.set_active(&board.id);
        }
        self.column_refs.lock().insert(board.id.clone(), refs);
        Ok(board)
    }

    /// Optimistic rename; failures are reported, not undone.
    pub async fn rename_board(&self, board_id: &BoardId, name: &str) -> KanbanResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(KanbanError::Validation("Board name cannot be empty".to_string()));
        }
        if self.store.read().board(board_id).is_none() {
            return Err(KanbanError::NotFound(format!("Board {}", board_id)));
        }

        let ticket = self.issue(EntityKey::Board(board_id.clone()));
        self.execute(&RenameBoard {
            board_id: board_id.clone(),
            name: name.to_string(),
        })?;

        let patch = BoardPatch {
            name: Some(name.to_string()),
        };
        let result = self.api.update_board(board_id, &patch).await;
        self.finish(&ticket);
        match result {
            Ok(()) => {
                tracing::info!("Board {} renamed to '{}'", board_id, name);
                Ok(())
            }
            Err(e) => {
                self.report("Renaming board", &e);
                Err(e)
            }
        }
    }

    /// Remove a board and delete it remotely. The last remaining board
    /// cannot be deleted. "Not found" counts as done; any other failure
    /// puts the board back.
    pub async fn delete_board(&self, board_id: &BoardId) -> KanbanResult<()> {
        let (index, removed, was_active) = {
            let mut store = self.store.write();
            let was_active = store.active_id() == Some(board_id);
            let (index, removed) = store.remove_board(board_id)?;
            (index, removed, was_active)
        };
        let ticket = self.issue(EntityKey::Board(board_id.clone()));

        match self.api.delete_board(board_id).await {
            Ok(()) => {
                tracing::info!("Board {} deleted", board_id);
                self.finish(&ticket);
                self.column_refs.lock().remove(board_id);
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                tracing::info!("Board {} was already gone remotely", board_id);
                self.finish(&ticket);
                self.column_refs.lock().remove(board_id);
                Ok(())
            }
            Err(e) => {
                if self.is_current(&ticket) {
                    let mut store = self.store.write();
                    store.insert_board_at(index, removed);
                    if was_active {
                        store.set_active(board_id);
                    }
                }
                self.finish(&ticket);
                self.report("Deleting board", &e);
                Err(e)
            }
        }
    }
}
