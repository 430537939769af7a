use kanban_core::{AppConfig, KanbanError, KanbanResult};
use kanban_domain::{Board, BoardId, DefaultColumn};
use kanban_remote::HttpKanbanApi;
use kanban_sync::SyncCoordinator;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// One line of `board list`.
#[derive(Debug, Clone, Serialize)]
pub struct BoardSummary {
    pub id: BoardId,
    pub name: String,
    pub active: bool,
}

pub struct CliContext {
    pub coordinator: SyncCoordinator<HttpKanbanApi>,
}

impl CliContext {
    pub fn new(api_url: Option<String>, config_path: Option<&Path>) -> KanbanResult<Self> {
        let mut config = match config_path {
            Some(path) => AppConfig::load_from(path),
            None => AppConfig::load(),
        };
        if let Some(url) = api_url {
            config.api_base_url = Some(url);
        }

        let api = match &config.api_base_url {
            Some(url) => HttpKanbanApi::new(url.clone(), config.effective_timeout())?,
            None => HttpKanbanApi::from_config(&config)?,
        };
        tracing::debug!("Using board API at {}", api.base_url());

        let defaults = DefaultColumn::from_titles(config.effective_default_columns());
        let coordinator = SyncCoordinator::new(Arc::new(api)).with_default_columns(defaults);
        Ok(Self { coordinator })
    }

    pub async fn list_boards(&self) -> KanbanResult<Vec<BoardSummary>> {
        self.coordinator.load_boards().await?;
        let store = self.coordinator.snapshot();
        Ok(store
            .boards()
            .iter()
            .map(|b| BoardSummary {
                id: b.id.clone(),
                name: b.name.clone(),
                active: store.active_id() == Some(&b.id),
            })
            .collect())
    }

    /// List boards and load `board_id` as the active one.
    pub async fn open_board(&self, board_id: &BoardId) -> KanbanResult<Board> {
        self.coordinator.load_boards().await?;
        let already_loaded = self
            .coordinator
            .board(board_id)
            .map(|b| b.loaded)
            .unwrap_or(false);
        if !already_loaded {
            self.coordinator.select_board(board_id).await?;
        }
        self.coordinator
            .board(board_id)
            .ok_or_else(|| KanbanError::NotFound(format!("Board {}", board_id)))
    }
}
