use log::info;
use sea_orm::{ActiveValue, IntoActiveModel, TransactionTrait};
use serde::{Deserialize, Serialize};

use super::{reject, BoardService, CascadePolicy, CascadeReport};
use crate::constants::BOARD_TITLE_MAX;
use crate::entities::board;
use crate::error::{BoardError, Result};
use crate::repositories::{BoardRepository, ProjectRepository};
use crate::validation::{validate_title, ValidationError};

/// Input for a new board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBoard {
    pub project_id: i32,
    pub title: String,
}

impl NewBoard {
    pub fn new(project_id: i32, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
        }
    }
}

fn duplicate_board(project_id: i32, title: &str) -> ValidationError {
    ValidationError::Duplicate {
        entity: "board",
        key: format!("title '{}' in project {}", title, project_id),
    }
}

impl BoardService {
    /// Get the boards of a project ordered by title.
    pub async fn get_boards(&self, project_id: i32) -> Result<Vec<board::Model>> {
        let storage = self.storage.lock().await;
        BoardRepository::get_for_project(&storage.conn, project_id).await
    }

    /// Get a board by id.
    pub async fn get_board(&self, id: i32) -> Result<board::Model> {
        let storage = self.storage.lock().await;
        BoardRepository::get_by_id(&storage.conn, id)
            .await?
            .ok_or_else(|| BoardError::not_found("board", id))
    }

    /// Create a board in a project.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown project, or a validation error for a
    /// bad title or one already used in the project
    pub async fn create_board(&self, input: NewBoard) -> Result<board::Model> {
        validate_title("title", &input.title, BOARD_TITLE_MAX).map_err(|e| reject("create board", e))?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        if ProjectRepository::get_by_id(&txn, input.project_id).await?.is_none() {
            return Err(BoardError::not_found("project", input.project_id));
        }
        if BoardRepository::find_by_project_and_title(&txn, input.project_id, &input.title)
            .await?
            .is_some()
        {
            return Err(reject("create board", duplicate_board(input.project_id, &input.title)));
        }

        let model = board::ActiveModel {
            id: ActiveValue::NotSet,
            project_id: ActiveValue::Set(input.project_id),
            title: ActiveValue::Set(input.title),
        };
        let board = BoardRepository::create(&txn, model).await?;
        txn.commit().await?;

        info!("Created board {} '{}' in project {}", board.id, board.title, board.project_id);
        Ok(board)
    }

    /// Rename a board.
    pub async fn rename_board(&self, id: i32, title: &str) -> Result<board::Model> {
        validate_title("title", title, BOARD_TITLE_MAX).map_err(|e| reject("rename board", e))?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let existing = BoardRepository::get_by_id(&txn, id)
            .await?
            .ok_or_else(|| BoardError::not_found("board", id))?;
        if let Some(other) = BoardRepository::find_by_project_and_title(&txn, existing.project_id, title).await? {
            if other.id != id {
                return Err(reject("rename board", duplicate_board(existing.project_id, title)));
            }
        }

        let mut model = existing.into_active_model();
        model.title = ActiveValue::Set(title.to_string());
        let board = BoardRepository::update(&txn, model).await?;
        txn.commit().await?;

        info!("Renamed board {} to '{}'", board.id, board.title);
        Ok(board)
    }

    /// Delete a board with its lists and their tasks.
    pub async fn delete_board(&self, id: i32) -> Result<CascadeReport> {
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let board = BoardRepository::get_by_id(&txn, id)
            .await?
            .ok_or_else(|| BoardError::not_found("board", id))?;
        let report = CascadePolicy::delete_board(&txn, board).await?;
        txn.commit().await?;

        info!("Deleted board {}: {}", id, report);
        Ok(report)
    }
}
