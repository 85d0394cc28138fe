use log::info;
use sea_orm::{ActiveValue, IntoActiveModel, TransactionTrait};
use serde::{Deserialize, Serialize};

use super::{reject, BoardService, CascadePolicy, CascadeReport};
use crate::constants::LIST_TITLE_MAX;
use crate::entities::list;
use crate::error::{BoardError, Result};
use crate::repositories::{BoardRepository, ListRepository};
use crate::validation::{validate_position, validate_title, ValidationError};

/// Input for a new list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewList {
    pub board_id: i32,
    pub title: String,
    pub position: i32,
}

impl NewList {
    pub fn new(board_id: i32, title: impl Into<String>, position: i32) -> Self {
        Self {
            board_id,
            title: title.into(),
            position,
        }
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate_title("title", &self.title, LIST_TITLE_MAX)?;
        validate_position(self.position)
    }
}

/// Partial update for a list.
#[derive(Debug, Clone, Default)]
pub struct ListChanges {
    pub title: Option<String>,
    pub position: Option<i32>,
}

impl ListChanges {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title("title", title, LIST_TITLE_MAX)?;
        }
        if let Some(position) = self.position {
            validate_position(position)?;
        }
        Ok(())
    }
}

fn duplicate_list(board_id: i32, title: &str) -> ValidationError {
    ValidationError::Duplicate {
        entity: "list",
        key: format!("title '{}' on board {}", title, board_id),
    }
}

impl BoardService {
    /// Get the lists of a board in display order (by position).
    pub async fn get_lists(&self, board_id: i32) -> Result<Vec<list::Model>> {
        let storage = self.storage.lock().await;
        ListRepository::get_for_board(&storage.conn, board_id).await
    }

    /// Get a list by id.
    pub async fn get_list(&self, id: i32) -> Result<list::Model> {
        let storage = self.storage.lock().await;
        ListRepository::get_by_id(&storage.conn, id)
            .await?
            .ok_or_else(|| BoardError::not_found("list", id))
    }

    /// Create a list on a board.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown board, or a validation error for a
    /// bad title, a negative position, or a title already used on the board
    pub async fn create_list(&self, input: NewList) -> Result<list::Model> {
        input.validate().map_err(|e| reject("create list", e))?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        if BoardRepository::get_by_id(&txn, input.board_id).await?.is_none() {
            return Err(BoardError::not_found("board", input.board_id));
        }
        if ListRepository::find_by_board_and_title(&txn, input.board_id, &input.title)
            .await?
            .is_some()
        {
            return Err(reject("create list", duplicate_list(input.board_id, &input.title)));
        }

        let model = list::ActiveModel {
            id: ActiveValue::NotSet,
            board_id: ActiveValue::Set(input.board_id),
            title: ActiveValue::Set(input.title),
            position: ActiveValue::Set(input.position),
        };
        let list = ListRepository::create(&txn, model).await?;
        txn.commit().await?;

        info!("Created list {} '{}' on board {}", list.id, list.title, list.board_id);
        Ok(list)
    }

    /// Rename and/or reposition a list.
    pub async fn update_list(&self, id: i32, changes: ListChanges) -> Result<list::Model> {
        changes.validate().map_err(|e| reject("update list", e))?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let existing = ListRepository::get_by_id(&txn, id)
            .await?
            .ok_or_else(|| BoardError::not_found("list", id))?;
        if let Some(title) = &changes.title {
            if let Some(other) = ListRepository::find_by_board_and_title(&txn, existing.board_id, title).await? {
                if other.id != id {
                    return Err(reject("update list", duplicate_list(existing.board_id, title)));
                }
            }
        }

        let mut model = existing.into_active_model();
        if let Some(title) = changes.title {
            model.title = ActiveValue::Set(title);
        }
        if let Some(position) = changes.position {
            model.position = ActiveValue::Set(position);
        }
        let list = ListRepository::update(&txn, model).await?;
        txn.commit().await?;

        info!("Updated list {} '{}' (position {})", list.id, list.title, list.position);
        Ok(list)
    }

    /// Delete a list with its tasks.
    pub async fn delete_list(&self, id: i32) -> Result<CascadeReport> {
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let list = ListRepository::get_by_id(&txn, id)
            .await?
            .ok_or_else(|| BoardError::not_found("list", id))?;
        let report = CascadePolicy::delete_list(&txn, list).await?;
        txn.commit().await?;

        info!("Deleted list {}: {}", id, report);
        Ok(report)
    }
}
