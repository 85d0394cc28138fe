use log::info;
use sea_orm::{ActiveValue, IntoActiveModel, TransactionTrait};
use serde::{Deserialize, Serialize};

use super::{reject, BoardService, CascadePolicy, CascadeReport};
use crate::constants::LABEL_TITLE_MAX;
use crate::entities::label;
use crate::error::{BoardError, Result};
use crate::repositories::{LabelRepository, ProjectRepository};
use crate::validation::{validate_colour, validate_title, ValidationError};

/// Input for a new label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLabel {
    pub project_id: i32,
    pub title: String,
    pub colour: String,
}

impl NewLabel {
    pub fn new(project_id: i32, title: impl Into<String>, colour: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            colour: colour.into(),
        }
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate_title("title", &self.title, LABEL_TITLE_MAX)?;
        validate_colour(&self.colour)
    }
}

/// Partial update for a label.
#[derive(Debug, Clone, Default)]
pub struct LabelChanges {
    pub title: Option<String>,
    pub colour: Option<String>,
}

impl LabelChanges {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title("title", title, LABEL_TITLE_MAX)?;
        }
        if let Some(colour) = &self.colour {
            validate_colour(colour)?;
        }
        Ok(())
    }
}

fn duplicate_label(project_id: i32, title: &str) -> ValidationError {
    ValidationError::Duplicate {
        entity: "label",
        key: format!("title '{}' in project {}", title, project_id),
    }
}

impl BoardService {
    /// Get the labels of a project ordered by title.
    pub async fn get_labels(&self, project_id: i32) -> Result<Vec<label::Model>> {
        let storage = self.storage.lock().await;
        LabelRepository::get_for_project(&storage.conn, project_id).await
    }

    /// Get a label by id.
    pub async fn get_label(&self, id: i32) -> Result<label::Model> {
        let storage = self.storage.lock().await;
        LabelRepository::get_by_id(&storage.conn, id)
            .await?
            .ok_or_else(|| BoardError::not_found("label", id))
    }

    /// Create a label in a project.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown project, or a validation error for a
    /// bad title or colour, or a title already used in the project
    pub async fn create_label(&self, input: NewLabel) -> Result<label::Model> {
        input.validate().map_err(|e| reject("create label", e))?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        if ProjectRepository::get_by_id(&txn, input.project_id).await?.is_none() {
            return Err(BoardError::not_found("project", input.project_id));
        }
        if LabelRepository::find_by_project_and_title(&txn, input.project_id, &input.title)
            .await?
            .is_some()
        {
            return Err(reject("create label", duplicate_label(input.project_id, &input.title)));
        }

        let model = label::ActiveModel {
            id: ActiveValue::NotSet,
            project_id: ActiveValue::Set(input.project_id),
            title: ActiveValue::Set(input.title),
            colour: ActiveValue::Set(input.colour),
        };
        let label = LabelRepository::create(&txn, model).await?;
        txn.commit().await?;

        info!("Created label {} '{}' ({}) in project {}", label.id, label.title, label.colour, label.project_id);
        Ok(label)
    }

    /// Rename and/or recolour a label.
    pub async fn update_label(&self, id: i32, changes: LabelChanges) -> Result<label::Model> {
        changes.validate().map_err(|e| reject("update label", e))?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let existing = LabelRepository::get_by_id(&txn, id)
            .await?
            .ok_or_else(|| BoardError::not_found("label", id))?;
        if let Some(title) = &changes.title {
            if let Some(other) = LabelRepository::find_by_project_and_title(&txn, existing.project_id, title).await? {
                if other.id != id {
                    return Err(reject("update label", duplicate_label(existing.project_id, title)));
                }
            }
        }

        let mut model = existing.into_active_model();
        if let Some(title) = changes.title {
            model.title = ActiveValue::Set(title);
        }
        if let Some(colour) = changes.colour {
            model.colour = ActiveValue::Set(colour);
        }
        let label = LabelRepository::update(&txn, model).await?;
        txn.commit().await?;

        info!("Updated label {} '{}' ({})", label.id, label.title, label.colour);
        Ok(label)
    }

    /// Delete a label and detach it from every task.
    pub async fn delete_label(&self, id: i32) -> Result<CascadeReport> {
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let label = LabelRepository::get_by_id(&txn, id)
            .await?
            .ok_or_else(|| BoardError::not_found("label", id))?;
        let report = CascadePolicy::delete_label(&txn, label).await?;
        txn.commit().await?;

        info!("Deleted label {}: {}", id, report);
        Ok(report)
    }
}
