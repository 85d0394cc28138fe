use log::info;
use sea_orm::{ActiveValue, IntoActiveModel, TransactionTrait};
use serde::{Deserialize, Serialize};

use super::{reject, BoardService, CascadePolicy, CascadeReport};
use crate::constants::{PROJECT_DESCRIPTION_MAX, PROJECT_TITLE_MAX};
use crate::entities::project;
use crate::error::{BoardError, Result};
use crate::repositories::ProjectRepository;
use crate::validation::{validate_max_len, validate_slug, validate_title, ValidationError};

/// Input for a new project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    /// Explicit slug; derived from the title when `None` or empty
    pub slug: Option<String>,
}

impl NewProject {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate_title("title", &self.title, PROJECT_TITLE_MAX)?;
        validate_max_len("description", &self.description, PROJECT_DESCRIPTION_MAX)?;
        match self.slug.as_deref() {
            Some(slug) if !slug.is_empty() => validate_slug(slug),
            _ => Ok(()),
        }
    }
}

/// Partial update for a project. `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `Some(None)` clears the image
    pub image: Option<Option<String>>,
}

impl ProjectChanges {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title("title", title, PROJECT_TITLE_MAX)?;
        }
        if let Some(description) = &self.description {
            validate_max_len("description", description, PROJECT_DESCRIPTION_MAX)?;
        }
        Ok(())
    }
}

impl BoardService {
    /// Get all projects ordered by title.
    pub async fn get_projects(&self) -> Result<Vec<project::Model>> {
        let storage = self.storage.lock().await;
        ProjectRepository::get_all(&storage.conn).await
    }

    /// Get a project by id.
    ///
    /// # Errors
    /// Returns `NotFound` if no project has this id
    pub async fn get_project(&self, id: i32) -> Result<project::Model> {
        let storage = self.storage.lock().await;
        ProjectRepository::get_by_id(&storage.conn, id)
            .await?
            .ok_or_else(|| BoardError::not_found("project", id))
    }

    /// Get a project by slug.
    pub async fn get_project_by_slug(&self, slug: &str) -> Result<Option<project::Model>> {
        let storage = self.storage.lock().await;
        ProjectRepository::get_by_slug(&storage.conn, slug).await
    }

    /// Create a project, deriving its slug from the title when none is given.
    ///
    /// # Errors
    /// Returns a validation error for bad fields or a title already in use
    pub async fn create_project(&self, input: NewProject) -> Result<project::Model> {
        input.validate().map_err(|e| reject("create project", e))?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        if ProjectRepository::get_by_title(&txn, &input.title).await?.is_some() {
            return Err(reject(
                "create project",
                ValidationError::Duplicate {
                    entity: "project",
                    key: format!("title '{}'", input.title),
                },
            ));
        }

        let mut model = project::ActiveModel {
            id: ActiveValue::NotSet,
            title: ActiveValue::Set(input.title),
            description: ActiveValue::Set(input.description),
            image: ActiveValue::Set(input.image),
            slug: ActiveValue::Set(input.slug.unwrap_or_default()),
        };
        model.ensure_slug(self.rules.slug_style);

        let project = ProjectRepository::create(&txn, model).await?;
        txn.commit().await?;

        info!("Created project {} '{}' (slug '{}')", project.id, project.title, project.slug);
        Ok(project)
    }

    /// Update a project. The slug is kept as it is; it only gets filled in
    /// if it was empty.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown id or a validation error for bad
    /// fields or a title already taken by another project
    pub async fn update_project(&self, id: i32, changes: ProjectChanges) -> Result<project::Model> {
        changes.validate().map_err(|e| reject("update project", e))?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let existing = ProjectRepository::get_by_id(&txn, id)
            .await?
            .ok_or_else(|| BoardError::not_found("project", id))?;

        if let Some(title) = &changes.title {
            if let Some(other) = ProjectRepository::get_by_title(&txn, title).await? {
                if other.id != id {
                    return Err(reject(
                        "update project",
                        ValidationError::Duplicate {
                            entity: "project",
                            key: format!("title '{}'", title),
                        },
                    ));
                }
            }
        }

        let mut model = existing.into_active_model();
        if let Some(title) = changes.title {
            model.title = ActiveValue::Set(title);
        }
        if let Some(description) = changes.description {
            model.description = ActiveValue::Set(description);
        }
        if let Some(image) = changes.image {
            model.image = ActiveValue::Set(image);
        }
        model.ensure_slug(self.rules.slug_style);

        let project = ProjectRepository::update(&txn, model).await?;
        txn.commit().await?;

        info!("Updated project {} '{}'", project.id, project.title);
        Ok(project)
    }

    /// Delete a project with its boards, lists, tasks and labels.
    ///
    /// # Errors
    /// Returns `NotFound` if no project has this id
    pub async fn delete_project(&self, id: i32) -> Result<CascadeReport> {
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let project = ProjectRepository::get_by_id(&txn, id)
            .await?
            .ok_or_else(|| BoardError::not_found("project", id))?;
        let title = project.title.clone();

        let report = CascadePolicy::delete_project(&txn, project).await?;
        txn.commit().await?;

        info!("Deleted project {} '{}': {}", id, title, report);
        Ok(report)
    }
}
