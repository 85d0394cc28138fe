//! Project repository for database operations.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};

use crate::entities::project;
use crate::error::Result;

/// Repository for project-related database operations.
pub struct ProjectRepository;

impl ProjectRepository {
    /// Get all projects ordered by title.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<project::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(project::Entity::find()
            .order_by_asc(project::Column::Title)
            .all(conn)
            .await?)
    }

    /// Get a single project by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<project::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(project::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get a single project by its unique title.
    pub async fn get_by_title<C>(conn: &C, title: &str) -> Result<Option<project::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(project::Entity::find()
            .filter(project::Column::Title.eq(title))
            .one(conn)
            .await?)
    }

    /// Get a single project by slug.
    ///
    /// Slugs are not unique in the schema; the lowest id wins.
    pub async fn get_by_slug<C>(conn: &C, slug: &str) -> Result<Option<project::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(project::Entity::find()
            .filter(project::Column::Slug.eq(slug))
            .order_by_asc(project::Column::Id)
            .one(conn)
            .await?)
    }

    /// Insert a new project.
    pub async fn create<C>(conn: &C, project: project::ActiveModel) -> Result<project::Model>
    where
        C: ConnectionTrait,
    {
        Ok(project.insert(conn).await?)
    }

    /// Update a project in the database.
    pub async fn update<C>(conn: &C, project: project::ActiveModel) -> Result<project::Model>
    where
        C: ConnectionTrait,
    {
        Ok(project.update(conn).await?)
    }

    /// Delete a project row. Children must already be gone.
    pub async fn delete<C>(conn: &C, project: project::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        project.delete(conn).await?;
        Ok(())
    }
}
