//! Label repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::entities::label;
use crate::error::Result;

/// Repository for label-related database operations.
pub struct LabelRepository;

impl LabelRepository {
    /// Get labels for a specific project ordered by title.
    pub async fn get_for_project<C>(conn: &C, project_id: i32) -> Result<Vec<label::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(label::Entity::find()
            .filter(label::Column::ProjectId.eq(project_id))
            .order_by_asc(label::Column::Title)
            .all(conn)
            .await?)
    }

    /// Ids of all labels in a project.
    pub async fn ids_for_project<C>(conn: &C, project_id: i32) -> Result<Vec<i32>>
    where
        C: ConnectionTrait,
    {
        Ok(label::Entity::find()
            .select_only()
            .column(label::Column::Id)
            .filter(label::Column::ProjectId.eq(project_id))
            .into_tuple()
            .all(conn)
            .await?)
    }

    /// Get a single label by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<label::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(label::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get several labels by id, in id order.
    pub async fn get_by_ids<C>(conn: &C, ids: &[i32]) -> Result<Vec<label::Model>>
    where
        C: ConnectionTrait,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(label::Entity::find()
            .filter(label::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(label::Column::Id)
            .all(conn)
            .await?)
    }

    /// Find the label holding `title` in a project.
    pub async fn find_by_project_and_title<C>(conn: &C, project_id: i32, title: &str) -> Result<Option<label::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(label::Entity::find()
            .filter(label::Column::ProjectId.eq(project_id))
            .filter(label::Column::Title.eq(title))
            .one(conn)
            .await?)
    }

    /// Insert a new label.
    pub async fn create<C>(conn: &C, label: label::ActiveModel) -> Result<label::Model>
    where
        C: ConnectionTrait,
    {
        Ok(label.insert(conn).await?)
    }

    /// Update a label in the database.
    pub async fn update<C>(conn: &C, label: label::ActiveModel) -> Result<label::Model>
    where
        C: ConnectionTrait,
    {
        Ok(label.update(conn).await?)
    }

    /// Delete a label row. Task links must already be gone.
    pub async fn delete<C>(conn: &C, label: label::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        label.delete(conn).await?;
        Ok(())
    }

    /// Delete every label of a project, returning the number removed.
    pub async fn delete_for_project<C>(conn: &C, project_id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let result = label::Entity::delete_many()
            .filter(label::Column::ProjectId.eq(project_id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }
}
