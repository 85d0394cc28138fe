//! Board repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::entities::board;
use crate::error::Result;

/// Repository for board-related database operations.
pub struct BoardRepository;

impl BoardRepository {
    /// Get boards for a specific project ordered by title.
    pub async fn get_for_project<C>(conn: &C, project_id: i32) -> Result<Vec<board::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(board::Entity::find()
            .filter(board::Column::ProjectId.eq(project_id))
            .order_by_asc(board::Column::Title)
            .all(conn)
            .await?)
    }

    /// Ids of all boards in a project.
    pub async fn ids_for_project<C>(conn: &C, project_id: i32) -> Result<Vec<i32>>
    where
        C: ConnectionTrait,
    {
        Ok(board::Entity::find()
            .select_only()
            .column(board::Column::Id)
            .filter(board::Column::ProjectId.eq(project_id))
            .into_tuple()
            .all(conn)
            .await?)
    }

    /// Get a single board by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<board::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(board::Entity::find_by_id(id).one(conn).await?)
    }

    /// Find the board holding `title` in a project.
    pub async fn find_by_project_and_title<C>(conn: &C, project_id: i32, title: &str) -> Result<Option<board::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(board::Entity::find()
            .filter(board::Column::ProjectId.eq(project_id))
            .filter(board::Column::Title.eq(title))
            .one(conn)
            .await?)
    }

    /// Insert a new board.
    pub async fn create<C>(conn: &C, board: board::ActiveModel) -> Result<board::Model>
    where
        C: ConnectionTrait,
    {
        Ok(board.insert(conn).await?)
    }

    /// Update a board in the database.
    pub async fn update<C>(conn: &C, board: board::ActiveModel) -> Result<board::Model>
    where
        C: ConnectionTrait,
    {
        Ok(board.update(conn).await?)
    }

    /// Delete a board row. Children must already be gone.
    pub async fn delete<C>(conn: &C, board: board::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        board.delete(conn).await?;
        Ok(())
    }

    /// Delete every board of a project, returning the number removed.
    pub async fn delete_for_project<C>(conn: &C, project_id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let result = board::Entity::delete_many()
            .filter(board::Column::ProjectId.eq(project_id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }
}
