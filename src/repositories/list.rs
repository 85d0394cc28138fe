//! List repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::entities::list;
use crate::error::Result;

/// Repository for list-related database operations.
pub struct ListRepository;

impl ListRepository {
    /// Get lists for a specific board in display order.
    pub async fn get_for_board<C>(conn: &C, board_id: i32) -> Result<Vec<list::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(list::Entity::find()
            .filter(list::Column::BoardId.eq(board_id))
            .order_by_asc(list::Column::Position)
            .order_by_asc(list::Column::Id)
            .all(conn)
            .await?)
    }

    /// Ids of all lists on the given boards.
    pub async fn ids_for_boards<C>(conn: &C, board_ids: &[i32]) -> Result<Vec<i32>>
    where
        C: ConnectionTrait,
    {
        if board_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(list::Entity::find()
            .select_only()
            .column(list::Column::Id)
            .filter(list::Column::BoardId.is_in(board_ids.iter().copied()))
            .into_tuple()
            .all(conn)
            .await?)
    }

    /// Get a single list by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<list::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(list::Entity::find_by_id(id).one(conn).await?)
    }

    /// Find the list holding `title` on a board.
    pub async fn find_by_board_and_title<C>(conn: &C, board_id: i32, title: &str) -> Result<Option<list::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(list::Entity::find()
            .filter(list::Column::BoardId.eq(board_id))
            .filter(list::Column::Title.eq(title))
            .one(conn)
            .await?)
    }

    /// Insert a new list.
    pub async fn create<C>(conn: &C, list: list::ActiveModel) -> Result<list::Model>
    where
        C: ConnectionTrait,
    {
        Ok(list.insert(conn).await?)
    }

    /// Update a list in the database.
    pub async fn update<C>(conn: &C, list: list::ActiveModel) -> Result<list::Model>
    where
        C: ConnectionTrait,
    {
        Ok(list.update(conn).await?)
    }

    /// Delete a list row. Children must already be gone.
    pub async fn delete<C>(conn: &C, list: list::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        list.delete(conn).await?;
        Ok(())
    }

    /// Delete every list on the given boards, returning the number removed.
    pub async fn delete_for_boards<C>(conn: &C, board_ids: &[i32]) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        if board_ids.is_empty() {
            return Ok(0);
        }
        let result = list::Entity::delete_many()
            .filter(list::Column::BoardId.is_in(board_ids.iter().copied()))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }
}
