//! Task repository for database operations.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait,
};

use crate::entities::{label, task, task_label};
use crate::error::Result;

/// Repository for task-related database operations.
pub struct TaskRepository;

impl TaskRepository {
    /// Get tasks in a list, highest priority first, then by number.
    pub async fn get_for_list<C>(conn: &C, list_id: i32) -> Result<Vec<task::Model>>
    where
        C: ConnectionTrait,
    {
        let mut tasks = task::Entity::find()
            .filter(task::Column::ListId.eq(list_id))
            .order_by_asc(task::Column::TaskNo)
            .all(conn)
            .await?;
        // Priority is stored as text, so order it here rather than in SQL
        tasks.sort_by_key(|t| (priority_rank(t.priority), t.task_no));
        Ok(tasks)
    }

    /// Task numbers of every task in the given lists.
    pub async fn numbers_for_lists<C>(conn: &C, list_ids: &[i32]) -> Result<Vec<i32>>
    where
        C: ConnectionTrait,
    {
        if list_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(task::Entity::find()
            .select_only()
            .column(task::Column::TaskNo)
            .filter(task::Column::ListId.is_in(list_ids.iter().copied()))
            .into_tuple()
            .all(conn)
            .await?)
    }

    /// Get a single task by number.
    pub async fn get_by_id<C>(conn: &C, task_no: i32) -> Result<Option<task::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::find_by_id(task_no).one(conn).await?)
    }

    /// Get tasks carrying a specific label.
    pub async fn get_with_label<C>(conn: &C, label_id: i32) -> Result<Vec<task::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::find()
            .filter(
                task::Column::TaskNo.in_subquery(
                    task_label::Entity::find()
                        .filter(task_label::Column::LabelId.eq(label_id))
                        .select_only()
                        .column(task_label::Column::TaskNo)
                        .into_query(),
                ),
            )
            .order_by_asc(task::Column::TaskNo)
            .all(conn)
            .await?)
    }

    /// Labels attached to a task, ordered by title.
    pub async fn get_labels<C>(conn: &C, task: &task::Model) -> Result<Vec<label::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(task
            .find_related(label::Entity)
            .order_by_asc(label::Column::Title)
            .all(conn)
            .await?)
    }

    /// Label ids attached to a task.
    pub async fn get_label_ids<C>(conn: &C, task_no: i32) -> Result<Vec<i32>>
    where
        C: ConnectionTrait,
    {
        Ok(task_label::Entity::find()
            .select_only()
            .column(task_label::Column::LabelId)
            .filter(task_label::Column::TaskNo.eq(task_no))
            .order_by_asc(task_label::Column::LabelId)
            .into_tuple()
            .all(conn)
            .await?)
    }

    /// Insert a new task.
    pub async fn create<C>(conn: &C, task: task::ActiveModel) -> Result<task::Model>
    where
        C: ConnectionTrait,
    {
        Ok(task.insert(conn).await?)
    }

    /// Update a task in the database.
    pub async fn update<C>(conn: &C, task: task::ActiveModel) -> Result<task::Model>
    where
        C: ConnectionTrait,
    {
        Ok(task.update(conn).await?)
    }

    /// Delete a task row. Label links must already be gone.
    pub async fn delete<C>(conn: &C, task: task::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        task.delete(conn).await?;
        Ok(())
    }

    /// Delete every task in the given lists, returning the number removed.
    pub async fn delete_for_lists<C>(conn: &C, list_ids: &[i32]) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        if list_ids.is_empty() {
            return Ok(0);
        }
        let result = task::Entity::delete_many()
            .filter(task::Column::ListId.is_in(list_ids.iter().copied()))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    /// Link a label to a task. Linking twice is a no-op.
    pub async fn add_label<C>(conn: &C, task_no: i32, label_id: i32) -> Result<()>
    where
        C: ConnectionTrait,
    {
        let exists = task_label::Entity::find_by_id((task_no, label_id)).one(conn).await?.is_some();
        if !exists {
            let link = task_label::ActiveModel {
                task_no: ActiveValue::Set(task_no),
                label_id: ActiveValue::Set(label_id),
            };
            task_label::Entity::insert(link).exec(conn).await?;
        }
        Ok(())
    }

    /// Unlink a label from a task, returning whether a link existed.
    pub async fn remove_label<C>(conn: &C, task_no: i32, label_id: i32) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        let result = task_label::Entity::delete_by_id((task_no, label_id)).exec(conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Remove label links for the given tasks.
    pub async fn clear_labels_for_tasks<C>(conn: &C, task_nos: &[i32]) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        if task_nos.is_empty() {
            return Ok(0);
        }
        let result = task_label::Entity::delete_many()
            .filter(task_label::Column::TaskNo.is_in(task_nos.iter().copied()))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    /// Remove every task link to the given labels.
    pub async fn clear_links_to_labels<C>(conn: &C, label_ids: &[i32]) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        if label_ids.is_empty() {
            return Ok(0);
        }
        let result = task_label::Entity::delete_many()
            .filter(task_label::Column::LabelId.is_in(label_ids.iter().copied()))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }
}

fn priority_rank(priority: task::Priority) -> u8 {
    match priority {
        task::Priority::High => 0,
        task::Priority::Medium => 1,
        task::Priority::Low => 2,
    }
}
