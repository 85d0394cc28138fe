use log::info;
use sea_orm::{ActiveValue, ConnectionTrait, IntoActiveModel, TransactionTrait};
use serde::{Deserialize, Serialize};

use super::{reject, BoardService, CascadePolicy, CascadeReport};
use crate::config::SchemaConfig;
use crate::constants::{TASK_DESCRIPTION_MAX, TASK_TITLE_MAX};
use crate::entities::task::Priority;
use crate::entities::{label, task};
use crate::error::{BoardError, Result};
use crate::repositories::{BoardRepository, LabelRepository, ListRepository, TaskRepository};
use crate::validation::{validate_max_len, validate_story_points, validate_title, ValidationError};

/// Input for a new task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTask {
    /// Explicit task number; assigned by the database when `None`
    pub task_no: Option<i32>,
    pub list_id: i32,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub story_points: i32,
    /// Labels to attach on creation
    pub label_ids: Vec<i32>,
}

impl NewTask {
    pub fn new(list_id: i32, title: impl Into<String>, story_points: i32) -> Self {
        Self {
            list_id,
            title: title.into(),
            story_points,
            ..Self::default()
        }
    }

    pub fn with_task_no(mut self, task_no: i32) -> Self {
        self.task_no = Some(task_no);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_labels(mut self, label_ids: impl IntoIterator<Item = i32>) -> Self {
        self.label_ids = label_ids.into_iter().collect();
        self
    }

    fn validate(&self, rules: &SchemaConfig) -> std::result::Result<(), ValidationError> {
        validate_title("title", &self.title, TASK_TITLE_MAX)?;
        validate_max_len("description", &self.description, TASK_DESCRIPTION_MAX)?;
        validate_story_points(self.story_points, rules.story_points_cap())
    }
}

/// Partial update for a task. Setting `list_id` moves the task.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub list_id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub story_points: Option<i32>,
}

impl TaskChanges {
    fn validate(&self, rules: &SchemaConfig) -> std::result::Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title("title", title, TASK_TITLE_MAX)?;
        }
        if let Some(description) = &self.description {
            validate_max_len("description", description, TASK_DESCRIPTION_MAX)?;
        }
        if let Some(points) = self.story_points {
            validate_story_points(points, rules.story_points_cap())?;
        }
        Ok(())
    }
}

/// Project that owns a list, through its board.
async fn project_id_for_list<C>(conn: &C, list_id: i32) -> Result<i32>
where
    C: ConnectionTrait,
{
    let list = ListRepository::get_by_id(conn, list_id)
        .await?
        .ok_or_else(|| BoardError::not_found("list", list_id))?;
    let board = BoardRepository::get_by_id(conn, list.board_id)
        .await?
        .ok_or_else(|| BoardError::not_found("board", list.board_id))?;
    Ok(board.project_id)
}

impl BoardService {
    /// Reject a label from another project when scoping is enforced.
    fn check_label_scope(&self, action: &str, task_no: i32, task_project: i32, label: &label::Model) -> Result<()> {
        if self.rules.enforce_label_scope && label.project_id != task_project {
            return Err(reject(
                action,
                ValidationError::LabelOutOfScope {
                    label_id: label.id,
                    label_project: label.project_id,
                    task_no,
                    task_project,
                },
            ));
        }
        Ok(())
    }

    /// Get the tasks of a list, highest priority first.
    pub async fn get_tasks(&self, list_id: i32) -> Result<Vec<task::Model>> {
        let storage = self.storage.lock().await;
        TaskRepository::get_for_list(&storage.conn, list_id).await
    }

    /// Get a task by number.
    pub async fn get_task(&self, task_no: i32) -> Result<task::Model> {
        let storage = self.storage.lock().await;
        TaskRepository::get_by_id(&storage.conn, task_no)
            .await?
            .ok_or_else(|| BoardError::not_found("task", task_no))
    }

    /// Labels attached to a task, ordered by title.
    pub async fn get_task_labels(&self, task_no: i32) -> Result<Vec<label::Model>> {
        let storage = self.storage.lock().await;
        let task = TaskRepository::get_by_id(&storage.conn, task_no)
            .await?
            .ok_or_else(|| BoardError::not_found("task", task_no))?;
        TaskRepository::get_labels(&storage.conn, &task).await
    }

    /// Tasks carrying a label.
    pub async fn get_tasks_with_label(&self, label_id: i32) -> Result<Vec<task::Model>> {
        let storage = self.storage.lock().await;
        TaskRepository::get_with_label(&storage.conn, label_id).await
    }

    /// Create a task, optionally with an explicit number and labels.
    ///
    /// # Errors
    /// Returns a validation error for bad fields, story points that are not a
    /// multiple of five or exceed the cap, a task number already in use, or a
    /// label from another project; `NotFound` for an unknown list or label
    pub async fn create_task(&self, input: NewTask) -> Result<task::Model> {
        input.validate(&self.rules).map_err(|e| reject("create task", e))?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let project_id = project_id_for_list(&txn, input.list_id).await?;

        if let Some(task_no) = input.task_no {
            if TaskRepository::get_by_id(&txn, task_no).await?.is_some() {
                return Err(reject(
                    "create task",
                    ValidationError::Duplicate {
                        entity: "task",
                        key: format!("number {}", task_no),
                    },
                ));
            }
        }

        let model = task::ActiveModel {
            task_no: match input.task_no {
                Some(task_no) => ActiveValue::Set(task_no),
                None => ActiveValue::NotSet,
            },
            list_id: ActiveValue::Set(input.list_id),
            title: ActiveValue::Set(input.title),
            description: ActiveValue::Set(input.description),
            priority: ActiveValue::Set(input.priority),
            story_points: ActiveValue::Set(input.story_points),
        };
        let task = TaskRepository::create(&txn, model).await?;

        let mut label_ids = input.label_ids;
        label_ids.sort_unstable();
        label_ids.dedup();
        for label_id in label_ids {
            let label = LabelRepository::get_by_id(&txn, label_id)
                .await?
                .ok_or_else(|| BoardError::not_found("label", label_id))?;
            self.check_label_scope("create task", task.task_no, project_id, &label)?;
            TaskRepository::add_label(&txn, task.task_no, label_id).await?;
        }

        txn.commit().await?;

        info!(
            "Created task {} '{}' in list {} ({} points, {})",
            task.task_no,
            task.title,
            task.list_id,
            task.story_points,
            task.priority.label()
        );
        Ok(task)
    }

    /// Update a task's fields and/or move it to another list.
    ///
    /// # Errors
    /// Moving a task into another project while it carries labels from its
    /// current one fails when label scoping is enforced
    pub async fn update_task(&self, task_no: i32, changes: TaskChanges) -> Result<task::Model> {
        changes.validate(&self.rules).map_err(|e| reject("update task", e))?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let existing = TaskRepository::get_by_id(&txn, task_no)
            .await?
            .ok_or_else(|| BoardError::not_found("task", task_no))?;

        if let Some(list_id) = changes.list_id.filter(|id| *id != existing.list_id) {
            let target_project = project_id_for_list(&txn, list_id).await?;
            let label_ids = TaskRepository::get_label_ids(&txn, task_no).await?;
            for label in LabelRepository::get_by_ids(&txn, &label_ids).await? {
                self.check_label_scope("move task", task_no, target_project, &label)?;
            }
        }

        let mut model = existing.into_active_model();
        if let Some(list_id) = changes.list_id {
            model.list_id = ActiveValue::Set(list_id);
        }
        if let Some(title) = changes.title {
            model.title = ActiveValue::Set(title);
        }
        if let Some(description) = changes.description {
            model.description = ActiveValue::Set(description);
        }
        if let Some(priority) = changes.priority {
            model.priority = ActiveValue::Set(priority);
        }
        if let Some(points) = changes.story_points {
            model.story_points = ActiveValue::Set(points);
        }
        let task = TaskRepository::update(&txn, model).await?;
        txn.commit().await?;

        info!("Updated task {} '{}' (list {})", task.task_no, task.title, task.list_id);
        Ok(task)
    }

    /// Attach a label to a task. Attaching twice is a no-op.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown task or label, and a validation
    /// error when the label belongs to another project and scoping is on
    pub async fn attach_label(&self, task_no: i32, label_id: i32) -> Result<()> {
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let task = TaskRepository::get_by_id(&txn, task_no)
            .await?
            .ok_or_else(|| BoardError::not_found("task", task_no))?;
        let label = LabelRepository::get_by_id(&txn, label_id)
            .await?
            .ok_or_else(|| BoardError::not_found("label", label_id))?;

        let project_id = project_id_for_list(&txn, task.list_id).await?;
        self.check_label_scope("attach label", task_no, project_id, &label)?;

        TaskRepository::add_label(&txn, task_no, label_id).await?;
        txn.commit().await?;

        info!("Attached label {} '{}' to task {}", label.id, label.title, task_no);
        Ok(())
    }

    /// Detach a label from a task, returning whether it was attached.
    pub async fn detach_label(&self, task_no: i32, label_id: i32) -> Result<bool> {
        let storage = self.storage.lock().await;
        let removed = TaskRepository::remove_label(&storage.conn, task_no, label_id).await?;
        if removed {
            info!("Detached label {} from task {}", label_id, task_no);
        }
        Ok(removed)
    }

    /// Delete a task and its label links.
    pub async fn delete_task(&self, task_no: i32) -> Result<CascadeReport> {
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let task = TaskRepository::get_by_id(&txn, task_no)
            .await?
            .ok_or_else(|| BoardError::not_found("task", task_no))?;
        let report = CascadePolicy::delete_task(&txn, task).await?;
        txn.commit().await?;

        info!("Deleted task {}: {}", task_no, report);
        Ok(report)
    }
}
