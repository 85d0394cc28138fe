//! Explicit cascade-delete policy.
//!
//! Children are always removed before their parents, in this order:
//! task-label links, tasks, lists, boards, labels, then the target row.
//! The schema also declares `ON DELETE CASCADE`, but nothing here depends
//! on the storage engine honouring it. Callers run these inside a
//! transaction so a failure part way leaves nothing deleted.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use std::fmt;

use crate::entities::{board, label, list, project, task};
use crate::error::Result;
use crate::repositories::{
    BoardRepository, LabelRepository, ListRepository, ProjectRepository, TaskRepository,
};

/// Rows removed by one cascading delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub projects: u64,
    pub boards: u64,
    pub lists: u64,
    pub labels: u64,
    pub tasks: u64,
    pub task_labels: u64,
}

impl fmt::Display for CascadeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} project(s), {} board(s), {} list(s), {} label(s), {} task(s), {} label link(s)",
            self.projects, self.boards, self.lists, self.labels, self.tasks, self.task_labels
        )
    }
}

/// Deletion order for every entity that owns children.
pub struct CascadePolicy;

impl CascadePolicy {
    /// Remove a project, its boards with their lists and tasks, and its labels.
    pub async fn delete_project<C>(conn: &C, project: project::Model) -> Result<CascadeReport>
    where
        C: ConnectionTrait,
    {
        let board_ids = BoardRepository::ids_for_project(conn, project.id).await?;
        let mut report = Self::delete_lists_of_boards(conn, &board_ids).await?;

        let label_ids = LabelRepository::ids_for_project(conn, project.id).await?;
        // Links from tasks in other projects, possible when scoping is off
        report.task_labels += TaskRepository::clear_links_to_labels(conn, &label_ids).await?;

        report.boards = BoardRepository::delete_for_project(conn, project.id).await?;
        report.labels = LabelRepository::delete_for_project(conn, project.id).await?;

        ProjectRepository::delete(conn, project).await?;
        report.projects = 1;
        Ok(report)
    }

    /// Remove a board with its lists and their tasks.
    pub async fn delete_board<C>(conn: &C, board: board::Model) -> Result<CascadeReport>
    where
        C: ConnectionTrait,
    {
        let mut report = Self::delete_lists_of_boards(conn, &[board.id]).await?;
        BoardRepository::delete(conn, board).await?;
        report.boards = 1;
        Ok(report)
    }

    /// Remove a list with its tasks.
    pub async fn delete_list<C>(conn: &C, list: list::Model) -> Result<CascadeReport>
    where
        C: ConnectionTrait,
    {
        let mut report = Self::delete_tasks_of_lists(conn, &[list.id]).await?;
        ListRepository::delete(conn, list).await?;
        report.lists = 1;
        Ok(report)
    }

    /// Remove a task and its label links.
    pub async fn delete_task<C>(conn: &C, task: task::Model) -> Result<CascadeReport>
    where
        C: ConnectionTrait,
    {
        let task_labels = TaskRepository::clear_labels_for_tasks(conn, &[task.task_no]).await?;
        TaskRepository::delete(conn, task).await?;
        Ok(CascadeReport {
            tasks: 1,
            task_labels,
            ..CascadeReport::default()
        })
    }

    /// Remove a label and detach it from every task.
    pub async fn delete_label<C>(conn: &C, label: label::Model) -> Result<CascadeReport>
    where
        C: ConnectionTrait,
    {
        let task_labels = TaskRepository::clear_links_to_labels(conn, &[label.id]).await?;
        LabelRepository::delete(conn, label).await?;
        Ok(CascadeReport {
            labels: 1,
            task_labels,
            ..CascadeReport::default()
        })
    }

    async fn delete_lists_of_boards<C>(conn: &C, board_ids: &[i32]) -> Result<CascadeReport>
    where
        C: ConnectionTrait,
    {
        let list_ids = ListRepository::ids_for_boards(conn, board_ids).await?;
        let mut report = Self::delete_tasks_of_lists(conn, &list_ids).await?;
        report.lists = ListRepository::delete_for_boards(conn, board_ids).await?;
        Ok(report)
    }

    async fn delete_tasks_of_lists<C>(conn: &C, list_ids: &[i32]) -> Result<CascadeReport>
    where
        C: ConnectionTrait,
    {
        let task_nos = TaskRepository::numbers_for_lists(conn, list_ids).await?;
        let task_labels = TaskRepository::clear_labels_for_tasks(conn, &task_nos).await?;
        let tasks = TaskRepository::delete_for_lists(conn, list_ids).await?;
        Ok(CascadeReport {
            tasks,
            task_labels,
            ..CascadeReport::default()
        })
    }
}
