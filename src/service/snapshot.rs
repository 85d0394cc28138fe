use serde::Serialize;

use super::BoardService;
use crate::entities::{board, label, list, project, task};
use crate::error::{BoardError, Result};
use crate::repositories::{BoardRepository, LabelRepository, ListRepository, ProjectRepository, TaskRepository};

/// A project with everything under it, ready to serialize.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSnapshot {
    #[serde(flatten)]
    pub project: project::Model,
    pub labels: Vec<label::Model>,
    pub boards: Vec<BoardSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    #[serde(flatten)]
    pub board: board::Model,
    pub lists: Vec<ListSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListSnapshot {
    #[serde(flatten)]
    pub list: list::Model,
    pub tasks: Vec<TaskSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskSnapshot {
    #[serde(flatten)]
    pub task: task::Model,
    pub label_ids: Vec<i32>,
}

impl ProjectSnapshot {
    /// Total number of tasks across all boards.
    pub fn task_count(&self) -> usize {
        self.boards
            .iter()
            .flat_map(|b| &b.lists)
            .map(|l| l.tasks.len())
            .sum()
    }
}

impl BoardService {
    /// Read a whole project tree: labels, boards, lists in position order,
    /// and tasks with their label ids.
    pub async fn project_snapshot(&self, project_id: i32) -> Result<ProjectSnapshot> {
        let storage = self.storage.lock().await;
        let conn = &storage.conn;

        let project = ProjectRepository::get_by_id(conn, project_id)
            .await?
            .ok_or_else(|| BoardError::not_found("project", project_id))?;
        let labels = LabelRepository::get_for_project(conn, project_id).await?;

        let mut boards = Vec::new();
        for board in BoardRepository::get_for_project(conn, project_id).await? {
            let mut lists = Vec::new();
            for list in ListRepository::get_for_board(conn, board.id).await? {
                let mut tasks = Vec::new();
                for task in TaskRepository::get_for_list(conn, list.id).await? {
                    let label_ids = TaskRepository::get_label_ids(conn, task.task_no).await?;
                    tasks.push(TaskSnapshot { task, label_ids });
                }
                lists.push(ListSnapshot { list, tasks });
            }
            boards.push(BoardSnapshot { board, lists });
        }

        Ok(ProjectSnapshot {
            project,
            labels,
            boards,
        })
    }
}
