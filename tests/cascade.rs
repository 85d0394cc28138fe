use taskboard::config::SchemaConfig;
use taskboard::service::{BoardService, CascadeReport, NewBoard, NewLabel, NewList, NewProject, NewTask};
use taskboard::storage::LocalStorage;
use taskboard::BoardError;

async fn service_with(rules: SchemaConfig) -> BoardService {
    let storage = LocalStorage::in_memory().await.expect("in-memory storage");
    BoardService::new(storage, rules)
}

struct Seeded {
    project: i32,
    boards: Vec<i32>,
    lists: Vec<i32>,
    labels: Vec<i32>,
    tasks: Vec<i32>,
}

/// Two boards with two lists each, one task per list, two labels on the
/// first task and one on the second.
async fn seed(service: &BoardService, title: &str) -> Seeded {
    let project = service.create_project(NewProject::new(title)).await.unwrap();
    let bug = service.create_label(NewLabel::new(project.id, "Bug", "#ff0000")).await.unwrap();
    let docs = service.create_label(NewLabel::new(project.id, "Docs", "#00f")).await.unwrap();

    let mut seeded = Seeded {
        project: project.id,
        boards: Vec::new(),
        lists: Vec::new(),
        labels: vec![bug.id, docs.id],
        tasks: Vec::new(),
    };
    for board_title in ["Main", "Side"] {
        let board = service.create_board(NewBoard::new(project.id, board_title)).await.unwrap();
        seeded.boards.push(board.id);
        for (position, list_title) in ["Todo", "Done"].into_iter().enumerate() {
            let list = service
                .create_list(NewList::new(board.id, list_title, position as i32))
                .await
                .unwrap();
            seeded.lists.push(list.id);
            let task = service
                .create_task(NewTask::new(list.id, format!("{} {}", board_title, list_title), 5))
                .await
                .unwrap();
            seeded.tasks.push(task.task_no);
        }
    }
    service.attach_label(seeded.tasks[0], bug.id).await.unwrap();
    service.attach_label(seeded.tasks[0], docs.id).await.unwrap();
    service.attach_label(seeded.tasks[1], bug.id).await.unwrap();
    seeded
}

#[tokio::test]
async fn test_delete_project_removes_everything_under_it() {
    let service = service_with(SchemaConfig::default()).await;
    let alpha = seed(&service, "Alpha").await;
    let beta = seed(&service, "Beta").await;

    let report = service.delete_project(alpha.project).await.unwrap();
    assert_eq!(
        report,
        CascadeReport {
            projects: 1,
            boards: 2,
            lists: 4,
            labels: 2,
            tasks: 4,
            task_labels: 3,
        }
    );

    assert!(matches!(service.get_project(alpha.project).await, Err(BoardError::NotFound { .. })));
    assert!(service.get_boards(alpha.project).await.unwrap().is_empty());
    assert!(service.get_labels(alpha.project).await.unwrap().is_empty());
    for list in &alpha.lists {
        assert!(service.get_tasks(*list).await.unwrap().is_empty());
    }
    for task in &alpha.tasks {
        assert!(service.get_task(*task).await.is_err());
    }

    // The other project is untouched
    let snapshot = service.project_snapshot(beta.project).await.unwrap();
    assert_eq!(snapshot.boards.len(), 2);
    assert_eq!(snapshot.labels.len(), 2);
    assert_eq!(snapshot.task_count(), 4);
    assert_eq!(service.get_task_labels(beta.tasks[0]).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_project_clears_foreign_links() {
    let rules = SchemaConfig {
        enforce_label_scope: false,
        ..SchemaConfig::default()
    };
    let service = service_with(rules).await;
    let alpha = seed(&service, "Alpha").await;
    let beta = seed(&service, "Beta").await;

    // A Beta task carrying an Alpha label
    service.attach_label(beta.tasks[3], alpha.labels[0]).await.unwrap();

    let report = service.delete_project(alpha.project).await.unwrap();
    assert_eq!(report.task_labels, 4);
    assert!(service.get_task_labels(beta.tasks[3]).await.unwrap().is_empty());
    assert_eq!(service.get_task(beta.tasks[3]).await.unwrap().task_no, beta.tasks[3]);
}

#[tokio::test]
async fn test_delete_board() {
    let service = service_with(SchemaConfig::default()).await;
    let alpha = seed(&service, "Alpha").await;

    let report = service.delete_board(alpha.boards[0]).await.unwrap();
    assert_eq!(
        report,
        CascadeReport {
            boards: 1,
            lists: 2,
            tasks: 2,
            task_labels: 3,
            ..CascadeReport::default()
        }
    );

    let boards = service.get_boards(alpha.project).await.unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].id, alpha.boards[1]);
    // Labels belong to the project and survive
    assert_eq!(service.get_labels(alpha.project).await.unwrap().len(), 2);
    assert!(service.get_tasks_with_label(alpha.labels[0]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_list() {
    let service = service_with(SchemaConfig::default()).await;
    let alpha = seed(&service, "Alpha").await;

    let report = service.delete_list(alpha.lists[1]).await.unwrap();
    assert_eq!(
        report,
        CascadeReport {
            lists: 1,
            tasks: 1,
            task_labels: 1,
            ..CascadeReport::default()
        }
    );
    assert_eq!(service.get_lists(alpha.boards[0]).await.unwrap().len(), 1);
    assert!(service.get_task(alpha.tasks[1]).await.is_err());
    assert!(service.get_task(alpha.tasks[0]).await.is_ok());
}

#[tokio::test]
async fn test_delete_task() {
    let service = service_with(SchemaConfig::default()).await;
    let alpha = seed(&service, "Alpha").await;

    let report = service.delete_task(alpha.tasks[0]).await.unwrap();
    assert_eq!(report.tasks, 1);
    assert_eq!(report.task_labels, 2);
    assert_eq!(report.to_string(), "0 project(s), 0 board(s), 0 list(s), 0 label(s), 1 task(s), 2 label link(s)");

    // Labels themselves are not touched
    assert_eq!(service.get_labels(alpha.project).await.unwrap().len(), 2);
    let with_bug: Vec<_> = service
        .get_tasks_with_label(alpha.labels[0])
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.task_no)
        .collect();
    assert_eq!(with_bug, vec![alpha.tasks[1]]);
}

#[tokio::test]
async fn test_delete_label_detaches_it() {
    let service = service_with(SchemaConfig::default()).await;
    let alpha = seed(&service, "Alpha").await;

    let report = service.delete_label(alpha.labels[0]).await.unwrap();
    assert_eq!(
        report,
        CascadeReport {
            labels: 1,
            task_labels: 2,
            ..CascadeReport::default()
        }
    );

    let remaining: Vec<_> = service
        .get_task_labels(alpha.tasks[0])
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.id)
        .collect();
    assert_eq!(remaining, vec![alpha.labels[1]]);
    assert!(service.get_task_labels(alpha.tasks[1]).await.unwrap().is_empty());
    // Tasks survive
    assert_eq!(service.get_tasks(alpha.lists[0]).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_project_snapshot() {
    let service = service_with(SchemaConfig::default()).await;
    let alpha = seed(&service, "Alpha").await;

    let snapshot = service.project_snapshot(alpha.project).await.unwrap();
    assert_eq!(snapshot.project.title, "Alpha");
    assert_eq!(snapshot.task_count(), 4);

    let main = &snapshot.boards[0];
    assert_eq!(main.board.title, "Main");
    let list_titles: Vec<_> = main.lists.iter().map(|l| l.list.title.as_str()).collect();
    assert_eq!(list_titles, vec!["Todo", "Done"]);
    assert_eq!(main.lists[0].tasks[0].label_ids, alpha.labels);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["slug"], "alpha");
    assert_eq!(json["boards"][0]["lists"][0]["tasks"][0]["priority"], "MEDIUM");
    assert_eq!(json["labels"].as_array().map(Vec::len), Some(2));

    assert!(matches!(service.project_snapshot(999).await, Err(BoardError::NotFound { .. })));
}
