use taskboard::config::SchemaConfig;
use taskboard::service::{BoardService, NewProject, ProjectChanges};
use taskboard::storage::LocalStorage;
use taskboard::utils::slug::SlugStyle;
use taskboard::validation::ValidationError;
use taskboard::BoardError;

async fn service_with(rules: SchemaConfig) -> BoardService {
    let storage = LocalStorage::in_memory().await.expect("in-memory storage");
    BoardService::new(storage, rules)
}

async fn service() -> BoardService {
    service_with(SchemaConfig::default()).await
}

#[tokio::test]
async fn test_naive_slug_from_title() {
    let service = service().await;
    let project = service.create_project(NewProject::new("My Project")).await.unwrap();
    assert_eq!(project.slug, "my-project");
    assert_eq!(project.description, "");
    assert!(project.image.is_none());
}

#[tokio::test]
async fn test_slugify_style() {
    let rules = SchemaConfig {
        slug_style: SlugStyle::Slugify,
        ..SchemaConfig::default()
    };
    let service = service_with(rules).await;
    let project = service.create_project(NewProject::new("Launch: v2.0!")).await.unwrap();
    assert_eq!(project.slug, "launch-v20");
}

#[tokio::test]
async fn test_slugify_folds_accents() {
    let rules = SchemaConfig {
        slug_style: SlugStyle::Slugify,
        ..SchemaConfig::default()
    };
    let service = service_with(rules).await;
    let project = service.create_project(NewProject::new("Café Crème")).await.unwrap();
    assert_eq!(project.slug, "cafe-creme");
}

#[tokio::test]
async fn test_slugify_never_stores_empty_slug() {
    let rules = SchemaConfig {
        slug_style: SlugStyle::Slugify,
        ..SchemaConfig::default()
    };
    let service = service_with(rules).await;
    let project = service.create_project(NewProject::new("!!!")).await.unwrap();
    assert_eq!(project.slug, "!!!");

    let renamed = service
        .update_project(
            project.id,
            ProjectChanges {
                title: Some("Renamed".to_string()),
                ..ProjectChanges::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.slug, "!!!");
}

#[tokio::test]
async fn test_explicit_slug_is_kept() {
    let service = service().await;
    let project = service
        .create_project(NewProject::new("My Project").with_slug("custom_slug"))
        .await
        .unwrap();
    assert_eq!(project.slug, "custom_slug");

    let found = service.get_project_by_slug("custom_slug").await.unwrap();
    assert_eq!(found.map(|p| p.id), Some(project.id));
}

#[tokio::test]
async fn test_explicit_slug_must_be_valid() {
    let service = service().await;
    let err = service
        .create_project(NewProject::new("My Project").with_slug("not a slug"))
        .await
        .unwrap_err();
    assert!(matches!(err.as_validation(), Some(ValidationError::InvalidSlug(_))));
}

#[tokio::test]
async fn test_resave_keeps_slug() {
    let service = service().await;
    let project = service.create_project(NewProject::new("My Project")).await.unwrap();

    let renamed = service
        .update_project(
            project.id,
            ProjectChanges {
                title: Some("Renamed Project".to_string()),
                ..ProjectChanges::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.title, "Renamed Project");
    assert_eq!(renamed.slug, "my-project");

    let again = service
        .update_project(
            project.id,
            ProjectChanges {
                description: Some("Second save".to_string()),
                ..ProjectChanges::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(again.slug, "my-project");
    assert_eq!(again.description, "Second save");
}

#[tokio::test]
async fn test_duplicate_title_rejected() {
    let service = service().await;
    service.create_project(NewProject::new("Roadmap")).await.unwrap();

    let err = service.create_project(NewProject::new("Roadmap")).await.unwrap_err();
    assert!(err.is_uniqueness_violation());
    assert!(matches!(
        err.as_validation(),
        Some(ValidationError::Duplicate { entity: "project", .. })
    ));
    assert_eq!(service.get_projects().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_rename_onto_existing_title_rejected() {
    let service = service().await;
    service.create_project(NewProject::new("Alpha")).await.unwrap();
    let beta = service.create_project(NewProject::new("Beta")).await.unwrap();

    let err = service
        .update_project(
            beta.id,
            ProjectChanges {
                title: Some("Alpha".to_string()),
                ..ProjectChanges::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_uniqueness_violation());

    // Renaming to its own title is fine
    let same = service
        .update_project(
            beta.id,
            ProjectChanges {
                title: Some("Beta".to_string()),
                ..ProjectChanges::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(same.title, "Beta");
}

#[tokio::test]
async fn test_field_limits() {
    let service = service().await;

    let err = service.create_project(NewProject::new("")).await.unwrap_err();
    assert!(matches!(err.as_validation(), Some(ValidationError::Blank { field: "title" })));

    let err = service.create_project(NewProject::new("t".repeat(65))).await.unwrap_err();
    assert!(matches!(err.as_validation(), Some(ValidationError::TooLong { max: 64, .. })));

    let err = service
        .create_project(NewProject::new("Fine").with_description("d".repeat(257)))
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_validation(),
        Some(ValidationError::TooLong {
            field: "description",
            ..
        })
    ));

    assert!(service.get_projects().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_image_reference() {
    let service = service().await;
    let project = service
        .create_project(NewProject::new("Gallery").with_image("media/cover.png"))
        .await
        .unwrap();
    assert_eq!(project.image.as_deref(), Some("media/cover.png"));

    let cleared = service
        .update_project(
            project.id,
            ProjectChanges {
                image: Some(None),
                ..ProjectChanges::default()
            },
        )
        .await
        .unwrap();
    assert!(cleared.image.is_none());
}

#[tokio::test]
async fn test_missing_project() {
    let service = service().await;
    assert!(matches!(
        service.get_project(42).await,
        Err(BoardError::NotFound { entity: "project", id: 42 })
    ));
    assert!(matches!(
        service.update_project(42, ProjectChanges::default()).await,
        Err(BoardError::NotFound { .. })
    ));
    assert!(matches!(service.delete_project(42).await, Err(BoardError::NotFound { .. })));
}
