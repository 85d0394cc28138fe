use std::io::Write;
use taskboard::config::Config;
use taskboard::utils::slug::SlugStyle;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(config.storage.is_in_memory());
    assert_eq!(config.schema.slug_style, SlugStyle::Naive);
    assert_eq!(config.schema.story_points_cap(), Some(100));
    assert!(config.schema.enforce_label_scope);
    assert!(!config.logging.enabled);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Cap must be a multiple of five
    config.schema.story_points_cap = 42;
    assert!(config.validate().is_err());

    // Reset and test an unknown log level
    config.schema.story_points_cap = 0;
    config.logging.level = "verbose".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("slug_style = \"naive\""));
    assert!(toml_str.contains("story_points_cap = 100"));
    assert!(toml_str.contains("enforce_label_scope = true"));
}

#[test]
fn test_partial_config_deserialization() {
    let partial_toml = r#"
[schema]
slug_style = "slugify"
story_points_cap = 0

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    // Check that specified values are used
    assert_eq!(config.schema.slug_style, SlugStyle::Slugify);
    assert_eq!(config.schema.story_points_cap(), None);
    assert!(config.logging.enabled);

    // Check that unspecified values use defaults
    assert!(config.schema.enforce_label_scope);
    assert_eq!(config.logging.level, "info");
    assert!(config.storage.path.is_none());
}

#[test]
fn test_empty_config_deserialization() {
    let config: Config = toml::from_str("").unwrap();
    let default_config = Config::default();

    assert_eq!(config.schema.slug_style, default_config.schema.slug_style);
    assert_eq!(config.schema.story_points_cap, default_config.schema.story_points_cap);
    assert_eq!(config.logging.enabled, default_config.logging.enabled);
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[storage]\npath = \"/tmp/board.db\"\n\n[schema]\nenforce_label_scope = false").unwrap();

    let config = Config::load_from_file(file.path()).unwrap();
    assert_eq!(config.storage.database_url(), "sqlite:///tmp/board.db?mode=rwc");
    assert!(!config.schema.enforce_label_scope);
}

#[test]
fn test_load_from_file_rejects_invalid_values() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[schema]\nstory_points_cap = 7").unwrap();

    assert!(Config::load_from_file(file.path()).is_err());
}

#[test]
fn test_generate_default_config_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    Config::generate_default_config(&path).unwrap();
    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.schema.story_points_cap(), Some(100));
}
