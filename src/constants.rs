//! Constants used throughout the crate
//!
//! This module centralizes field limits, defaults and log messages so the
//! validators, the service layer and the configuration agree on them.

/// Application name, used for config and log directories
pub const APP_NAME: &str = "taskboard";

/// Config file looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = "taskboard.toml";

/// Log file name inside the cache directory
pub const LOG_FILE_NAME: &str = "taskboard.log";

// Field Limits
/// Maximum length of a project title
pub const PROJECT_TITLE_MAX: usize = 64;
/// Maximum length of a project description
pub const PROJECT_DESCRIPTION_MAX: usize = 256;
/// Maximum length of a board title
pub const BOARD_TITLE_MAX: usize = 64;
/// Maximum length of a list title
pub const LIST_TITLE_MAX: usize = 64;
/// Maximum length of a label title
pub const LABEL_TITLE_MAX: usize = 32;
/// Maximum length of a task title
pub const TASK_TITLE_MAX: usize = 64;
/// Maximum length of a task description
pub const TASK_DESCRIPTION_MAX: usize = 512;

// Defaults
/// Default upper bound for story points (0 disables the cap)
pub const DEFAULT_STORY_POINTS_CAP: u32 = 100;
/// Story points must be a multiple of this value
pub const STORY_POINTS_STEP: i32 = 5;
/// Default log level when logging is enabled
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Pool size for file-backed databases
pub const FILE_DB_MAX_CONNECTIONS: u32 = 4;

// Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const LOG_SCHEMA_READY: &str = "✅ Database schema ready";
pub const LOG_WRITE_REJECTED: &str = "❌ Write rejected";
