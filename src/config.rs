//! Configuration management for taskboard
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    APP_NAME, CONFIG_GENERATED, DEFAULT_LOG_LEVEL, DEFAULT_STORY_POINTS_CAP, LOCAL_CONFIG_FILE, STORY_POINTS_STEP,
};
use crate::utils::slug::SlugStyle;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub schema: SchemaConfig,
    pub logging: LoggingConfig,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file; in-memory when absent
    pub path: Option<PathBuf>,
}

/// Rules applied to writes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// How project slugs are derived: "naive" or "slugify"
    pub slug_style: SlugStyle,
    /// Upper bound for task story points (0 = no cap)
    pub story_points_cap: u32,
    /// Reject labels from another project than the task's
    pub enforce_label_scope: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging
    pub enabled: bool,
    /// Minimum level: "error", "warn", "info", "debug" or "trace"
    pub level: String,
    /// Log file; defaults to the cache directory
    pub file: Option<PathBuf>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            slug_style: SlugStyle::Naive,
            story_points_cap: DEFAULT_STORY_POINTS_CAP,
            enforce_label_scope: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

impl StorageConfig {
    /// Connection URL for this storage
    pub fn database_url(&self) -> String {
        match &self.path {
            Some(path) => format!("sqlite://{}?mode=rwc", path.display()),
            None => "sqlite::memory:".to_string(),
        }
    }

    /// Whether the database lives only in memory
    pub fn is_in_memory(&self) -> bool {
        self.path.is_none()
    }
}

impl SchemaConfig {
    /// The story points cap, or `None` when disabled
    pub fn story_points_cap(&self) -> Option<i32> {
        match self.story_points_cap {
            0 => None,
            cap => Some(i32::try_from(cap).unwrap_or(i32::MAX)),
        }
    }
}

impl LoggingConfig {
    /// Parsed log level
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        log::LevelFilter::from_str(&self.level).with_context(|| format!("Invalid log level '{}'", self.level))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join(APP_NAME).join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.storage.path {
            if path.as_os_str().is_empty() {
                anyhow::bail!("storage.path cannot be empty; omit it for an in-memory database");
            }
        }

        if self.schema.story_points_cap % STORY_POINTS_STEP as u32 != 0 {
            anyhow::bail!(
                "story_points_cap must be a multiple of {}, got {}",
                STORY_POINTS_STEP,
                self.schema.story_points_cap
            );
        }

        self.logging.level_filter()?;

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# taskboard configuration file\n# Generated on {}\n# storage.path: omit for an in-memory database\n# schema.story_points_cap: 0 disables the cap\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(APP_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_points_cap_zero_disables() {
        let mut schema = SchemaConfig::default();
        assert_eq!(schema.story_points_cap(), Some(100));

        schema.story_points_cap = 0;
        assert_eq!(schema.story_points_cap(), None);
    }

    #[test]
    fn test_database_url() {
        let storage = StorageConfig::default();
        assert!(storage.is_in_memory());
        assert_eq!(storage.database_url(), "sqlite::memory:");

        let storage = StorageConfig {
            path: Some(PathBuf::from("/tmp/board.db")),
        };
        assert_eq!(storage.database_url(), "sqlite:///tmp/board.db?mode=rwc");
    }

    #[test]
    fn test_level_filter() {
        let mut logging = LoggingConfig::default();
        assert_eq!(logging.level_filter().unwrap(), log::LevelFilter::Info);

        logging.level = "DEBUG".to_string();
        assert_eq!(logging.level_filter().unwrap(), log::LevelFilter::Debug);

        logging.level = "loud".to_string();
        assert!(logging.level_filter().is_err());
    }
}
