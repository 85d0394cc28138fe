//! Logging setup.
//!
//! The crate logs through the `log` facade. This module builds a `fern`
//! dispatch from [`LoggingConfig`] that writes timestamped lines to a file.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;

use crate::config::LoggingConfig;
use crate::constants::{APP_NAME, LOG_FILE_NAME};

/// Default log file location inside the user's cache directory
pub fn get_log_file_path() -> Result<PathBuf> {
    dirs::cache_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))
        .map(|dir| dir.join(APP_NAME).join(LOG_FILE_NAME))
}

/// Build the dispatch for this configuration, or `None` when logging is off
pub fn build_dispatch(config: &LoggingConfig) -> Result<Option<fern::Dispatch>> {
    if !config.enabled {
        return Ok(None);
    }

    let level = config.level_filter()?;
    let path = match &config.file {
        Some(path) => path.clone(),
        None => get_log_file_path()?,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = fern::log_file(&path).with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] {:<5} {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // sqlx and sea-orm are chatty below warn
        .level_for("sqlx", log::LevelFilter::Warn)
        .level_for("sea_orm", log::LevelFilter::Warn)
        .chain(file);

    Ok(Some(dispatch))
}

/// Install the global logger. Safe to call with logging disabled.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if let Some(dispatch) = build_dispatch(config)? {
        dispatch.apply().context("Failed to install logger")?;
    }
    Ok(())
}
