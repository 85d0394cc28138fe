//! Board service: the single entry point for writes.
//!
//! [`BoardService`] validates input with the pure validators in
//! [`crate::validation`], checks that parents exist and that unique keys are
//! free, then writes inside one transaction. Storage-level constraint
//! failures still surface as [`BoardError::Integrity`]. Deletes go through
//! the explicit policy in [`cascade`].
//!
//! Operations are split by entity across the submodules, all on the same
//! `impl BoardService`.

pub mod boards;
pub mod cascade;
pub mod labels;
pub mod lists;
pub mod projects;
pub mod snapshot;
pub mod tasks;

use log::warn;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::{Config, SchemaConfig};
use crate::constants::LOG_WRITE_REJECTED;
use crate::error::{BoardError, Result};
use crate::storage::LocalStorage;
use crate::validation::ValidationError;

pub use boards::NewBoard;
pub use cascade::{CascadePolicy, CascadeReport};
pub use labels::{LabelChanges, NewLabel};
pub use lists::{ListChanges, NewList};
pub use projects::{NewProject, ProjectChanges};
pub use snapshot::{BoardSnapshot, ListSnapshot, ProjectSnapshot, TaskSnapshot};
pub use tasks::{NewTask, TaskChanges};

/// Service that owns validated writes and reads over local storage.
///
/// The storage sits behind a mutex that is held for the whole of a write
/// transaction, so writes are serialized.
///
/// # Example
/// ```rust,no_run
/// use taskboard::config::Config;
/// use taskboard::service::{BoardService, NewProject};
///
/// # async fn example() -> taskboard::error::Result<()> {
/// let service = BoardService::open(&Config::default()).await?;
/// let project = service.create_project(NewProject::new("My Project")).await?;
/// assert_eq!(project.slug, "my-project");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BoardService {
    storage: Arc<Mutex<LocalStorage>>,
    rules: SchemaConfig,
}

impl BoardService {
    /// Wrap an opened storage with the given write rules.
    pub fn new(storage: LocalStorage, rules: SchemaConfig) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
            rules,
        }
    }

    /// Open the configured storage and build a service over it.
    pub async fn open(config: &Config) -> Result<Self> {
        let storage = LocalStorage::new(&config.storage).await?;
        Ok(Self::new(storage, config.schema.clone()))
    }

    /// The write rules in effect.
    pub fn rules(&self) -> &SchemaConfig {
        &self.rules
    }

    /// Shared handle to the underlying storage.
    pub fn storage(&self) -> Arc<Mutex<LocalStorage>> {
        Arc::clone(&self.storage)
    }
}

/// Log a rejected write and turn the validation failure into a service error.
pub(crate) fn reject(action: &str, err: ValidationError) -> BoardError {
    warn!("{} ({}): {}", LOG_WRITE_REJECTED, action, err);
    BoardError::Validation(err)
}
