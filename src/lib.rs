//! Taskboard - the data model of a project/task-board tool
//!
//! Projects own boards and labels, boards own lists, lists own tasks, and
//! tasks carry any number of labels. Every write is validated before it
//! reaches the database, and deletes cascade through an explicit policy.
//!
//! # Modules
//!
//! * [`config`] - Configuration loading and validation
//! * [`entities`] - SeaORM entity models for the schema
//! * [`repositories`] - Query helpers per entity
//! * [`service`] - Validated writes, reads and cascading deletes
//! * [`storage`] - Connection handling and schema creation
//! * [`validation`] - Pure field validators
//! * [`utils`] - Slug derivation and other helpers

/// Configuration module for managing application settings
pub mod config;

/// Field limits, defaults and log messages
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Error types shared by repositories and the service
pub mod error;

/// Logging setup over the `log` facade
pub mod logger;

/// Repository layer for database operations
pub mod repositories;

/// Board service: validated writes and cascading deletes
pub mod service;

/// Local storage layer owning the database connection
pub mod storage;

/// Utility functions and helpers
pub mod utils;

/// Field validators
pub mod validation;

// Re-export entity models for convenient access
pub use entities::{board, label, list, project, task, task_label};
pub use error::{BoardError, Result};
pub use service::BoardService;
