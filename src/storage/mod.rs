//! Local storage module for board data persistence
//!
//! This module owns the SeaORM connection and creates the tables for:
//! - Projects
//! - Boards
//! - Lists
//! - Labels
//! - Tasks
//! - Task-label relationships

pub mod db;

pub use db::LocalStorage;
