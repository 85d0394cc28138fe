//! Repository layer for database operations.
//!
//! This module provides repository structs that encapsulate database queries
//! and operations, following the Data Mapper pattern recommended by SeaORM.
//! Repositories keep entities as pure data models while providing reusable
//! database access methods. Every method is generic over [`sea_orm::ConnectionTrait`]
//! so it runs the same on a connection or inside a transaction.

pub mod board;
pub mod label;
pub mod list;
pub mod project;
pub mod task;

pub use board::BoardRepository;
pub use label::LabelRepository;
pub use list::ListRepository;
pub use project::ProjectRepository;
pub use task::TaskRepository;
