//! SeaORM entity models for the board schema.
//!
//! Foreign keys run Project <- Board <- List <- Task and Project <- Label,
//! with `task_label` joining tasks and labels. Relations declare
//! `ON DELETE CASCADE`; the service layer still deletes children itself
//! (see [`crate::service::cascade`]).

pub mod board;
pub mod label;
pub mod list;
pub mod project;
pub mod task;
pub mod task_label;

pub use board::Entity as Board;
pub use label::Entity as Label;
pub use list::Entity as List;
pub use project::Entity as Project;
pub use task::Entity as Task;
pub use task_label::Entity as TaskLabel;
