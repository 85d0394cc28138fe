//! Utility modules for taskboard.
//!
//! Small pure helpers that the entity and service layers share.
//!
//! - [`slug`] - Slug derivation for project titles

pub mod slug;
