//! Error types for board operations.

use sea_orm::{DbErr, SqlErr};

use crate::validation::ValidationError;

/// Kind of storage constraint that rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Unique,
    ForeignKey,
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unique => write!(f, "unique"),
            Self::ForeignKey => write!(f, "foreign key"),
        }
    }
}

/// Errors returned by repositories and the board service.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// A field failed validation; nothing was written.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The database rejected the write on a constraint.
    #[error("Integrity error ({constraint}): {message}")]
    Integrity { constraint: Constraint, message: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i32 },

    #[error("Database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for BoardError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => Self::Integrity {
                constraint: Constraint::Unique,
                message,
            },
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => Self::Integrity {
                constraint: Constraint::ForeignKey,
                message,
            },
            _ => Self::Database(err),
        }
    }
}

impl BoardError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    /// Returns the validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// True for errors that mean a unique key is already taken, whether
    /// caught before the write or reported by the database.
    pub fn is_uniqueness_violation(&self) -> bool {
        matches!(
            self,
            Self::Validation(ValidationError::Duplicate { .. })
                | Self::Integrity {
                    constraint: Constraint::Unique,
                    ..
                }
        )
    }
}

/// Result alias for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;
