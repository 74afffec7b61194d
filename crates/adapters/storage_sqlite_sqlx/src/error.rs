//! Storage-specific error type wrapping sqlx errors.

use olympics_domain::error::{IntegrityError, OlympicsError};
use sqlx::error::ErrorKind;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// An insert wrote no row, so there is no generated key to return.
    #[error("{entity} insert affected no rows")]
    MissingGeneratedKey { entity: &'static str },
}

impl StorageError {
    /// Whether the store refused the statement because of a key or check
    /// constraint.
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(err)) => matches!(
                err.kind(),
                ErrorKind::ForeignKeyViolation
                    | ErrorKind::UniqueViolation
                    | ErrorKind::CheckViolation
            ),
            _ => false,
        }
    }
}

impl From<StorageError> for OlympicsError {
    fn from(err: StorageError) -> Self {
        if err.is_constraint_violation() {
            IntegrityError::Rejected(Box::new(err)).into()
        } else {
            Self::Storage(Box::new(err))
        }
    }
}
