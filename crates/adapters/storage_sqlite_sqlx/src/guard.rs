//! Helpers shared by the repositories: dependent counting and row-count
//! checks.

use olympics_domain::error::{NotFoundError, OlympicsError};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteQueryResult;

use crate::error::StorageError;

/// Run a `SELECT COUNT(*) ... WHERE <fk> = ?` query and report whether it
/// found nothing.
pub(crate) async fn is_unreferenced(
    pool: &SqlitePool,
    count_query: &'static str,
    id: i64,
) -> Result<bool, OlympicsError> {
    let count: i64 = sqlx::query_scalar(count_query)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(StorageError::from)?;
    Ok(count == 0)
}

/// Identity of the row written by an insert.
///
/// An insert the store silently skipped (e.g. a `RAISE(IGNORE)` trigger)
/// reports zero rows, and `last_insert_rowid` would then name an older row.
pub(crate) fn inserted_id(
    result: &SqliteQueryResult,
    entity: &'static str,
) -> Result<i64, OlympicsError> {
    if result.rows_affected() == 0 {
        return Err(StorageError::MissingGeneratedKey { entity }.into());
    }
    Ok(result.last_insert_rowid())
}

/// Turn a mutation that touched no row into [`NotFoundError`].
pub(crate) fn ensure_affected(
    result: &SqliteQueryResult,
    entity: &'static str,
    id: impl ToString,
) -> Result<(), OlympicsError> {
    if result.rows_affected() == 0 {
        return Err(NotFoundError {
            entity,
            id: id.to_string(),
        }
        .into());
    }
    Ok(())
}
