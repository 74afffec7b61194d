//! `SQLite` implementation of [`SportRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use olympics_app::ports::SportRepository;
use olympics_domain::error::OlympicsError;
use olympics_domain::id::SportId;
use olympics_domain::sport::Sport;

use crate::error::StorageError;
use crate::guard::{ensure_affected, inserted_id, is_unreferenced};

/// Wrapper for converting database rows into domain [`Sport`].
struct Wrapper(Sport);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Sport> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Sport {
            id: SportId::new(row.try_get("id")?),
            name: row.try_get("name")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO sports (name) VALUES (?)";
const SELECT_BY_ID: &str = "SELECT id, name FROM sports WHERE id = ?";
const SELECT_ALL: &str = "SELECT id, name FROM sports ORDER BY id";
const UPDATE: &str = "UPDATE sports SET name = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM sports WHERE id = ?";
const COUNT_EVENTS: &str = "SELECT COUNT(*) FROM events WHERE sport_id = ?";

/// `SQLite`-backed sport repository.
#[derive(Clone)]
pub struct SqliteSportRepository {
    pool: SqlitePool,
}

impl SqliteSportRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SportRepository for SqliteSportRepository {
    fn get_by_id(
        &self,
        id: SportId,
    ) -> impl Future<Output = Result<Option<Sport>, OlympicsError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Sport>, OlympicsError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn insert(&self, sport: &Sport) -> impl Future<Output = Result<SportId, OlympicsError>> + Send {
        let pool = self.pool.clone();
        let name = sport.name.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(name)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(SportId::new(inserted_id(&result, "Sport")?))
        }
    }

    fn update(
        &self,
        current: &Sport,
        replacement: &Sport,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send {
        let pool = self.pool.clone();
        let id = current.id;
        let name = replacement.name.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(name)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            ensure_affected(&result, "Sport", id)
        }
    }

    fn delete(&self, sport: &Sport) -> impl Future<Output = Result<(), OlympicsError>> + Send {
        let pool = self.pool.clone();
        let id = sport.id;
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            ensure_affected(&result, "Sport", id)
        }
    }

    fn is_deletable(
        &self,
        sport: &Sport,
    ) -> impl Future<Output = Result<bool, OlympicsError>> + Send {
        let pool = self.pool.clone();
        let id = sport.id;
        async move { is_unreferenced(&pool, COUNT_EVENTS, id.get()).await }
    }
}
