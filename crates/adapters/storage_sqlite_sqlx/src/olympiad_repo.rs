//! `SQLite` implementation of [`OlympiadRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use olympics_app::ports::OlympiadRepository;
use olympics_domain::error::OlympicsError;
use olympics_domain::id::OlympiadId;
use olympics_domain::olympiad::{Olympiad, Season};

use crate::error::StorageError;
use crate::guard::{ensure_affected, inserted_id, is_unreferenced};

/// Wrapper for converting database rows into domain [`Olympiad`].
struct Wrapper(Olympiad);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let season: String = row.try_get("season")?;
        let season: Season = season
            .parse()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Olympiad {
            id: OlympiadId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            year: row.try_get("year")?,
            season,
            city: row.try_get("city")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO olympiads (name, year, season, city) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT id, name, year, season, city FROM olympiads WHERE id = ?";
const SELECT_ALL: &str = "SELECT id, name, year, season, city FROM olympiads ORDER BY id";
const UPDATE: &str = "UPDATE olympiads SET name = ?, year = ?, season = ?, city = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM olympiads WHERE id = ?";
const COUNT_EVENTS: &str = "SELECT COUNT(*) FROM events WHERE olympiad_id = ?";

/// `SQLite`-backed olympiad repository.
#[derive(Clone)]
pub struct SqliteOlympiadRepository {
    pool: SqlitePool,
}

impl SqliteOlympiadRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl OlympiadRepository for SqliteOlympiadRepository {
    fn get_by_id(
        &self,
        id: OlympiadId,
    ) -> impl Future<Output = Result<Option<Olympiad>, OlympicsError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Olympiad>, OlympicsError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn insert(
        &self,
        olympiad: &Olympiad,
    ) -> impl Future<Output = Result<OlympiadId, OlympicsError>> + Send {
        let pool = self.pool.clone();
        let olympiad = olympiad.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(&olympiad.name)
                .bind(olympiad.year)
                .bind(olympiad.season.as_str())
                .bind(&olympiad.city)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(OlympiadId::new(inserted_id(&result, "Olympiad")?))
        }
    }

    fn update(
        &self,
        current: &Olympiad,
        replacement: &Olympiad,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send {
        let pool = self.pool.clone();
        let id = current.id;
        let replacement = replacement.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&replacement.name)
                .bind(replacement.year)
                .bind(replacement.season.as_str())
                .bind(&replacement.city)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            ensure_affected(&result, "Olympiad", id)
        }
    }

    fn delete(
        &self,
        olympiad: &Olympiad,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send {
        let pool = self.pool.clone();
        let id = olympiad.id;
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            ensure_affected(&result, "Olympiad", id)
        }
    }

    fn is_deletable(
        &self,
        olympiad: &Olympiad,
    ) -> impl Future<Output = Result<bool, OlympicsError>> + Send {
        let pool = self.pool.clone();
        let id = olympiad.id;
        async move { is_unreferenced(&pool, COUNT_EVENTS, id.get()).await }
    }
}
