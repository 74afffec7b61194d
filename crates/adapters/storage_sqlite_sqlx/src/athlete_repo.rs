//! `SQLite` implementation of [`AthleteRepository`].
//!
//! The photo column is a nullable BLOB written and read verbatim.

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use olympics_app::ports::AthleteRepository;
use olympics_domain::athlete::{Athlete, Photo, Sex};
use olympics_domain::error::OlympicsError;
use olympics_domain::id::AthleteId;

use crate::error::StorageError;
use crate::guard::{ensure_affected, inserted_id, is_unreferenced};

/// Wrapper for converting database rows into domain [`Athlete`].
struct Wrapper(Athlete);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let sex: String = row.try_get("sex")?;
        let sex: Sex = sex
            .parse()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let photo: Option<Vec<u8>> = row.try_get("photo")?;

        Ok(Self(Athlete {
            id: AthleteId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            sex,
            weight: row.try_get("weight")?,
            height: row.try_get("height")?,
            photo: photo.map(Photo::new),
        }))
    }
}

const INSERT: &str =
    "INSERT INTO athletes (name, sex, weight, height, photo) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str =
    "SELECT id, name, sex, weight, height, photo FROM athletes WHERE id = ?";
const SELECT_ALL: &str = "SELECT id, name, sex, weight, height, photo FROM athletes ORDER BY id";
const UPDATE: &str =
    "UPDATE athletes SET name = ?, sex = ?, weight = ?, height = ?, photo = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM athletes WHERE id = ?";
const COUNT_PARTICIPATIONS: &str = "SELECT COUNT(*) FROM participations WHERE athlete_id = ?";

/// `SQLite`-backed athlete repository.
#[derive(Clone)]
pub struct SqliteAthleteRepository {
    pool: SqlitePool,
}

impl SqliteAthleteRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AthleteRepository for SqliteAthleteRepository {
    fn get_by_id(
        &self,
        id: AthleteId,
    ) -> impl Future<Output = Result<Option<Athlete>, OlympicsError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Athlete>, OlympicsError>> + Send {
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
        athlete: &Athlete,
    ) -> impl Future<Output = Result<AthleteId, OlympicsError>> + Send {
        let pool = self.pool.clone();
        let athlete = athlete.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(&athlete.name)
                .bind(athlete.sex.as_str())
                .bind(athlete.weight)
                .bind(athlete.height)
                .bind(athlete.photo.as_ref().map(Photo::as_bytes))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(AthleteId::new(inserted_id(&result, "Athlete")?))
        }
    }

    fn update(
        &self,
        current: &Athlete,
        replacement: &Athlete,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send {
        let pool = self.pool.clone();
        let id = current.id;
        let replacement = replacement.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&replacement.name)
                .bind(replacement.sex.as_str())
                .bind(replacement.weight)
                .bind(replacement.height)
                .bind(replacement.photo.as_ref().map(Photo::as_bytes))
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            ensure_affected(&result, "Athlete", id)
        }
    }

    fn delete(&self, athlete: &Athlete) -> impl Future<Output = Result<(), OlympicsError>> + Send {
        let pool = self.pool.clone();
        let id = athlete.id;
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            ensure_affected(&result, "Athlete", id)
        }
    }

    fn is_deletable(
        &self,
        athlete: &Athlete,
    ) -> impl Future<Output = Result<bool, OlympicsError>> + Send {
        let pool = self.pool.clone();
        let id = athlete.id;
        async move { is_unreferenced(&pool, COUNT_PARTICIPATIONS, id.get()).await }
    }
}
