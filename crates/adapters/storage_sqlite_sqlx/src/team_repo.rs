//! `SQLite` implementation of [`TeamRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use olympics_app::ports::TeamRepository;
use olympics_domain::error::OlympicsError;
use olympics_domain::id::TeamId;
use olympics_domain::team::Team;

use crate::error::StorageError;
use crate::guard::{ensure_affected, inserted_id, is_unreferenced};

/// Wrapper for converting database rows into domain [`Team`].
struct Wrapper(Team);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Team {
            id: TeamId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            initials: row.try_get("initials")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO teams (name, initials) VALUES (?, ?)";
const SELECT_BY_ID: &str = "SELECT id, name, initials FROM teams WHERE id = ?";
const SELECT_ALL: &str = "SELECT id, name, initials FROM teams ORDER BY id";
const UPDATE: &str = "UPDATE teams SET name = ?, initials = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM teams WHERE id = ?";
const COUNT_PARTICIPATIONS: &str = "SELECT COUNT(*) FROM participations WHERE team_id = ?";

/// `SQLite`-backed team repository.
#[derive(Clone)]
pub struct SqliteTeamRepository {
    pool: SqlitePool,
}

impl SqliteTeamRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl TeamRepository for SqliteTeamRepository {
    fn get_by_id(
        &self,
        id: TeamId,
    ) -> impl Future<Output = Result<Option<Team>, OlympicsError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Team>, OlympicsError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn insert(&self, team: &Team) -> impl Future<Output = Result<TeamId, OlympicsError>> + Send {
        let pool = self.pool.clone();
        let team = team.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(&team.name)
                .bind(&team.initials)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(TeamId::new(inserted_id(&result, "Team")?))
        }
    }

    fn update(
        &self,
        current: &Team,
        replacement: &Team,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send {
        let pool = self.pool.clone();
        let id = current.id;
        let replacement = replacement.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&replacement.name)
                .bind(&replacement.initials)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            ensure_affected(&result, "Team", id)
        }
    }

    fn delete(&self, team: &Team) -> impl Future<Output = Result<(), OlympicsError>> + Send {
        let pool = self.pool.clone();
        let id = team.id;
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            ensure_affected(&result, "Team", id)
        }
    }

    fn is_deletable(&self, team: &Team) -> impl Future<Output = Result<bool, OlympicsError>> + Send {
        let pool = self.pool.clone();
        let id = team.id;
        async move { is_unreferenced(&pool, COUNT_PARTICIPATIONS, id.get()).await }
    }
}
