//! `SQLite` implementation of [`EventRepository`].
//!
//! Rows store the olympiad and sport ids only. Reads resolve both through
//! the olympiad and sport repositories after the row itself has been
//! fetched, so no connection is held while the references are looked up.

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use olympics_app::ports::{EventRepository, OlympiadRepository, SportRepository};
use olympics_domain::error::OlympicsError;
use olympics_domain::event::Event;
use olympics_domain::id::{EventId, OlympiadId, SportId};

use crate::error::StorageError;
use crate::guard::{ensure_affected, inserted_id, is_unreferenced};
use crate::olympiad_repo::SqliteOlympiadRepository;
use crate::resolve::required;
use crate::sport_repo::SqliteSportRepository;

/// An `events` row before its references are resolved.
struct EventRow {
    id: EventId,
    name: String,
    olympiad_id: OlympiadId,
    sport_id: SportId,
}

impl<'r> FromRow<'r, SqliteRow> for EventRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: EventId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            olympiad_id: OlympiadId::new(row.try_get("olympiad_id")?),
            sport_id: SportId::new(row.try_get("sport_id")?),
        })
    }
}

const INSERT: &str = "INSERT INTO events (name, olympiad_id, sport_id) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT id, name, olympiad_id, sport_id FROM events WHERE id = ?";
const SELECT_ALL: &str = "SELECT id, name, olympiad_id, sport_id FROM events ORDER BY id";
const UPDATE: &str = "UPDATE events SET name = ?, olympiad_id = ?, sport_id = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM events WHERE id = ?";
const COUNT_PARTICIPATIONS: &str = "SELECT COUNT(*) FROM participations WHERE event_id = ?";

/// `SQLite`-backed event repository.
#[derive(Clone)]
pub struct SqliteEventRepository {
    pool: SqlitePool,
    olympiads: SqliteOlympiadRepository,
    sports: SqliteSportRepository,
}

impl SqliteEventRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            olympiads: SqliteOlympiadRepository::new(pool.clone()),
            sports: SqliteSportRepository::new(pool.clone()),
            pool,
        }
    }

    async fn resolve(&self, row: EventRow) -> Result<Event, OlympicsError> {
        let olympiad = self.olympiads.get_by_id(row.olympiad_id).await?;
        let olympiad = required(olympiad, "Event", row.id, "Olympiad", row.olympiad_id)?;
        let sport = self.sports.get_by_id(row.sport_id).await?;
        let sport = required(sport, "Event", row.id, "Sport", row.sport_id)?;

        Ok(Event {
            id: row.id,
            name: row.name,
            olympiad,
            sport,
        })
    }
}

impl EventRepository for SqliteEventRepository {
    fn get_by_id(
        &self,
        id: EventId,
    ) -> impl Future<Output = Result<Option<Event>, OlympicsError>> + Send {
        let this = self.clone();
        async move {
            let row: Option<EventRow> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.get())
                .fetch_optional(&this.pool)
                .await
                .map_err(StorageError::from)?;

            match row {
                Some(row) => this.resolve(row).await.map(Some),
                None => Ok(None),
            }
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Event>, OlympicsError>> + Send {
        let this = self.clone();
        async move {
            let rows: Vec<EventRow> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&this.pool)
                .await
                .map_err(StorageError::from)?;

            let mut events = Vec::with_capacity(rows.len());
            for row in rows {
                events.push(this.resolve(row).await?);
            }
            Ok(events)
        }
    }

    fn insert(&self, event: &Event) -> impl Future<Output = Result<EventId, OlympicsError>> + Send {
        let pool = self.pool.clone();
        let name = event.name.clone();
        let olympiad_id = event.olympiad.id;
        let sport_id = event.sport.id;
        async move {
            let result = sqlx::query(INSERT)
                .bind(name)
                .bind(olympiad_id.get())
                .bind(sport_id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(EventId::new(inserted_id(&result, "Event")?))
        }
    }

    fn update(
        &self,
        current: &Event,
        replacement: &Event,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send {
        let pool = self.pool.clone();
        let id = current.id;
        let name = replacement.name.clone();
        let olympiad_id = replacement.olympiad.id;
        let sport_id = replacement.sport.id;
        async move {
            let result = sqlx::query(UPDATE)
                .bind(name)
                .bind(olympiad_id.get())
                .bind(sport_id.get())
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            ensure_affected(&result, "Event", id)
        }
    }

    fn delete(&self, event: &Event) -> impl Future<Output = Result<(), OlympicsError>> + Send {
        let pool = self.pool.clone();
        let id = event.id;
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            ensure_affected(&result, "Event", id)
        }
    }

    fn is_deletable(
        &self,
        event: &Event,
    ) -> impl Future<Output = Result<bool, OlympicsError>> + Send {
        let pool = self.pool.clone();
        let id = event.id;
        async move { is_unreferenced(&pool, COUNT_PARTICIPATIONS, id.get()).await }
    }
}
