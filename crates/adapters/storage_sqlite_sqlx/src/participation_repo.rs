//! `SQLite` implementation of [`ParticipationRepository`].
//!
//! Rows are keyed by `(athlete_id, event_id)` and resolved into full
//! athlete, event and team records on read.

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use olympics_app::ports::{
    AthleteRepository, EventRepository, ParticipationRepository, TeamRepository,
};
use olympics_domain::error::OlympicsError;
use olympics_domain::id::{AthleteId, EventId, TeamId};
use olympics_domain::participation::{Participation, ParticipationKey};

use crate::athlete_repo::SqliteAthleteRepository;
use crate::error::StorageError;
use crate::event_repo::SqliteEventRepository;
use crate::guard::{ensure_affected, inserted_id};
use crate::resolve::required;
use crate::team_repo::SqliteTeamRepository;

struct ParticipationRow {
    key: ParticipationKey,
    team_id: TeamId,
    age: u32,
    medal: String,
}

impl<'r> FromRow<'r, SqliteRow> for ParticipationRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            key: ParticipationKey::new(
                AthleteId::new(row.try_get("athlete_id")?),
                EventId::new(row.try_get("event_id")?),
            ),
            team_id: TeamId::new(row.try_get("team_id")?),
            age: row.try_get("age")?,
            medal: row.try_get("medal")?,
        })
    }
}

const INSERT: &str = "INSERT INTO participations (athlete_id, event_id, team_id, age, medal) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_KEY: &str = "SELECT athlete_id, event_id, team_id, age, medal FROM participations WHERE athlete_id = ? AND event_id = ?";
const SELECT_ALL: &str = "SELECT athlete_id, event_id, team_id, age, medal FROM participations ORDER BY athlete_id, event_id";
const UPDATE: &str = "UPDATE participations SET athlete_id = ?, event_id = ?, team_id = ?, age = ?, medal = ? WHERE athlete_id = ? AND event_id = ?";
const DELETE_BY_KEY: &str = "DELETE FROM participations WHERE athlete_id = ? AND event_id = ?";

/// `SQLite`-backed participation repository.
#[derive(Clone)]
pub struct SqliteParticipationRepository {
    pool: SqlitePool,
    athletes: SqliteAthleteRepository,
    events: SqliteEventRepository,
    teams: SqliteTeamRepository,
}

impl SqliteParticipationRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            athletes: SqliteAthleteRepository::new(pool.clone()),
            events: SqliteEventRepository::new(pool.clone()),
            teams: SqliteTeamRepository::new(pool.clone()),
            pool,
        }
    }

    async fn resolve(&self, row: ParticipationRow) -> Result<Participation, OlympicsError> {
        let key = row.key;
        let athlete = self.athletes.get_by_id(key.athlete_id).await?;
        let athlete = required(athlete, "Participation", key, "Athlete", key.athlete_id)?;
        let event = self.events.get_by_id(key.event_id).await?;
        let event = required(event, "Participation", key, "Event", key.event_id)?;
        let team = self.teams.get_by_id(row.team_id).await?;
        let team = required(team, "Participation", key, "Team", row.team_id)?;

        Ok(Participation {
            athlete,
            event,
            team,
            age: row.age,
            medal: row.medal,
        })
    }
}

impl ParticipationRepository for SqliteParticipationRepository {
    fn get_by_key(
        &self,
        key: ParticipationKey,
    ) -> impl Future<Output = Result<Option<Participation>, OlympicsError>> + Send {
        let this = self.clone();
        async move {
            let row: Option<ParticipationRow> = sqlx::query_as(SELECT_BY_KEY)
                .bind(key.athlete_id.get())
                .bind(key.event_id.get())
                .fetch_optional(&this.pool)
                .await
                .map_err(StorageError::from)?;

            match row {
                Some(row) => this.resolve(row).await.map(Some),
                None => Ok(None),
            }
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Participation>, OlympicsError>> + Send {
        let this = self.clone();
        async move {
            let rows: Vec<ParticipationRow> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&this.pool)
                .await
                .map_err(StorageError::from)?;

            let mut participations = Vec::with_capacity(rows.len());
            for row in rows {
                participations.push(this.resolve(row).await?);
            }
            Ok(participations)
        }
    }

    fn insert(
        &self,
        participation: &Participation,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send {
        let pool = self.pool.clone();
        let key = participation.key();
        let team_id = participation.team.id;
        let age = participation.age;
        let medal = participation.medal.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(key.athlete_id.get())
                .bind(key.event_id.get())
                .bind(team_id.get())
                .bind(age)
                .bind(medal)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            inserted_id(&result, "Participation").map(|_| ())
        }
    }

    fn update(
        &self,
        current: &Participation,
        replacement: &Participation,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send {
        let pool = self.pool.clone();
        let key = current.key();
        let new_key = replacement.key();
        let team_id = replacement.team.id;
        let age = replacement.age;
        let medal = replacement.medal.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(new_key.athlete_id.get())
                .bind(new_key.event_id.get())
                .bind(team_id.get())
                .bind(age)
                .bind(medal)
                .bind(key.athlete_id.get())
                .bind(key.event_id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            ensure_affected(&result, "Participation", key)
        }
    }

    fn delete(
        &self,
        participation: &Participation,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send {
        let pool = self.pool.clone();
        let key = participation.key();
        async move {
            let result = sqlx::query(DELETE_BY_KEY)
                .bind(key.athlete_id.get())
                .bind(key.event_id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            ensure_affected(&result, "Participation", key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::olympiad_repo::SqliteOlympiadRepository;
    use crate::pool::memory;
    use crate::sport_repo::SqliteSportRepository;
    use olympics_app::ports::{OlympiadRepository, SportRepository};
    use olympics_domain::athlete::{Athlete, Sex};
    use olympics_domain::error::{IntegrityError, ResolutionError};
    use olympics_domain::event::Event;
    use olympics_domain::olympiad::Olympiad;
    use olympics_domain::sport::Sport;
    use olympics_domain::team::Team;

    struct Fixture {
        repo: SqliteParticipationRepository,
        athlete: Athlete,
        event: Event,
        team: Team,
    }

    async fn setup() -> Fixture {
        let pool = memory().await.pool().clone();
        let sports = SqliteSportRepository::new(pool.clone());
        let olympiads = SqliteOlympiadRepository::new(pool.clone());
        let repo = SqliteParticipationRepository::new(pool);

        let mut sport = Sport::builder().name("Athletics").build().unwrap();
        sport.id = sports.insert(&sport).await.unwrap();
        let mut olympiad = Olympiad::builder()
            .name("London 2012")
            .year(2012)
            .city("London")
            .build()
            .unwrap();
        olympiad.id = olympiads.insert(&olympiad).await.unwrap();
        let mut event = Event::builder()
            .name("100m")
            .olympiad(olympiad)
            .sport(sport)
            .build()
            .unwrap();
        event.id = repo.events.insert(&event).await.unwrap();
        let mut athlete = Athlete::builder()
            .name("Usain Bolt")
            .sex(Sex::Male)
            .weight(94)
            .height(195)
            .build()
            .unwrap();
        athlete.id = repo.athletes.insert(&athlete).await.unwrap();
        let mut team = Team::builder().name("Jamaica").initials("JAM").build().unwrap();
        team.id = repo.teams.insert(&team).await.unwrap();

        Fixture {
            repo,
            athlete,
            event,
            team,
        }
    }

    fn gold(fx: &Fixture) -> Participation {
        Participation::builder()
            .athlete(fx.athlete.clone())
            .event(fx.event.clone())
            .team(fx.team.clone())
            .age(25)
            .medal("Gold")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_resolve_every_reference_by_key() {
        let fx = setup().await;
        let participation = gold(&fx);
        fx.repo.insert(&participation).await.unwrap();

        let fetched = fx.repo.get_by_key(participation.key()).await.unwrap().unwrap();
        assert_eq!(fetched, participation);
        assert_eq!(fetched.event.olympiad, fx.event.olympiad);
    }

    #[tokio::test]
    async fn should_update_medal_without_moving_key() {
        let fx = setup().await;
        let current = gold(&fx);
        fx.repo.insert(&current).await.unwrap();

        let mut replacement = current.clone();
        replacement.medal = "Silver".to_string();
        fx.repo.update(&current, &replacement).await.unwrap();

        let all = fx.repo.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].medal, "Silver");
        assert_eq!(all[0].key(), current.key());
    }

    #[tokio::test]
    async fn should_move_row_when_update_changes_event() {
        let fx = setup().await;
        let current = gold(&fx);
        fx.repo.insert(&current).await.unwrap();
        let mut relay = fx.event.clone();
        relay.name = "4x100m Relay".to_string();
        relay.id = fx.repo.events.insert(&relay).await.unwrap();

        let mut replacement = current.clone();
        replacement.event = relay;
        fx.repo.update(&current, &replacement).await.unwrap();

        assert!(fx.repo.get_by_key(current.key()).await.unwrap().is_none());
        assert!(fx.repo.get_by_key(replacement.key()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn should_fail_insert_when_store_skips_the_row() {
        let fx = setup().await;
        sqlx::query(
            "CREATE TRIGGER skip_participations BEFORE INSERT ON participations BEGIN SELECT RAISE(IGNORE); END",
        )
        .execute(&fx.repo.pool)
        .await
        .unwrap();

        let participation = gold(&fx);
        let result = fx.repo.insert(&participation).await;
        assert!(matches!(result, Err(OlympicsError::Storage(_))));
        assert!(fx.repo.get_by_key(participation.key()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_reject_duplicate_composite_key() {
        let fx = setup().await;
        let participation = gold(&fx);
        fx.repo.insert(&participation).await.unwrap();

        let result = fx.repo.insert(&participation).await;
        assert!(matches!(
            result,
            Err(OlympicsError::Integrity(IntegrityError::Rejected(_)))
        ));
    }

    #[tokio::test]
    async fn should_guard_referenced_records() {
        let fx = setup().await;
        let participation = gold(&fx);
        fx.repo.insert(&participation).await.unwrap();

        assert!(!fx.repo.athletes.is_deletable(&fx.athlete).await.unwrap());
        assert!(!fx.repo.events.is_deletable(&fx.event).await.unwrap());
        assert!(!fx.repo.teams.is_deletable(&fx.team).await.unwrap());

        fx.repo.delete(&participation).await.unwrap();
        assert!(fx.repo.athletes.is_deletable(&fx.athlete).await.unwrap());
        assert!(fx.repo.events.is_deletable(&fx.event).await.unwrap());
        assert!(fx.repo.teams.is_deletable(&fx.team).await.unwrap());
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_twice() {
        let fx = setup().await;
        let participation = gold(&fx);
        fx.repo.insert(&participation).await.unwrap();

        fx.repo.delete(&participation).await.unwrap();
        let result = fx.repo.delete(&participation).await;
        assert!(matches!(result, Err(OlympicsError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_fail_with_resolution_error_when_team_is_missing() {
        let fx = setup().await;
        sqlx::query("PRAGMA foreign_keys = OFF")
            .execute(&fx.repo.pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO participations (athlete_id, event_id, team_id, age, medal) VALUES (?, ?, 555, 30, 'None')")
            .bind(fx.athlete.id.get())
            .bind(fx.event.id.get())
            .execute(&fx.repo.pool)
            .await
            .unwrap();

        let key = ParticipationKey::new(fx.athlete.id, fx.event.id);
        let result = fx.repo.get_by_key(key).await;
        assert!(matches!(
            result,
            Err(OlympicsError::Resolution(ResolutionError {
                reference: "Team",
                ..
            }))
        ));
    }
}
