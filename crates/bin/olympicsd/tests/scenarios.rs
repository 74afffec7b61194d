//! End-to-end scenarios for the full olympics stack.
//!
//! Each test builds an in-memory `SQLite` database through the real
//! migrations and drives the real repositories and services.

use std::io::Write;

use olympics_adapter_storage_sqlite_sqlx::{
    Config, SqliteAthleteRepository, SqliteEventRepository, SqliteOlympiadRepository,
    SqliteParticipationRepository, SqliteSportRepository, SqliteTeamRepository,
};
use olympics_app::ports::{AthleteRepository, EventRepository, SportRepository};
use olympics_app::services::athlete_service::AthleteService;
use olympics_app::services::event_service::EventService;
use olympics_app::services::olympiad_service::OlympiadService;
use olympics_app::services::participation_service::ParticipationService;
use olympics_app::services::sport_service::SportService;
use olympics_app::services::team_service::TeamService;
use olympics_domain::athlete::{Athlete, MAX_PHOTO_BYTES, Photo, Sex};
use olympics_domain::error::{IntegrityError, OlympicsError, ValidationError};
use olympics_domain::event::Event;
use olympics_domain::id::{AthleteId, EventId, OlympiadId, SportId, TeamId};
use olympics_domain::olympiad::{Olympiad, Season};
use olympics_domain::participation::{Participation, ParticipationKey};
use olympics_domain::sport::Sport;
use olympics_domain::team::Team;
use sqlx::SqlitePool;

async fn pool() -> SqlitePool {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
    }
    .build()
    .await
    .expect("in-memory database should initialise");
    db.pool().clone()
}

struct Registry {
    sports: SportService<SqliteSportRepository>,
    teams: TeamService<SqliteTeamRepository>,
    olympiads: OlympiadService<SqliteOlympiadRepository>,
    athletes: AthleteService<SqliteAthleteRepository>,
    events: EventService<SqliteEventRepository>,
    participations: ParticipationService<SqliteParticipationRepository>,
}

impl Registry {
    fn new(pool: &SqlitePool) -> Self {
        Self {
            sports: SportService::new(SqliteSportRepository::new(pool.clone())),
            teams: TeamService::new(SqliteTeamRepository::new(pool.clone())),
            olympiads: OlympiadService::new(SqliteOlympiadRepository::new(pool.clone())),
            athletes: AthleteService::new(SqliteAthleteRepository::new(pool.clone())),
            events: EventService::new(SqliteEventRepository::new(pool.clone())),
            participations: ParticipationService::new(SqliteParticipationRepository::new(
                pool.clone(),
            )),
        }
    }

    async fn tokyo_freestyle(&self) -> Event {
        let sport = self
            .sports
            .create_sport(Sport::builder().name("Swimming").build().unwrap())
            .await
            .unwrap();
        let olympiad = self
            .olympiads
            .create_olympiad(
                Olympiad::builder()
                    .name("Tokyo 2020")
                    .year(2020)
                    .season(Season::Summer)
                    .city("Tokyo")
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap();
        self.events
            .create_event(
                Event::builder()
                    .name("100m Freestyle")
                    .olympiad(olympiad)
                    .sport(sport)
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn athlete(&self, name: &str) -> Athlete {
        self.athletes
            .create_athlete(
                Athlete::builder()
                    .name(name)
                    .sex(Sex::Female)
                    .weight(61)
                    .height(178)
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn team(&self, name: &str, initials: &str) -> Team {
        self.teams
            .create_team(Team::builder().name(name).initials(initials).build().unwrap())
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn should_assign_first_ids_and_flip_sport_guard_around_event() {
    let pool = pool().await;
    let registry = Registry::new(&pool);

    let event = registry.tokyo_freestyle().await;
    assert_eq!(event.sport.id, SportId::new(1));
    assert_eq!(event.olympiad.id, OlympiadId::new(1));
    assert_eq!(event.id, EventId::new(1));

    let sport = registry.sports.get_sport(SportId::new(1)).await.unwrap();
    assert!(!registry.sports.can_delete_sport(&sport).await.unwrap());

    assert!(registry.events.can_delete_event(&event).await.unwrap());
    registry.events.delete_event(&event).await.unwrap();
    assert!(registry.sports.can_delete_sport(&sport).await.unwrap());
}

#[tokio::test]
async fn should_refuse_guarded_delete_and_keep_rows() {
    let pool = pool().await;
    let registry = Registry::new(&pool);
    let event = registry.tokyo_freestyle().await;

    let result = registry.sports.delete_sport(&event.sport).await;
    assert!(matches!(
        result,
        Err(OlympicsError::Integrity(IntegrityError::HasDependents {
            entity: "Sport",
            dependents: "events",
            ..
        }))
    ));
    assert_eq!(registry.sports.list_sports().await.unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_oversized_photo_in_service_but_accept_it_in_repository() {
    let pool = pool().await;
    let registry = Registry::new(&pool);
    let mut athlete = Athlete::builder()
        .name("Katie Ledecky")
        .sex(Sex::Female)
        .weight(70)
        .height(183)
        .build()
        .unwrap();
    athlete.photo = Some(Photo::new(vec![0xAB; 70 * 1024]));

    let result = registry.athletes.create_athlete(athlete.clone()).await;
    assert!(matches!(
        result,
        Err(OlympicsError::Validation(
            ValidationError::PhotoTooLarge { .. }
        ))
    ));
    assert!(registry.athletes.list_athletes().await.unwrap().is_empty());

    let repo = SqliteAthleteRepository::new(pool.clone());
    let id = repo.insert(&athlete).await.unwrap();
    let stored = repo.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.photo.as_ref().map(Photo::len), Some(70 * 1024));
}

#[tokio::test]
async fn should_refuse_to_attach_photo_file_above_limit() {
    let pool = pool().await;
    let registry = Registry::new(&pool);
    let athlete = registry.athlete("Emma McKeon").await;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&vec![0; MAX_PHOTO_BYTES + 1]).unwrap();

    let result = registry.athletes.attach_photo(&athlete, file.path()).await;
    assert!(matches!(result, Err(OlympicsError::Validation(_))));

    let mut small = tempfile::NamedTempFile::new().unwrap();
    small.write_all(b"\x89PNG").unwrap();
    let updated = registry.athletes.attach_photo(&athlete, small.path()).await.unwrap();
    assert_eq!(updated.photo.as_ref().map(Photo::len), Some(4));
}

#[tokio::test]
async fn should_update_medal_and_keep_age() {
    let pool = pool().await;
    let registry = Registry::new(&pool);
    let event = registry.tokyo_freestyle().await;
    let athlete = registry.athlete("Ariarne Titmus").await;
    let team = registry.team("Australia", "AUS").await;
    assert_eq!(athlete.id, AthleteId::new(1));
    assert_eq!(team.id, TeamId::new(1));

    let current = registry
        .participations
        .create_participation(
            Participation::builder()
                .athlete(athlete)
                .event(event)
                .team(team)
                .age(23)
                .medal("Gold")
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    let mut replacement = current.clone();
    replacement.medal = "Silver".to_string();
    registry
        .participations
        .update_participation(&current, replacement)
        .await
        .unwrap();

    let key = ParticipationKey::new(AthleteId::new(1), EventId::new(1));
    let fetched = registry.participations.get_participation(key).await.unwrap();
    assert_eq!(fetched.medal, "Silver");
    assert_eq!(fetched.age, 23);
}

#[tokio::test]
async fn should_find_exactly_one_participation_per_pair() {
    let pool = pool().await;
    let registry = Registry::new(&pool);
    let event = registry.tokyo_freestyle().await;
    let team = registry.team("United States", "USA").await;
    let first = registry.athlete("Katie Ledecky").await;
    let second = registry.athlete("Regan Smith").await;

    for (athlete, medal) in [(first.clone(), "Gold"), (second, "Bronze")] {
        registry
            .participations
            .create_participation(
                Participation::builder()
                    .athlete(athlete)
                    .event(event.clone())
                    .team(team.clone())
                    .age(24)
                    .medal(medal)
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap();
    }

    let key = ParticipationKey::new(first.id, event.id);
    let all = registry.participations.list_participations().await.unwrap();
    assert_eq!(all.iter().filter(|p| p.key() == key).count(), 1);
    let fetched = registry.participations.get_participation(key).await.unwrap();
    assert_eq!(fetched.athlete, first);
    assert_eq!(fetched.medal, "Gold");
}

#[tokio::test]
async fn should_resolve_event_to_independently_fetched_records() {
    let pool = pool().await;
    let registry = Registry::new(&pool);
    let event = registry.tokyo_freestyle().await;

    let repo = SqliteEventRepository::new(pool.clone());
    let fetched = repo.get_by_id(event.id).await.unwrap().unwrap();
    let sport = SqliteSportRepository::new(pool.clone())
        .get_by_id(fetched.sport.id)
        .await
        .unwrap()
        .unwrap();
    let olympiad = registry
        .olympiads
        .get_olympiad(fetched.olympiad.id)
        .await
        .unwrap();
    assert_eq!(fetched.sport, sport);
    assert_eq!(fetched.olympiad, olympiad);
}

#[tokio::test]
async fn should_search_events_and_athletes_by_name() {
    let pool = pool().await;
    let registry = Registry::new(&pool);
    registry.tokyo_freestyle().await;
    registry.athlete("Katie Ledecky").await;
    registry.athlete("Ariarne Titmus").await;

    assert_eq!(registry.events.search_events("FREE").await.unwrap().len(), 1);
    let found = registry.athletes.search_athletes("tit").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Ariarne Titmus");
}
