//! # olympicsd — olympics registry daemon
//!
//! Composition root that prepares the database and wires repositories into
//! the application services.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise `tracing-subscriber` from the configured filter
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Report what the store currently holds
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It only wires crates together and holds no domain logic.

mod config;

use olympics_adapter_storage_sqlite_sqlx::{
    SqliteAthleteRepository, SqliteEventRepository, SqliteOlympiadRepository,
    SqliteParticipationRepository, SqliteSportRepository, SqliteTeamRepository,
};
use olympics_app::services::athlete_service::AthleteService;
use olympics_app::services::event_service::EventService;
use olympics_app::services::olympiad_service::OlympiadService;
use olympics_app::services::participation_service::ParticipationService;
use olympics_app::services::sport_service::SportService;
use olympics_app::services::team_service::TeamService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Database
    let db = config.storage().build().await?;
    let pool = db.pool().clone();
    tracing::info!(url = %config.database.url, "database migrated");

    // Services
    let sports = SportService::new(SqliteSportRepository::new(pool.clone()));
    let teams = TeamService::new(SqliteTeamRepository::new(pool.clone()));
    let olympiads = OlympiadService::new(SqliteOlympiadRepository::new(pool.clone()));
    let athletes = AthleteService::new(SqliteAthleteRepository::new(pool.clone()));
    let events = EventService::new(SqliteEventRepository::new(pool.clone()));
    let participations = ParticipationService::new(SqliteParticipationRepository::new(pool));

    tracing::info!(
        sports = sports.list_sports().await?.len(),
        teams = teams.list_teams().await?.len(),
        olympiads = olympiads.list_olympiads().await?.len(),
        athletes = athletes.list_athletes().await?.len(),
        events = events.list_events().await?.len(),
        participations = participations.list_participations().await?.len(),
        "inventory"
    );

    Ok(())
}
