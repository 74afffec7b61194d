//! # olympics-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `olympics-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows, resolving the records
//!   that events and participations reference
//!
//! ## Dependency rule
//! Depends on `olympics-app` (for port traits) and `olympics-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod guard;
mod resolve;

pub mod athlete_repo;
pub mod event_repo;
pub mod olympiad_repo;
pub mod participation_repo;
pub mod pool;
pub mod sport_repo;
pub mod team_repo;

pub use athlete_repo::SqliteAthleteRepository;
pub use error::StorageError;
pub use event_repo::SqliteEventRepository;
pub use olympiad_repo::SqliteOlympiadRepository;
pub use participation_repo::SqliteParticipationRepository;
pub use pool::{Config, Database};
pub use sport_repo::SqliteSportRepository;
pub use team_repo::SqliteTeamRepository;
