//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.
//!
//! Services play the part of the record assembler: they validate records
//! before handing them to a repository, and they consult the integrity guard
//! before deleting.

pub mod athlete_service;
pub mod event_service;
pub mod olympiad_service;
pub mod participation_service;
pub mod sport_service;
pub mod team_service;

#[cfg(test)]
pub(crate) mod in_memory;

use olympics_domain::error::{IntegrityError, NotFoundError, OlympicsError};

fn not_found(entity: &'static str, id: impl ToString) -> OlympicsError {
    NotFoundError {
        entity,
        id: id.to_string(),
    }
    .into()
}

fn still_referenced(
    entity: &'static str,
    id: impl ToString,
    dependents: &'static str,
) -> OlympicsError {
    let id = id.to_string();
    tracing::debug!(entity, %id, dependents, "refusing to delete referenced record");
    IntegrityError::HasDependents {
        entity,
        id,
        dependents,
    }
    .into()
}
