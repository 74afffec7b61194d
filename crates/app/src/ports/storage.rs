//! Storage port — repository traits for persistence.
//!
//! Every repository exposes the same shape: fetch by identity, fetch all,
//! insert, update, delete, and (except for participations) an integrity
//! guard. Update and delete address the row by the identity of `current`;
//! a mutation that matches zero rows yields [`OlympicsError::NotFound`].
//!
//! `delete` does not consult `is_deletable`. Callers that want the guard
//! (the application services do) must check it first.

use std::future::Future;

use olympics_domain::athlete::Athlete;
use olympics_domain::error::OlympicsError;
use olympics_domain::event::Event;
use olympics_domain::id::{AthleteId, EventId, OlympiadId, SportId, TeamId};
use olympics_domain::olympiad::Olympiad;
use olympics_domain::participation::{Participation, ParticipationKey};
use olympics_domain::sport::Sport;
use olympics_domain::team::Team;

/// Repository for persisting and querying [`Sport`]s.
pub trait SportRepository {
    /// Get a sport by its identifier.
    fn get_by_id(
        &self,
        id: SportId,
    ) -> impl Future<Output = Result<Option<Sport>, OlympicsError>> + Send;

    /// Get all sports in store order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Sport>, OlympicsError>> + Send;

    /// Insert a sport and return the identifier assigned by the store.
    fn insert(&self, sport: &Sport) -> impl Future<Output = Result<SportId, OlympicsError>> + Send;

    /// Overwrite the row of `current` with the fields of `replacement`.
    fn update(
        &self,
        current: &Sport,
        replacement: &Sport,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send;

    /// Delete the row of `sport`.
    fn delete(&self, sport: &Sport) -> impl Future<Output = Result<(), OlympicsError>> + Send;

    /// Whether no event references `sport`.
    fn is_deletable(&self, sport: &Sport)
    -> impl Future<Output = Result<bool, OlympicsError>> + Send;
}

/// Repository for persisting and querying [`Team`]s.
pub trait TeamRepository {
    fn get_by_id(
        &self,
        id: TeamId,
    ) -> impl Future<Output = Result<Option<Team>, OlympicsError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Team>, OlympicsError>> + Send;

    fn insert(&self, team: &Team) -> impl Future<Output = Result<TeamId, OlympicsError>> + Send;

    fn update(
        &self,
        current: &Team,
        replacement: &Team,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send;

    fn delete(&self, team: &Team) -> impl Future<Output = Result<(), OlympicsError>> + Send;

    /// Whether no participation references `team`.
    fn is_deletable(&self, team: &Team) -> impl Future<Output = Result<bool, OlympicsError>> + Send;
}

/// Repository for persisting and querying [`Olympiad`]s.
pub trait OlympiadRepository {
    fn get_by_id(
        &self,
        id: OlympiadId,
    ) -> impl Future<Output = Result<Option<Olympiad>, OlympicsError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Olympiad>, OlympicsError>> + Send;

    fn insert(
        &self,
        olympiad: &Olympiad,
    ) -> impl Future<Output = Result<OlympiadId, OlympicsError>> + Send;

    fn update(
        &self,
        current: &Olympiad,
        replacement: &Olympiad,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send;

    fn delete(&self, olympiad: &Olympiad)
    -> impl Future<Output = Result<(), OlympicsError>> + Send;

    /// Whether no event references `olympiad`.
    fn is_deletable(
        &self,
        olympiad: &Olympiad,
    ) -> impl Future<Output = Result<bool, OlympicsError>> + Send;
}

/// Repository for persisting and querying [`Athlete`]s.
///
/// Photos are written and read verbatim; no size limit applies here.
pub trait AthleteRepository {
    fn get_by_id(
        &self,
        id: AthleteId,
    ) -> impl Future<Output = Result<Option<Athlete>, OlympicsError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Athlete>, OlympicsError>> + Send;

    fn insert(
        &self,
        athlete: &Athlete,
    ) -> impl Future<Output = Result<AthleteId, OlympicsError>> + Send;

    fn update(
        &self,
        current: &Athlete,
        replacement: &Athlete,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send;

    fn delete(&self, athlete: &Athlete) -> impl Future<Output = Result<(), OlympicsError>> + Send;

    /// Whether no participation references `athlete`.
    fn is_deletable(
        &self,
        athlete: &Athlete,
    ) -> impl Future<Output = Result<bool, OlympicsError>> + Send;
}

/// Repository for persisting and querying [`Event`]s.
///
/// Reads resolve the olympiad and sport eagerly. A stored id that does not
/// resolve yields [`OlympicsError::Resolution`]. Writes store only the ids
/// of the nested records.
pub trait EventRepository {
    fn get_by_id(
        &self,
        id: EventId,
    ) -> impl Future<Output = Result<Option<Event>, OlympicsError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Event>, OlympicsError>> + Send;

    fn insert(&self, event: &Event) -> impl Future<Output = Result<EventId, OlympicsError>> + Send;

    fn update(
        &self,
        current: &Event,
        replacement: &Event,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send;

    fn delete(&self, event: &Event) -> impl Future<Output = Result<(), OlympicsError>> + Send;

    /// Whether no participation references `event`.
    fn is_deletable(&self, event: &Event)
    -> impl Future<Output = Result<bool, OlympicsError>> + Send;
}

/// Repository for persisting and querying [`Participation`]s.
///
/// Rows are addressed by [`ParticipationKey`]. Participations have no
/// dependents, so there is no integrity guard.
pub trait ParticipationRepository {
    /// Get the participation stored under `key`, fully resolved.
    fn get_by_key(
        &self,
        key: ParticipationKey,
    ) -> impl Future<Output = Result<Option<Participation>, OlympicsError>> + Send;

    /// Get all participations. Fails as a whole if any row does not resolve.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Participation>, OlympicsError>> + Send;

    /// Insert a participation. A duplicate key is rejected by the store.
    fn insert(
        &self,
        participation: &Participation,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send;

    /// Rewrite all five columns of the row keyed by `current`.
    ///
    /// The athlete and event of `replacement` are written too, so this may
    /// move the row to a new key.
    fn update(
        &self,
        current: &Participation,
        replacement: &Participation,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send;

    fn delete(
        &self,
        participation: &Participation,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send;
}
