//! In-memory store implementing every repository port, for service tests.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use olympics_domain::athlete::{Athlete, Sex};
use olympics_domain::error::{IntegrityError, NotFoundError, OlympicsError};
use olympics_domain::event::Event;
use olympics_domain::id::{AthleteId, EventId, OlympiadId, SportId, TeamId};
use olympics_domain::olympiad::Olympiad;
use olympics_domain::participation::{Participation, ParticipationKey};
use olympics_domain::sport::Sport;
use olympics_domain::team::Team;

use crate::ports::{
    AthleteRepository, EventRepository, OlympiadRepository, ParticipationRepository,
    SportRepository, TeamRepository,
};

#[derive(Default)]
struct State {
    next_id: i64,
    sports: BTreeMap<SportId, Sport>,
    teams: BTreeMap<TeamId, Team>,
    olympiads: BTreeMap<OlympiadId, Olympiad>,
    athletes: BTreeMap<AthleteId, Athlete>,
    events: BTreeMap<EventId, Event>,
    participations: Vec<Participation>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared fake store. Clones see the same data.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }
}

fn missing(entity: &'static str, id: impl ToString) -> OlympicsError {
    NotFoundError {
        entity,
        id: id.to_string(),
    }
    .into()
}

fn duplicate(key: ParticipationKey) -> OlympicsError {
    IntegrityError::Rejected(format!("duplicate participation {key}").into()).into()
}

macro_rules! impl_simple_repo {
    ($trait:ident, $record:ident, $id:ident, $field:ident, $entity:literal, |$state:ident, $rec:ident| $deps:expr) => {
        impl $trait for InMemoryStore {
            fn get_by_id(
                &self,
                id: $id,
            ) -> impl Future<Output = Result<Option<$record>, OlympicsError>> + Send {
                let result = self.lock().$field.get(&id).cloned();
                async move { Ok(result) }
            }

            fn get_all(&self) -> impl Future<Output = Result<Vec<$record>, OlympicsError>> + Send {
                let result: Vec<$record> = self.lock().$field.values().cloned().collect();
                async move { Ok(result) }
            }

            fn insert(
                &self,
                record: &$record,
            ) -> impl Future<Output = Result<$id, OlympicsError>> + Send {
                let mut state = self.lock();
                let id = $id::new(state.next_id());
                let mut stored = record.clone();
                stored.id = id;
                state.$field.insert(id, stored);
                async move { Ok(id) }
            }

            fn update(
                &self,
                current: &$record,
                replacement: &$record,
            ) -> impl Future<Output = Result<(), OlympicsError>> + Send {
                let mut state = self.lock();
                let result = match state.$field.get_mut(&current.id) {
                    Some(slot) => {
                        *slot = replacement.clone();
                        slot.id = current.id;
                        Ok(())
                    }
                    None => Err(missing($entity, current.id)),
                };
                async move { result }
            }

            fn delete(
                &self,
                record: &$record,
            ) -> impl Future<Output = Result<(), OlympicsError>> + Send {
                let result = match self.lock().$field.remove(&record.id) {
                    Some(_) => Ok(()),
                    None => Err(missing($entity, record.id)),
                };
                async move { result }
            }

            fn is_deletable(
                &self,
                record: &$record,
            ) -> impl Future<Output = Result<bool, OlympicsError>> + Send {
                let $state = self.lock();
                let $rec = record;
                let count: usize = $deps;
                async move { Ok(count == 0) }
            }
        }
    };
}

impl_simple_repo!(SportRepository, Sport, SportId, sports, "Sport", |state, sport| {
    state.events.values().filter(|e| e.sport.id == sport.id).count()
});

impl_simple_repo!(TeamRepository, Team, TeamId, teams, "Team", |state, team| {
    state
        .participations
        .iter()
        .filter(|p| p.team.id == team.id)
        .count()
});

impl_simple_repo!(
    OlympiadRepository,
    Olympiad,
    OlympiadId,
    olympiads,
    "Olympiad",
    |state, olympiad| {
        state
            .events
            .values()
            .filter(|e| e.olympiad.id == olympiad.id)
            .count()
    }
);

impl_simple_repo!(
    AthleteRepository,
    Athlete,
    AthleteId,
    athletes,
    "Athlete",
    |state, athlete| {
        state
            .participations
            .iter()
            .filter(|p| p.athlete.id == athlete.id)
            .count()
    }
);

impl_simple_repo!(EventRepository, Event, EventId, events, "Event", |state, event| {
    state
        .participations
        .iter()
        .filter(|p| p.event.id == event.id)
        .count()
});

impl ParticipationRepository for InMemoryStore {
    fn get_by_key(
        &self,
        key: ParticipationKey,
    ) -> impl Future<Output = Result<Option<Participation>, OlympicsError>> + Send {
        let result = self
            .lock()
            .participations
            .iter()
            .find(|p| p.key() == key)
            .cloned();
        async move { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Participation>, OlympicsError>> + Send {
        let result = self.lock().participations.clone();
        async move { Ok(result) }
    }

    fn insert(
        &self,
        participation: &Participation,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send {
        let mut state = self.lock();
        let key = participation.key();
        let result = if state.participations.iter().any(|p| p.key() == key) {
            Err(duplicate(key))
        } else {
            state.participations.push(participation.clone());
            Ok(())
        };
        async move { result }
    }

    fn update(
        &self,
        current: &Participation,
        replacement: &Participation,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send {
        let mut state = self.lock();
        let key = current.key();
        let new_key = replacement.key();
        let collides = new_key != key && state.participations.iter().any(|p| p.key() == new_key);
        let result = match state.participations.iter_mut().find(|p| p.key() == key) {
            Some(_) if collides => Err(duplicate(new_key)),
            Some(slot) => {
                *slot = replacement.clone();
                Ok(())
            }
            None => Err(missing("Participation", key)),
        };
        async move { result }
    }

    fn delete(
        &self,
        participation: &Participation,
    ) -> impl Future<Output = Result<(), OlympicsError>> + Send {
        let mut state = self.lock();
        let key = participation.key();
        let before = state.participations.len();
        state.participations.retain(|p| p.key() != key);
        let result = if state.participations.len() < before {
            Ok(())
        } else {
            Err(missing("Participation", key))
        };
        async move { result }
    }
}

/// Insert a sport, an olympiad and an event linking them.
pub async fn seed_event(store: &InMemoryStore) -> Event {
    let mut sport = Sport::builder().name("Swimming").build().unwrap();
    sport.id = SportRepository::insert(store, &sport).await.unwrap();
    let mut olympiad = Olympiad::builder()
        .name("Tokyo 2020")
        .year(2020)
        .city("Tokyo")
        .build()
        .unwrap();
    olympiad.id = OlympiadRepository::insert(store, &olympiad).await.unwrap();
    let mut event = Event::builder()
        .name("100m Freestyle")
        .olympiad(olympiad)
        .sport(sport)
        .build()
        .unwrap();
    event.id = EventRepository::insert(store, &event).await.unwrap();
    event
}

/// Insert an athlete, a team and a seeded event, then a participation
/// joining them.
pub async fn seed_participation(store: &InMemoryStore) -> Participation {
    let event = seed_event(store).await;
    let mut athlete = Athlete::builder()
        .name("Mireia Belmonte")
        .sex(Sex::Female)
        .weight(62)
        .height(172)
        .build()
        .unwrap();
    athlete.id = AthleteRepository::insert(store, &athlete).await.unwrap();
    let mut team = Team::builder().name("Spain").initials("ESP").build().unwrap();
    team.id = TeamRepository::insert(store, &team).await.unwrap();
    let participation = Participation::builder()
        .athlete(athlete)
        .event(event)
        .team(team)
        .age(23)
        .medal("Gold")
        .build()
        .unwrap();
    ParticipationRepository::insert(store, &participation)
        .await
        .unwrap();
    participation
}
