//! Event — a competition held at an olympiad within a sport.
//!
//! An event owns fully-resolved copies of its olympiad and sport. Saving an
//! event only ever writes their ids; the nested records are never created or
//! modified as a side effect.

use serde::{Deserialize, Serialize};

use crate::error::{OlympicsError, ValidationError};
use crate::id::EventId;
use crate::named::Named;
use crate::olympiad::Olympiad;
use crate::sport::Sport;

/// A competition such as "100m Freestyle" at "Tokyo 2020".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub olympiad: Olympiad,
    pub sport: Sport,
}

impl Event {
    #[must_use]
    pub fn builder() -> EventBuilder {
        EventBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] when `name` is empty or either
    /// nested record has not been persisted.
    pub fn validate(&self) -> Result<(), OlympicsError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if !self.olympiad.id.is_persisted() {
            return Err(ValidationError::UnsavedReference { entity: "Olympiad" }.into());
        }
        if !self.sport.id.is_persisted() {
            return Err(ValidationError::UnsavedReference { entity: "Sport" }.into());
        }
        Ok(())
    }
}

impl Named for Event {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Step-by-step builder for [`Event`].
#[derive(Debug, Default)]
pub struct EventBuilder {
    id: Option<EventId>,
    name: Option<String>,
    olympiad: Option<Olympiad>,
    sport: Option<Sport>,
}

impl EventBuilder {
    #[must_use]
    pub fn id(mut self, id: EventId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn olympiad(mut self, olympiad: Olympiad) -> Self {
        self.olympiad = Some(olympiad);
        self
    }

    #[must_use]
    pub fn sport(mut self, sport: Sport) -> Self {
        self.sport = Some(sport);
        self
    }

    /// Consume the builder, validate, and return an [`Event`].
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] if the olympiad or sport is
    /// missing or a field breaks an invariant.
    pub fn build(self) -> Result<Event, OlympicsError> {
        let olympiad = self
            .olympiad
            .ok_or(ValidationError::MissingReference { entity: "Olympiad" })?;
        let sport = self
            .sport
            .ok_or(ValidationError::MissingReference { entity: "Sport" })?;
        let event = Event {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            olympiad,
            sport,
        };
        event.validate()?;
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{OlympiadId, SportId};
    use crate::olympiad::Season;

    fn tokyo() -> Olympiad {
        Olympiad::builder()
            .id(OlympiadId::new(1))
            .name("Tokyo 2020")
            .year(2020)
            .season(Season::Summer)
            .city("Tokyo")
            .build()
            .unwrap()
    }

    fn swimming() -> Sport {
        Sport::builder()
            .id(SportId::new(1))
            .name("Swimming")
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_event_when_references_are_saved() {
        let event = Event::builder()
            .name("100m Freestyle")
            .olympiad(tokyo())
            .sport(swimming())
            .build()
            .unwrap();
        assert_eq!(event.olympiad.id, OlympiadId::new(1));
        assert_eq!(event.sport.name, "Swimming");
    }

    #[test]
    fn should_reject_event_without_sport() {
        let result = Event::builder().name("100m").olympiad(tokyo()).build();
        assert!(matches!(
            result,
            Err(OlympicsError::Validation(ValidationError::MissingReference {
                entity: "Sport"
            }))
        ));
    }

    #[test]
    fn should_reject_event_referencing_unsaved_olympiad() {
        let mut olympiad = tokyo();
        olympiad.id = OlympiadId::UNSAVED;
        let result = Event::builder()
            .name("100m")
            .olympiad(olympiad)
            .sport(swimming())
            .build();
        assert!(matches!(
            result,
            Err(OlympicsError::Validation(ValidationError::UnsavedReference {
                entity: "Olympiad"
            }))
        ));
    }
}
