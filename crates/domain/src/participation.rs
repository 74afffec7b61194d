//! Participation — an athlete competing in an event for a team.
//!
//! A participation has no surrogate id. Its identity is the
//! [`ParticipationKey`] formed by the athlete id and the event id.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::athlete::Athlete;
use crate::error::{OlympicsError, ValidationError};
use crate::event::Event;
use crate::id::{AthleteId, EventId};
use crate::team::Team;

/// Longest accepted medal label, e.g. `Bronze`.
pub const MAX_MEDAL_LEN: usize = 6;

/// Composite identity of a [`Participation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipationKey {
    pub athlete_id: AthleteId,
    pub event_id: EventId,
}

impl ParticipationKey {
    #[must_use]
    pub fn new(athlete_id: AthleteId, event_id: EventId) -> Self {
        Self {
            athlete_id,
            event_id,
        }
    }
}

impl fmt::Display for ParticipationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.athlete_id, self.event_id)
    }
}

/// An athlete's entry in an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participation {
    pub athlete: Athlete,
    pub event: Event,
    pub team: Team,
    pub age: u32,
    pub medal: String,
}

impl Participation {
    #[must_use]
    pub fn builder() -> ParticipationBuilder {
        ParticipationBuilder::default()
    }

    /// The `(athlete, event)` pair addressing this row.
    #[must_use]
    pub fn key(&self) -> ParticipationKey {
        ParticipationKey::new(self.athlete.id, self.event.id)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] when the medal is empty or
    /// longer than [`MAX_MEDAL_LEN`] characters, or when a referenced record
    /// has not been persisted.
    pub fn validate(&self) -> Result<(), OlympicsError> {
        let len = self.medal.chars().count();
        if len == 0 || len > MAX_MEDAL_LEN {
            return Err(ValidationError::InvalidMedal { max: MAX_MEDAL_LEN }.into());
        }
        if !self.athlete.id.is_persisted() {
            return Err(ValidationError::UnsavedReference { entity: "Athlete" }.into());
        }
        if !self.event.id.is_persisted() {
            return Err(ValidationError::UnsavedReference { entity: "Event" }.into());
        }
        if !self.team.id.is_persisted() {
            return Err(ValidationError::UnsavedReference { entity: "Team" }.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Participation`].
#[derive(Debug, Default)]
pub struct ParticipationBuilder {
    athlete: Option<Athlete>,
    event: Option<Event>,
    team: Option<Team>,
    age: u32,
    medal: Option<String>,
}

impl ParticipationBuilder {
    #[must_use]
    pub fn athlete(mut self, athlete: Athlete) -> Self {
        self.athlete = Some(athlete);
        self
    }

    #[must_use]
    pub fn event(mut self, event: Event) -> Self {
        self.event = Some(event);
        self
    }

    #[must_use]
    pub fn team(mut self, team: Team) -> Self {
        self.team = Some(team);
        self
    }

    #[must_use]
    pub fn age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    #[must_use]
    pub fn medal(mut self, medal: impl Into<String>) -> Self {
        self.medal = Some(medal.into());
        self
    }

    /// Consume the builder, validate, and return a [`Participation`].
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] if a reference is missing or a
    /// field breaks an invariant.
    pub fn build(self) -> Result<Participation, OlympicsError> {
        let athlete = self
            .athlete
            .ok_or(ValidationError::MissingReference { entity: "Athlete" })?;
        let event = self
            .event
            .ok_or(ValidationError::MissingReference { entity: "Event" })?;
        let team = self
            .team
            .ok_or(ValidationError::MissingReference { entity: "Team" })?;
        let participation = Participation {
            athlete,
            event,
            team,
            age: self.age,
            medal: self.medal.unwrap_or_default(),
        };
        participation.validate()?;
        Ok(participation)
    }
}
