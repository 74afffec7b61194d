//! Event service — use-cases for managing events.
//!
//! An event is only ever written with the ids of its olympiad and sport;
//! both must already be persisted.

use olympics_domain::error::OlympicsError;
use olympics_domain::event::Event;
use olympics_domain::id::EventId;

use super::{not_found, still_referenced};
use crate::filter;
use crate::ports::EventRepository;

/// Application service for event operations.
pub struct EventService<R> {
    repo: R,
}

impl<R: EventRepository> EventService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validate and insert an event, returning it with its new id.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] if the name is blank or a
    /// nested record is unsaved, [`OlympicsError::Integrity`] if the store
    /// rejects a foreign key, or a storage error.
    #[tracing::instrument(
        skip(self, event),
        fields(event_name = %event.name, olympiad_id = %event.olympiad.id, sport_id = %event.sport.id)
    )]
    pub async fn create_event(&self, mut event: Event) -> Result<Event, OlympicsError> {
        event.validate()?;
        event.id = self.repo.insert(&event).await?;
        Ok(event)
    }

    /// Look up an event by id, with its olympiad and sport resolved.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::NotFound`] when no event with `id` exists,
    /// [`OlympicsError::Resolution`] if a stored reference is dangling, or a
    /// storage error from the repository.
    pub async fn get_event(&self, id: EventId) -> Result<Event, OlympicsError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found("Event", id))
    }

    /// List all events, fully resolved.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Resolution`] if any row is dangling, or a
    /// storage error from the repository.
    pub async fn list_events(&self) -> Result<Vec<Event>, OlympicsError> {
        self.repo.get_all().await
    }

    /// Events whose name contains `query`, ignoring case.
    ///
    /// # Errors
    ///
    /// Same as [`list_events`](Self::list_events).
    pub async fn search_events(&self, query: &str) -> Result<Vec<Event>, OlympicsError> {
        let snapshot = self.repo.get_all().await?;
        Ok(filter::by_name(&snapshot, query))
    }

    /// Overwrite `current` with the fields of `replacement`.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] if `replacement` is invalid,
    /// [`OlympicsError::NotFound`] if `current` no longer exists, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, current, replacement), fields(event_id = %current.id))]
    pub async fn update_event(
        &self,
        current: &Event,
        mut replacement: Event,
    ) -> Result<Event, OlympicsError> {
        replacement.validate()?;
        self.repo.update(current, &replacement).await?;
        replacement.id = current.id;
        Ok(replacement)
    }

    /// Whether no participation references `event`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn can_delete_event(&self, event: &Event) -> Result<bool, OlympicsError> {
        self.repo.is_deletable(event).await
    }

    /// Delete an event once no participation references it.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Integrity`] when participations still
    /// reference the event, [`OlympicsError::NotFound`] if it no longer
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self, event), fields(event_id = %event.id))]
    pub async fn delete_event(&self, event: &Event) -> Result<(), OlympicsError> {
        if !self.repo.is_deletable(event).await? {
            return Err(still_referenced("Event", event.id, "participations"));
        }
        self.repo.delete(event).await
    }
}
