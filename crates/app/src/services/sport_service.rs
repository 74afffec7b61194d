//! Sport service — use-cases for managing sports.

use olympics_domain::error::OlympicsError;
use olympics_domain::id::SportId;
use olympics_domain::sport::Sport;

use super::{not_found, still_referenced};
use crate::ports::SportRepository;

/// Application service for sport CRUD operations.
pub struct SportService<R> {
    repo: R,
}

impl<R: SportRepository> SportService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validate and insert a sport, returning it with its new id.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, sport), fields(sport_name = %sport.name))]
    pub async fn create_sport(&self, mut sport: Sport) -> Result<Sport, OlympicsError> {
        sport.validate()?;
        sport.id = self.repo.insert(&sport).await?;
        Ok(sport)
    }

    /// Look up a sport by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::NotFound`] when no sport with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_sport(&self, id: SportId) -> Result<Sport, OlympicsError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found("Sport", id))
    }

    /// List all sports.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_sports(&self) -> Result<Vec<Sport>, OlympicsError> {
        self.repo.get_all().await
    }

    /// Overwrite `current` with the fields of `replacement`.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] if `replacement` is invalid,
    /// [`OlympicsError::NotFound`] if `current` no longer exists, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, current, replacement), fields(sport_id = %current.id))]
    pub async fn update_sport(
        &self,
        current: &Sport,
        mut replacement: Sport,
    ) -> Result<Sport, OlympicsError> {
        replacement.validate()?;
        self.repo.update(current, &replacement).await?;
        replacement.id = current.id;
        Ok(replacement)
    }

    /// Whether `sport` can be deleted without orphaning events.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn can_delete_sport(&self, sport: &Sport) -> Result<bool, OlympicsError> {
        self.repo.is_deletable(sport).await
    }

    /// Delete a sport once the integrity guard allows it.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Integrity`] when events still reference the
    /// sport, [`OlympicsError::NotFound`] if it no longer exists, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, sport), fields(sport_id = %sport.id))]
    pub async fn delete_sport(&self, sport: &Sport) -> Result<(), OlympicsError> {
        if !self.repo.is_deletable(sport).await? {
            return Err(still_referenced("Sport", sport.id, "events"));
        }
        self.repo.delete(sport).await
    }
}
