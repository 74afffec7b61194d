//! Olympiad service — use-cases for managing editions of the Games.

use olympics_domain::error::OlympicsError;
use olympics_domain::id::OlympiadId;
use olympics_domain::olympiad::Olympiad;

use super::{not_found, still_referenced};
use crate::ports::OlympiadRepository;

/// Application service for olympiad CRUD operations.
pub struct OlympiadService<R> {
    repo: R,
}

impl<R: OlympiadRepository> OlympiadService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validate and insert an olympiad, returning it with its new id.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] if the name or city is blank,
    /// or a storage error propagated from the repository.
    #[tracing::instrument(skip(self, olympiad), fields(olympiad_name = %olympiad.name, year = olympiad.year))]
    pub async fn create_olympiad(&self, mut olympiad: Olympiad) -> Result<Olympiad, OlympicsError> {
        olympiad.validate()?;
        olympiad.id = self.repo.insert(&olympiad).await?;
        Ok(olympiad)
    }

    /// # Errors
    ///
    /// Returns [`OlympicsError::NotFound`] when no olympiad with `id` exists.
    pub async fn get_olympiad(&self, id: OlympiadId) -> Result<Olympiad, OlympicsError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found("Olympiad", id))
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_olympiads(&self) -> Result<Vec<Olympiad>, OlympicsError> {
        self.repo.get_all().await
    }

    /// Overwrite `current` with the fields of `replacement`.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] if `replacement` is invalid,
    /// [`OlympicsError::NotFound`] if `current` no longer exists, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, current, replacement), fields(olympiad_id = %current.id))]
    pub async fn update_olympiad(
        &self,
        current: &Olympiad,
        mut replacement: Olympiad,
    ) -> Result<Olympiad, OlympicsError> {
        replacement.validate()?;
        self.repo.update(current, &replacement).await?;
        replacement.id = current.id;
        Ok(replacement)
    }

    /// Whether no event is held at `olympiad`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn can_delete_olympiad(&self, olympiad: &Olympiad) -> Result<bool, OlympicsError> {
        self.repo.is_deletable(olympiad).await
    }

    /// Delete an olympiad once no event references it.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Integrity`] when events still reference the
    /// olympiad, [`OlympicsError::NotFound`] if it no longer exists, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, olympiad), fields(olympiad_id = %olympiad.id))]
    pub async fn delete_olympiad(&self, olympiad: &Olympiad) -> Result<(), OlympicsError> {
        if !self.repo.is_deletable(olympiad).await? {
            return Err(still_referenced("Olympiad", olympiad.id, "events"));
        }
        self.repo.delete(olympiad).await
    }
}
