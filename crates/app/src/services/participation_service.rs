//! Participation service — use-cases for recording who competed where.
//!
//! Participations are addressed by [`ParticipationKey`] and have no
//! dependents, so deletes are never guarded.

use olympics_domain::error::OlympicsError;
use olympics_domain::participation::{Participation, ParticipationKey};

use super::not_found;
use crate::ports::ParticipationRepository;

/// Application service for participation operations.
pub struct ParticipationService<R> {
    repo: R,
}

impl<R: ParticipationRepository> ParticipationService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validate and record a participation.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] if the medal is malformed or a
    /// nested record is unsaved, [`OlympicsError::Integrity`] if the key is
    /// already taken or a reference is rejected, or a storage error.
    #[tracing::instrument(skip(self, participation), fields(key = %participation.key()))]
    pub async fn create_participation(
        &self,
        participation: Participation,
    ) -> Result<Participation, OlympicsError> {
        participation.validate()?;
        self.repo.insert(&participation).await?;
        Ok(participation)
    }

    /// Look up the participation stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::NotFound`] when nothing is stored under
    /// `key`, [`OlympicsError::Resolution`] if a reference is dangling, or a
    /// storage error from the repository.
    pub async fn get_participation(
        &self,
        key: ParticipationKey,
    ) -> Result<Participation, OlympicsError> {
        self.repo
            .get_by_key(key)
            .await?
            .ok_or_else(|| not_found("Participation", key))
    }

    /// List all participations, fully resolved.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Resolution`] if any row is dangling, or a
    /// storage error from the repository.
    pub async fn list_participations(&self) -> Result<Vec<Participation>, OlympicsError> {
        self.repo.get_all().await
    }

    /// Rewrite the participation stored under `current`'s key.
    ///
    /// The replacement may name a different athlete or event, which moves
    /// the row to a new key.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] if `replacement` is invalid,
    /// [`OlympicsError::NotFound`] if `current` no longer exists,
    /// [`OlympicsError::Integrity`] if the new key collides, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, current, replacement), fields(key = %current.key()))]
    pub async fn update_participation(
        &self,
        current: &Participation,
        replacement: Participation,
    ) -> Result<Participation, OlympicsError> {
        replacement.validate()?;
        self.repo.update(current, &replacement).await?;
        Ok(replacement)
    }

    /// # Errors
    ///
    /// Returns [`OlympicsError::NotFound`] if nothing is stored under the
    /// participation's key, or a storage error from the repository.
    #[tracing::instrument(skip(self, participation), fields(key = %participation.key()))]
    pub async fn delete_participation(
        &self,
        participation: &Participation,
    ) -> Result<(), OlympicsError> {
        self.repo.delete(participation).await
    }
}
