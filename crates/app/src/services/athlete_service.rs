//! Athlete service — use-cases for managing athletes and their photos.

use std::path::Path;

use olympics_domain::athlete::{Athlete, MAX_PHOTO_BYTES};
use olympics_domain::error::OlympicsError;
use olympics_domain::id::AthleteId;

use super::{not_found, still_referenced};
use crate::filter;
use crate::photo::read_photo_within;
use crate::ports::AthleteRepository;

/// Application service for athlete operations.
pub struct AthleteService<R> {
    repo: R,
}

impl<R: AthleteRepository> AthleteService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validate and insert an athlete, returning it with its new id.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] if the name is blank or the
    /// photo exceeds [`MAX_PHOTO_BYTES`], or a storage error propagated
    /// from the repository.
    #[tracing::instrument(skip(self, athlete), fields(athlete_name = %athlete.name))]
    pub async fn create_athlete(&self, mut athlete: Athlete) -> Result<Athlete, OlympicsError> {
        athlete.validate()?;
        athlete.id = self.repo.insert(&athlete).await?;
        Ok(athlete)
    }

    /// Look up an athlete by id.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::NotFound`] when no athlete with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_athlete(&self, id: AthleteId) -> Result<Athlete, OlympicsError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found("Athlete", id))
    }

    /// List all athletes.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_athletes(&self) -> Result<Vec<Athlete>, OlympicsError> {
        self.repo.get_all().await
    }

    /// Athletes whose name contains `query`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn search_athletes(&self, query: &str) -> Result<Vec<Athlete>, OlympicsError> {
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
    #[tracing::instrument(skip(self, current, replacement), fields(athlete_id = %current.id))]
    pub async fn update_athlete(
        &self,
        current: &Athlete,
        mut replacement: Athlete,
    ) -> Result<Athlete, OlympicsError> {
        replacement.validate()?;
        self.repo.update(current, &replacement).await?;
        replacement.id = current.id;
        Ok(replacement)
    }

    /// Read the image at `path` and store it as the athlete's photo.
    ///
    /// The file is rejected before anything is written if it exceeds
    /// [`MAX_PHOTO_BYTES`].
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Attachment`] if the file cannot be read,
    /// [`OlympicsError::Validation`] if it is too large,
    /// [`OlympicsError::NotFound`] if the athlete no longer exists, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, athlete, path), fields(athlete_id = %athlete.id, path = %path.as_ref().display()))]
    pub async fn attach_photo(
        &self,
        athlete: &Athlete,
        path: impl AsRef<Path>,
    ) -> Result<Athlete, OlympicsError> {
        let photo = read_photo_within(path.as_ref(), MAX_PHOTO_BYTES)?;
        tracing::debug!(bytes = photo.len(), "photo loaded");
        let mut replacement = athlete.clone();
        replacement.photo = Some(photo);
        self.update_athlete(athlete, replacement).await
    }

    /// Whether `athlete` can be deleted without orphaning participations.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn can_delete_athlete(&self, athlete: &Athlete) -> Result<bool, OlympicsError> {
        self.repo.is_deletable(athlete).await
    }

    /// Delete an athlete once no participation references them.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Integrity`] when participations still
    /// reference the athlete, [`OlympicsError::NotFound`] if the row no
    /// longer exists, or a storage error from the repository.
    #[tracing::instrument(skip(self, athlete), fields(athlete_id = %athlete.id))]
    pub async fn delete_athlete(&self, athlete: &Athlete) -> Result<(), OlympicsError> {
        if !self.repo.is_deletable(athlete).await? {
            return Err(still_referenced("Athlete", athlete.id, "participations"));
        }
        self.repo.delete(athlete).await
    }
}
