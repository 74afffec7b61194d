//! Team service — use-cases for managing national teams.

use olympics_domain::error::OlympicsError;
use olympics_domain::id::TeamId;
use olympics_domain::team::Team;

use super::{not_found, still_referenced};
use crate::ports::TeamRepository;

/// Application service for team CRUD operations.
pub struct TeamService<R> {
    repo: R,
}

impl<R: TeamRepository> TeamService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validate and insert a team, returning it with its new id.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, team), fields(team_name = %team.name))]
    pub async fn create_team(&self, mut team: Team) -> Result<Team, OlympicsError> {
        team.validate()?;
        team.id = self.repo.insert(&team).await?;
        Ok(team)
    }

    /// Look up a team by id.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::NotFound`] when no team with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_team(&self, id: TeamId) -> Result<Team, OlympicsError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found("Team", id))
    }

    /// List all teams.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_teams(&self) -> Result<Vec<Team>, OlympicsError> {
        self.repo.get_all().await
    }

    /// Overwrite `current` with the fields of `replacement`.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] if `replacement` is invalid,
    /// [`OlympicsError::NotFound`] if `current` no longer exists, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, current, replacement), fields(team_id = %current.id))]
    pub async fn update_team(
        &self,
        current: &Team,
        mut replacement: Team,
    ) -> Result<Team, OlympicsError> {
        replacement.validate()?;
        self.repo.update(current, &replacement).await?;
        replacement.id = current.id;
        Ok(replacement)
    }

    /// Whether `team` can be deleted without orphaning participations.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn can_delete_team(&self, team: &Team) -> Result<bool, OlympicsError> {
        self.repo.is_deletable(team).await
    }

    /// Delete a team once the integrity guard allows it.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Integrity`] when participations still
    /// reference the team, [`OlympicsError::NotFound`] if it no longer
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self, team), fields(team_id = %team.id))]
    pub async fn delete_team(&self, team: &Team) -> Result<(), OlympicsError> {
        if !self.repo.is_deletable(team).await? {
            return Err(still_referenced("Team", team.id, "participations"));
        }
        self.repo.delete(team).await
    }
}
