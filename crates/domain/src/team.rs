//! Team — a national team athletes compete for.

use serde::{Deserialize, Serialize};

use crate::error::{OlympicsError, ValidationError};
use crate::id::TeamId;
use crate::named::Named;

/// Longest accepted country code, e.g. `ESP`.
pub const MAX_INITIALS_LEN: usize = 3;

/// A national team identified by name and short initials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub initials: String,
}

impl Team {
    #[must_use]
    pub fn builder() -> TeamBuilder {
        TeamBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] when `name` is empty or the
    /// initials are empty or longer than [`MAX_INITIALS_LEN`] characters.
    pub fn validate(&self) -> Result<(), OlympicsError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let len = self.initials.chars().count();
        if len == 0 || len > MAX_INITIALS_LEN {
            return Err(ValidationError::InvalidInitials {
                max: MAX_INITIALS_LEN,
            }
            .into());
        }
        Ok(())
    }
}

impl Named for Team {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Step-by-step builder for [`Team`].
#[derive(Debug, Default)]
pub struct TeamBuilder {
    id: Option<TeamId>,
    name: Option<String>,
    initials: Option<String>,
}

impl TeamBuilder {
    #[must_use]
    pub fn id(mut self, id: TeamId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn initials(mut self, initials: impl Into<String>) -> Self {
        self.initials = Some(initials.into());
        self
    }

    /// Consume the builder, validate, and return a [`Team`].
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] if a field breaks an invariant.
    pub fn build(self) -> Result<Team, OlympicsError> {
        let team = Team {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            initials: self.initials.unwrap_or_default(),
        };
        team.validate()?;
        Ok(team)
    }
}
