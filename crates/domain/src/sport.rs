//! Sport — a discipline under which events are held.

use serde::{Deserialize, Serialize};

use crate::error::{OlympicsError, ValidationError};
use crate::id::SportId;
use crate::named::Named;

/// A sporting discipline such as swimming or athletics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sport {
    pub id: SportId,
    pub name: String,
}

impl Sport {
    /// Create a builder for constructing a [`Sport`].
    #[must_use]
    pub fn builder() -> SportBuilder {
        SportBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), OlympicsError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

impl Named for Sport {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Step-by-step builder for [`Sport`].
#[derive(Debug, Default)]
pub struct SportBuilder {
    id: Option<SportId>,
    name: Option<String>,
}

impl SportBuilder {
    #[must_use]
    pub fn id(mut self, id: SportId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Consume the builder, validate, and return a [`Sport`].
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Sport, OlympicsError> {
        let sport = Sport {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
        };
        sport.validate()?;
        Ok(sport)
    }
}
