//! Olympiad — one edition of the games, held in a city in a given season.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OlympicsError, ParseEnumError, ValidationError};
use crate::id::OlympiadId;
use crate::named::Named;

/// The season in which an olympiad takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Summer,
    Winter,
}

impl Season {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summer => "Summer",
            Self::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Summer" => Ok(Self::Summer),
            "Winter" => Ok(Self::Winter),
            other => Err(ParseEnumError {
                kind: "season",
                value: other.to_string(),
            }),
        }
    }
}

/// A single edition of the games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Olympiad {
    pub id: OlympiadId,
    pub name: String,
    pub year: u32,
    pub season: Season,
    pub city: String,
}

impl Olympiad {
    #[must_use]
    pub fn builder() -> OlympiadBuilder {
        OlympiadBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] when `name` or `city` is empty.
    pub fn validate(&self) -> Result<(), OlympicsError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.city.trim().is_empty() {
            return Err(ValidationError::EmptyCity.into());
        }
        Ok(())
    }
}

impl Named for Olympiad {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Step-by-step builder for [`Olympiad`]. The season defaults to summer.
#[derive(Debug, Default)]
pub struct OlympiadBuilder {
    id: Option<OlympiadId>,
    name: Option<String>,
    year: u32,
    season: Option<Season>,
    city: Option<String>,
}

impl OlympiadBuilder {
    #[must_use]
    pub fn id(mut self, id: OlympiadId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn year(mut self, year: u32) -> Self {
        self.year = year;
        self
    }

    #[must_use]
    pub fn season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    #[must_use]
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Consume the builder, validate, and return an [`Olympiad`].
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] if a field breaks an invariant.
    pub fn build(self) -> Result<Olympiad, OlympicsError> {
        let olympiad = Olympiad {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            year: self.year,
            season: self.season.unwrap_or(Season::Summer),
            city: self.city.unwrap_or_default(),
        };
        olympiad.validate()?;
        Ok(olympiad)
    }
}
