//! Athlete — a competitor, optionally carrying a photo.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OlympicsError, ParseEnumError, ValidationError};
use crate::id::AthleteId;
use crate::named::Named;

/// Largest photo accepted at ingestion (64 KiB).
pub const MAX_PHOTO_BYTES: usize = 64 * 1024;

/// Sex of an athlete, stored as a single letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            other => Err(ParseEnumError {
                kind: "sex",
                value: other.to_string(),
            }),
        }
    }
}

/// Opaque binary payload of an athlete's photo.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Photo(Vec<u8>);

impl Photo {
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check the ingestion size limit.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PhotoTooLarge`] when the payload exceeds
    /// [`MAX_PHOTO_BYTES`].
    pub fn check_size(&self) -> Result<(), ValidationError> {
        if self.0.len() > MAX_PHOTO_BYTES {
            return Err(ValidationError::PhotoTooLarge {
                size: self.0.len(),
                limit: MAX_PHOTO_BYTES,
            });
        }
        Ok(())
    }
}

impl From<Vec<u8>> for Photo {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Photo({} bytes)", self.0.len())
    }
}

/// A competitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Athlete {
    pub id: AthleteId,
    pub name: String,
    pub sex: Sex,
    pub weight: u32,
    pub height: u32,
    pub photo: Option<Photo>,
}

impl Athlete {
    #[must_use]
    pub fn builder() -> AthleteBuilder {
        AthleteBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] when `name` is empty or the
    /// photo exceeds [`MAX_PHOTO_BYTES`].
    pub fn validate(&self) -> Result<(), OlympicsError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if let Some(photo) = &self.photo {
            photo.check_size()?;
        }
        Ok(())
    }
}

impl Named for Athlete {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Step-by-step builder for [`Athlete`].
#[derive(Debug, Default)]
pub struct AthleteBuilder {
    id: Option<AthleteId>,
    name: Option<String>,
    sex: Option<Sex>,
    weight: u32,
    height: u32,
    photo: Option<Photo>,
}

impl AthleteBuilder {
    #[must_use]
    pub fn id(mut self, id: AthleteId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn sex(mut self, sex: Sex) -> Self {
        self.sex = Some(sex);
        self
    }

    #[must_use]
    pub fn weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    #[must_use]
    pub fn photo(mut self, photo: Photo) -> Self {
        self.photo = Some(photo);
        self
    }

    /// Consume the builder, validate, and return an [`Athlete`].
    ///
    /// # Errors
    ///
    /// Returns [`OlympicsError::Validation`] if `sex` was not set or a
    /// field breaks an invariant.
    pub fn build(self) -> Result<Athlete, OlympicsError> {
        let sex = self
            .sex
            .ok_or(ValidationError::MissingField { field: "sex" })?;
        let athlete = Athlete {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            sex,
            weight: self.weight,
            height: self.height,
            photo: self.photo,
        };
        athlete.validate()?;
        Ok(athlete)
    }
}
