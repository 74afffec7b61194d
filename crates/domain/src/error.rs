//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`OlympicsError`] via `From`, which is the only error crossing the port
//! boundary.

/// Top-level error returned by repositories and services.
#[derive(Debug, thiserror::Error)]
pub enum OlympicsError {
    /// A caller-side rule was broken before reaching storage.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// No row matched the requested identity.
    #[error("record not found")]
    NotFound(#[from] NotFoundError),

    /// The operation would break referential integrity.
    #[error("integrity violation")]
    Integrity(#[from] IntegrityError),

    /// A stored foreign key points at a row that does not exist.
    #[error("unresolved reference")]
    Resolution(#[from] ResolutionError),

    /// An attachment could not be read from disk.
    #[error("attachment could not be read")]
    Attachment(#[from] std::io::Error),

    /// The store could not be reached or the statement failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Caller-side validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("city must not be empty")]
    EmptyCity,

    #[error("initials must be between 1 and {max} characters")]
    InvalidInitials { max: usize },

    #[error("medal must be between 1 and {max} characters")]
    InvalidMedal { max: usize },

    #[error("photo is {size} bytes, the limit is {limit}")]
    PhotoTooLarge { size: usize, limit: usize },

    /// A required scalar field was not supplied.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// A required nested record was not supplied.
    #[error("{entity} is required")]
    MissingReference { entity: &'static str },

    /// A nested record has not been persisted yet, so it has no id to store.
    #[error("{entity} must be saved before it can be referenced")]
    UnsavedReference { entity: &'static str },
}

/// A lookup or mutation addressed a row that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Referential integrity failures.
#[derive(Debug, thiserror::Error)]
pub enum IntegrityError {
    /// The integrity guard found live dependents.
    #[error("{entity} {id} is still referenced by {dependents}")]
    HasDependents {
        entity: &'static str,
        id: String,
        dependents: &'static str,
    },

    /// The store refused the statement (foreign or primary key violation).
    #[error("statement rejected by a store constraint")]
    Rejected(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A foreign key stored on a row that does not resolve to a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} references missing {reference} {reference_id}")]
pub struct ResolutionError {
    pub entity: &'static str,
    pub id: String,
    pub reference: &'static str,
    pub reference_id: String,
}

/// Failure to parse one of the textual enum encodings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}
