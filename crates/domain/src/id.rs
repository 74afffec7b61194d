//! Typed identifier newtypes backed by store-assigned integers.
//!
//! The store assigns ids on insert. The value `0` marks a record that has
//! not been persisted yet.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(
            Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Identifier of a record that has not been inserted yet.
            pub const UNSAVED: Self = Self(0);

            /// Wrap a raw store identifier.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Access the raw store identifier.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }

            /// Whether the store has assigned this identifier.
            #[must_use]
            pub const fn is_persisted(self) -> bool {
                self.0 > 0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Sport`](crate::sport::Sport).
    SportId
);

define_id!(
    /// Unique identifier for a [`Team`](crate::team::Team).
    TeamId
);

define_id!(
    /// Unique identifier for an [`Olympiad`](crate::olympiad::Olympiad).
    OlympiadId
);

define_id!(
    /// Unique identifier for an [`Athlete`](crate::athlete::Athlete).
    AthleteId
);

define_id!(
    /// Unique identifier for an [`Event`](crate::event::Event).
    EventId
);
