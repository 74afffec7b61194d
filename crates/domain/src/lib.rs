//! # olympics-domain
//!
//! Pure domain model for the olympics registry.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers and error conventions
//! - Define the simple records: **Sports**, **Teams**, **Olympiads**
//! - Define **Athletes**, with an optional binary photo
//! - Define **Events**, which own resolved copies of their olympiad and sport
//! - Define **Participations**, identified by the `(athlete, event)` pair
//! - Contain the caller-side validation rules applied before persisting
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod named;

pub mod athlete;
pub mod event;
pub mod olympiad;
pub mod participation;
pub mod sport;
pub mod team;
