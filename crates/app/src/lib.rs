//! # olympics-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that storage adapters implement, one repository
//!   per entity (`SportRepository`, `TeamRepository`, `OlympiadRepository`,
//!   `AthleteRepository`, `EventRepository`, `ParticipationRepository`)
//! - Provide **services** that validate records, apply the integrity guard
//!   before deletes and expose name searches over list snapshots
//! - Load athlete photos from disk ([`photo`])
//!
//! ## Dependency rule
//! Depends on `olympics-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod filter;
pub mod photo;
pub mod ports;
pub mod services;
