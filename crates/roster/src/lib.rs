//! Engineer roster adapter.
//!
//! Implements the [`triage::EngineerRoster`] port over an in-memory store that
//! can be loaded from a JSON file and updated while pipelines read it.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** No routing or scoring rules live here; the store only
//! answers snapshot queries and applies availability and workload updates.

pub mod errors;
mod loader;
pub mod memory;
pub mod seed;

pub use errors::RosterLoadError;
pub use memory::{InMemoryRoster, ASSIGNMENT_LOAD, FULL_LOAD};
pub use seed::{demo_engineers, demo_roster};
