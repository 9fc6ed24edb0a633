//! Error types for the CRP triage domain.
//!
//! Scoring, routing, selection, decomposition and matching are total functions
//! and never return errors: degenerate inputs yield `None` or an empty list.
//! The types here cover what *can* go wrong around them: collaborators behind
//! the [`crate::ports`] traits failing, and callers requesting lifecycle moves
//! that the ticket or thread state machine forbids.

use thiserror::Error;

use crate::EngineerId;

// ---------------------------------------------------------------------------
// Port errors
// ---------------------------------------------------------------------------

/// Failure reported by an [`crate::ports::EngineerRoster`] implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RosterError {
    /// The backing store could not be read.
    #[error("Roster unavailable: {reason}")]
    Unavailable {
        /// Human-readable description of the failure.
        reason: String,
    },

    /// No engineer with the given identifier exists.
    #[error("Engineer not found: {id}")]
    NotFound {
        /// The identifier that was looked up.
        id: EngineerId,
    },
}

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

/// Errors surfaced by the triage domain.
#[derive(Debug, Error)]
pub enum TriageError {
    /// A lifecycle change that the entity's state machine does not allow.
    #[error("Invalid transition for {entity}: {from} -> {to}")]
    InvalidTransition {
        /// Which record was being changed (e.g. `"ticket TKT-1"`).
        entity: String,
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
    },

    /// The engineer roster failed while a stage was reading it.
    #[error(transparent)]
    Roster(#[from] RosterError),
}
