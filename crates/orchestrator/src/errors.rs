//! Errors surfaced by the staged pipelines.
//!
//! Launch failures during the `Running` state are absorbed into a
//! [`crate::LaunchResult`] and never reach the caller as an error. What does
//! surface is cooperative cancellation, and collaborator failures in the
//! classification pipeline, which has no failure state of its own.

use thiserror::Error;
use triage::TriageError;

/// Errors returned by [`crate::TriageService`] operations.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// The caller cancelled the run; no result is delivered.
    #[error("Run cancelled before completion")]
    Cancelled,

    /// A domain collaborator failed.
    #[error(transparent)]
    Triage(#[from] TriageError),

    /// A task spawned for a stage panicked or was aborted.
    #[error("Stage task failed: {reason}")]
    StageTask {
        /// Description of the task failure.
        reason: String,
    },
}

impl OrchestrationError {
    /// Returns `true` for [`OrchestrationError::Cancelled`].
    pub fn is_cancelled(&self) -> bool {
        matches!(self, OrchestrationError::Cancelled)
    }
}

impl From<triage::RosterError> for OrchestrationError {
    fn from(err: triage::RosterError) -> Self {
        OrchestrationError::Triage(TriageError::Roster(err))
    }
}
