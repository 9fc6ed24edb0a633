//! Errors raised while loading or updating the roster.

use std::path::PathBuf;

use thiserror::Error;
use triage::EngineerId;

/// Failure to load a roster file.
#[derive(Debug, Error)]
pub enum RosterLoadError {
    #[error("Failed to read roster file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid roster JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two entries share an identifier.
    #[error("Duplicate engineer id in roster: {id}")]
    DuplicateId { id: EngineerId },
}
