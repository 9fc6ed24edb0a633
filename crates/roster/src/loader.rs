//! Loading a roster from JSON.
//!
//! The file holds a JSON array of engineers:
//!
//! ```json
//! [
//!   {
//!     "id": "ENG-1",
//!     "name": "Ada",
//!     "skills": ["database"],
//!     "expertise": { "database": 90 },
//!     "availability": "available",
//!     "workload": 20,
//!     "is_lead": true
//!   }
//! ]
//! ```
//!
//! `skills`, `expertise`, `workload` and `is_lead` may be omitted. Every skill
//! with an expertise entry is added to the capability set.

use std::path::Path;

use triage::Engineer;

use crate::{InMemoryRoster, RosterLoadError};

impl InMemoryRoster {
    /// Parses a roster from JSON text.
    ///
    /// # Errors
    ///
    /// [`RosterLoadError::Json`] for malformed input and
    /// [`RosterLoadError::DuplicateId`] for repeated identifiers.
    pub fn from_json_str(json: &str) -> Result<Self, RosterLoadError> {
        let mut engineers: Vec<Engineer> = serde_json::from_str(json)?;
        for engineer in &mut engineers {
            normalize(engineer);
        }
        Self::new(engineers)
    }

    /// Reads and parses a roster file.
    ///
    /// # Errors
    ///
    /// [`RosterLoadError::Io`] if the file cannot be read, otherwise as
    /// [`InMemoryRoster::from_json_str`].
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RosterLoadError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| RosterLoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let roster = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), engineers = roster.len().await, "roster loaded");
        Ok(roster)
    }
}

fn normalize(engineer: &mut Engineer) {
    for (skill, level) in engineer.expertise.iter_mut() {
        *level = (*level).min(100);
        engineer.skills.insert(*skill);
    }
    engineer.workload = engineer.workload.min(100);
}
