//! Typed identifiers for tickets, engineers, threads and launch runs.
//!
//! Tickets and engineers are numbered by the systems that own them, so their
//! identifiers only wrap a non-blank string. Thread identifiers come from the
//! [`crate::ports::ThreadIdGenerator`] port; launch runs get a fresh UUID.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Non-blank string newtype with `new`, `as_str` and `Display`. Deserializing
// a blank value fails the same way `new` does.
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String")]
        pub struct $name(String);

        impl $name {
            /// `None` for a blank value.
            pub fn new(raw: impl Into<String>) -> Option<Self> {
                let raw = raw.into();
                (!raw.trim().is_empty()).then_some(Self(raw))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(raw: String) -> Result<Self, Self::Error> {
                Self::new(raw).ok_or_else(|| format!("{} must not be blank", stringify!($name)))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id! {
    /// Identifies a support ticket (e.g. `"TKT-1042"`).
    ///
    /// Assigned by the ticketing system; the engine only reads it.
    TicketId
}

string_id! {
    /// Identifies an engineer in the roster.
    EngineerId
}

string_id! {
    /// Identifies one skill-scoped work thread within a ticket.
    ///
    /// Thread identifiers are ticket-scoped and sequential; see
    /// [`crate::ports::ThreadIdGenerator`].
    ThreadId
}

impl ThreadId {
    /// Builds the conventional ticket-scoped identifier `"<ticket>-T<sequence>"`.
    pub fn for_ticket(ticket: &TicketId, sequence: u32) -> Self {
        Self(format!("{ticket}-T{sequence}"))
    }
}

/// One `execute_launch` run. Recorded on the run's tracing span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaunchRunId(Uuid);

impl LaunchRunId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for LaunchRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
