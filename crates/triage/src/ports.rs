//! Port traits for the collaborators the engine consumes.
//!
//! Infrastructure crates implement these; the domain only sees the traits.
//! Built-in implementations for the two static collaborators (thread
//! identifiers and thread text) are provided here because they are pure
//! configuration, not I/O.

use async_trait::async_trait;

use crate::catalog::{self, ThreadTemplate};
use crate::{Engineer, EngineerId, RosterError, Skill, ThreadId, TicketId};

// ---------------------------------------------------------------------------
// Engineer roster
// ---------------------------------------------------------------------------

/// Read access to the shared engineer roster.
///
/// The roster is mutated externally (availability flips, workload changes).
/// Every method returns an owned snapshot; callers compute over that snapshot
/// and never re-query in the middle of a computation.
#[async_trait]
pub trait EngineerRoster: Send + Sync {
    /// Looks up a single engineer.
    ///
    /// # Errors
    ///
    /// [`RosterError::NotFound`] if the identifier is unknown.
    async fn find_by_id(&self, id: &EngineerId) -> Result<Engineer, RosterError>;

    /// Engineers whose availability is `Available`, in roster order.
    async fn list_available(&self) -> Result<Vec<Engineer>, RosterError>;

    /// Engineers whose capability set contains `skill`, in roster order.
    async fn list_by_skill(&self, skill: Skill) -> Result<Vec<Engineer>, RosterError>;

    /// Engineers flagged as lead-capable, regardless of availability, in roster order.
    async fn list_leads(&self) -> Result<Vec<Engineer>, RosterError>;
}

// ---------------------------------------------------------------------------
// Thread identifiers
// ---------------------------------------------------------------------------

/// Produces ticket-scoped thread identifiers.
///
/// `sequence` is 1-based over the emitted thread order.
pub trait ThreadIdGenerator: Send + Sync {
    fn thread_id(&self, ticket: &TicketId, sequence: u32) -> ThreadId;
}

/// `"<ticket>-T<sequence>"` identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialThreadIds;

impl ThreadIdGenerator for SequentialThreadIds {
    fn thread_id(&self, ticket: &TicketId, sequence: u32) -> ThreadId {
        ThreadId::for_ticket(ticket, sequence)
    }
}

// ---------------------------------------------------------------------------
// Thread text
// ---------------------------------------------------------------------------

/// Supplies human-readable thread text and the keywords used to pick
/// relevant ticket sentences for each skill.
pub trait TemplateProvider: Send + Sync {
    fn thread_template(&self, skill: Skill) -> ThreadTemplate;

    fn integration_template(&self) -> ThreadTemplate;

    /// Lowercase keywords; a description sentence containing any of them is
    /// copied into the thread description.
    fn content_keywords(&self, skill: Skill) -> Vec<String>;
}

/// Templates and keywords from [`crate::catalog`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticTemplates;

impl TemplateProvider for StaticTemplates {
    fn thread_template(&self, skill: Skill) -> ThreadTemplate {
        catalog::default_template(skill)
    }

    fn integration_template(&self) -> ThreadTemplate {
        catalog::integration_thread_template()
    }

    fn content_keywords(&self, skill: Skill) -> Vec<String> {
        catalog::skill_keywords(skill)
            .iter()
            .map(|k| (*k).to_string())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Jitter
// ---------------------------------------------------------------------------

/// Source of the decorative jitter applied to urgency and confidence scores.
///
/// Implementations return values in `[0.0, 1.0)`. Tests inject a fixed value
/// so classification scores are exact.
pub trait JitterSource: Send + Sync {
    fn next_unit(&self) -> f64;
}
