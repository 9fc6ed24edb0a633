//! Core decision domain for CRP triage.
//!
//! Given a support ticket, this crate computes its complexity and urgency
//! profile, infers the skills it needs, decides whether it should be escalated
//! to a collaborative resolution process (CRP), selects a lead engineer under
//! the skill-dominance rule, decomposes the ticket into skill-scoped work
//! threads, and matches each thread to the best-fit available engineer.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! Every decision function is pure and total over a roster *snapshot*; the
//! staged, cancellable execution lives in the `orchestrator` crate and roster
//! storage in the `roster` crate.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`TicketId`, `EngineerId`, `ThreadId`, `LaunchRunId`) |
//! | [`types`] | Tickets, classifications, engineers, threads and their invariants |
//! | [`errors`] | Domain and port error types |
//! | [`catalog`] | Keyword, weight and template tables |
//! | [`complexity`] | Complexity score and tier |
//! | [`skills`] | Ranked skill inference |
//! | [`classifier`] | Classification assembly with injected jitter |
//! | [`routing`] | CRP recommendation and launch evaluation |
//! | [`lead`] | Lead-engineer selection |
//! | [`decomposition`] | Thread decomposition and priorities |
//! | [`matching`] | Thread-to-engineer matching |
//! | [`ports`] | Roster, identifier, template and jitter traits |
//! | [`jitter`] | Jitter source implementations |

pub mod catalog;
pub mod classifier;
pub mod complexity;
pub mod decomposition;
pub mod errors;
pub mod identifiers;
pub mod jitter;
pub mod lead;
pub mod matching;
pub mod ports;
pub mod routing;
pub mod skills;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{RosterError, TriageError};
pub use identifiers::{EngineerId, LaunchRunId, ThreadId, TicketId};
pub use jitter::{FixedJitter, SeededJitter};
pub use lead::LeadSelection;
pub use matching::{EngineerMatch, MatchScore};
pub use ports::{
    EngineerRoster, JitterSource, SequentialThreadIds, StaticTemplates, TemplateProvider,
    ThreadIdGenerator,
};
pub use routing::{LaunchDecision, LaunchReason};
pub use types::{
    AffectedSystem, Availability, Classification, ComplexityAssessment, ComplexityTier, Engineer,
    IssueThread, Priority, Resolution, RoutingRecommendation, Score, Skill, SkillConfidence,
    ThreadStatus, Ticket, TicketStatus, Timestamp, Urgency,
};
