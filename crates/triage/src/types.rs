//! Shared value types for the CRP triage domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! meaningful values with invariants (e.g. scores are in `[0.0, 100.0]`, thread
//! priorities are integers in `[1, 10]`) and participate in domain computations.
//!
//! Records owned by external systems ([`Ticket`], [`Engineer`]) are never
//! mutated in place by the engine. Lifecycle helpers consume a value and return
//! the derived copy.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineerId, ThreadId, TicketId, TriageError};

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// A score in the range `[0.0, 100.0]`.
///
/// Used for urgency, complexity and confidence. Construction either validates
/// ([`Score::new`]) or clamps ([`Score::clamped`]); there is no way to hold an
/// out-of-range value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    /// Creates a [`Score`], returning `None` if `value` is outside `[0.0, 100.0]`.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && (0.0..=100.0).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Creates a [`Score`] by clamping `value` into `[0.0, 100.0]`.
    ///
    /// NaN clamps to zero.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, 100.0))
        }
    }

    /// Returns the score as an `f64` in `[0.0, 100.0]`.
    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Score {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("score {value} is outside [0, 100]"))
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Ticket metadata
// ---------------------------------------------------------------------------

/// Urgency tier declared on a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    /// All tiers, lowest first.
    pub const ALL: [Urgency; 4] = [
        Urgency::Low,
        Urgency::Medium,
        Urgency::High,
        Urgency::Critical,
    ];
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::High => "High",
            Urgency::Critical => "Critical",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------

/// The business system a ticket reports a problem in.
///
/// Unknown systems deserialize to [`AffectedSystem::Other`] and receive the
/// default weight and fallback skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffectedSystem {
    SapErp,
    SapS4Hana,
    SapSuccessFactors,
    SapCustomerExperience,
    SapBusinessTechnologyPlatform,
    SapAriba,
    SapConcur,
    SapAnalyticsCloud,
    #[serde(other)]
    Other,
}

impl AffectedSystem {
    /// The eight known systems.
    pub const KNOWN: [AffectedSystem; 8] = [
        AffectedSystem::SapErp,
        AffectedSystem::SapS4Hana,
        AffectedSystem::SapSuccessFactors,
        AffectedSystem::SapCustomerExperience,
        AffectedSystem::SapBusinessTechnologyPlatform,
        AffectedSystem::SapAriba,
        AffectedSystem::SapConcur,
        AffectedSystem::SapAnalyticsCloud,
    ];

    /// Returns the human-readable product name.
    pub fn label(self) -> &'static str {
        match self {
            AffectedSystem::SapErp => "SAP ERP",
            AffectedSystem::SapS4Hana => "SAP S/4HANA",
            AffectedSystem::SapSuccessFactors => "SAP SuccessFactors",
            AffectedSystem::SapCustomerExperience => "SAP Customer Experience",
            AffectedSystem::SapBusinessTechnologyPlatform => "SAP Business Technology Platform",
            AffectedSystem::SapAriba => "SAP Ariba",
            AffectedSystem::SapConcur => "SAP Concur",
            AffectedSystem::SapAnalyticsCloud => "SAP Analytics Cloud",
            AffectedSystem::Other => "Other",
        }
    }

    /// Resolves a product name (case-insensitive) to a known system, or
    /// [`AffectedSystem::Other`].
    pub fn from_label(label: &str) -> Self {
        let wanted = label.trim();
        Self::KNOWN
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(wanted))
            .unwrap_or(AffectedSystem::Other)
    }
}

impl std::fmt::Display for AffectedSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// The closed set of skill domains.
///
/// Used both as a ticket-requirement tag and as an engineer-capability tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Database,
    Frontend,
    Backend,
    Network,
    Security,
    DevOps,
    Integration,
    Analytics,
    Mobile,
    Cloud,
    Ux,
}

impl Skill {
    /// Every skill in declaration order. Skill identification scans in this order.
    pub const ALL: [Skill; 11] = [
        Skill::Database,
        Skill::Frontend,
        Skill::Backend,
        Skill::Network,
        Skill::Security,
        Skill::DevOps,
        Skill::Integration,
        Skill::Analytics,
        Skill::Mobile,
        Skill::Cloud,
        Skill::Ux,
    ];
}

impl std::fmt::Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Skill::Database => "Database",
            Skill::Frontend => "Frontend",
            Skill::Backend => "Backend",
            Skill::Network => "Network",
            Skill::Security => "Security",
            Skill::DevOps => "DevOps",
            Skill::Integration => "Integration",
            Skill::Analytics => "Analytics",
            Skill::Mobile => "Mobile",
            Skill::Cloud => "Cloud",
            Skill::Ux => "UX",
        };
        f.write_str(label)
    }
}

/// A skill inferred from ticket text, with confidence in `[0.0, 100.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillConfidence {
    pub skill: Skill,
    pub confidence: f64,
}

impl SkillConfidence {
    pub fn new(skill: Skill, confidence: f64) -> Self {
        Self { skill, confidence }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Complexity tier derived from the complexity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityTier {
    Low,
    Medium,
    High,
}

impl ComplexityTier {
    /// All tiers, lowest first.
    pub const ALL: [ComplexityTier; 3] = [
        ComplexityTier::Low,
        ComplexityTier::Medium,
        ComplexityTier::High,
    ];
}

impl std::fmt::Display for ComplexityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ComplexityTier::Low => "Low",
            ComplexityTier::Medium => "Medium",
            ComplexityTier::High => "High",
        };
        f.write_str(label)
    }
}

/// Output of the complexity scorer: the clamped score and its tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityAssessment {
    pub score: Score,
    pub tier: ComplexityTier,
}

/// Routing recommendation attached to a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingRecommendation {
    /// Single-engineer handling through the normal queue.
    Standard,
    /// Escalate to the collaborative resolution process.
    Crp,
}

/// The full classification of a ticket.
///
/// Immutable once produced; attached to a derived copy of the [`Ticket`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Urgency score; the urgency tier fixes a 20-point band, jitter places it.
    pub urgency_score: Score,

    /// Deterministic complexity score and tier.
    pub complexity: ComplexityAssessment,

    /// Required skills, most confident first.
    pub skill_tags: Vec<Skill>,

    /// Standard or CRP routing.
    pub recommendation: RoutingRecommendation,

    /// Classifier confidence, always within `[60.0, 95.0]`.
    pub confidence: Score,

    pub classified_at: Timestamp,
}

impl Classification {
    /// Shorthand for `self.complexity.tier`.
    pub fn tier(&self) -> ComplexityTier {
        self.complexity.tier
    }
}

// ---------------------------------------------------------------------------
// Ticket
// ---------------------------------------------------------------------------

/// Ticket lifecycle status.
///
/// `Submitted → Classified → (InProgress) → Resolved`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Submitted,
    Classified,
    InProgress,
    Resolved,
}

impl TicketStatus {
    /// Returns `true` if a ticket may move from `self` to `next`.
    pub fn can_transition_to(self, next: TicketStatus) -> bool {
        matches!(
            (self, next),
            (TicketStatus::Submitted, TicketStatus::Classified)
                | (TicketStatus::Classified, TicketStatus::Classified)
                | (TicketStatus::Classified, TicketStatus::InProgress)
                | (TicketStatus::Classified, TicketStatus::Resolved)
                | (TicketStatus::InProgress, TicketStatus::Resolved)
        )
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TicketStatus::Submitted => "submitted",
            TicketStatus::Classified => "classified",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
        };
        f.write_str(label)
    }
}

/// Resolution text and date recorded when a ticket is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub text: String,
    pub resolved_at: Timestamp,
}

/// A support ticket.
///
/// Owned by the caller. The engine returns derived copies; it never mutates a
/// caller's ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub subject: String,
    pub description: String,
    pub urgency: Urgency,
    pub affected_system: AffectedSystem,
    #[serde(default)]
    pub attachment_count: u32,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_lead: Option<EngineerId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub threads: Vec<IssueThread>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
}

impl Ticket {
    /// Creates a freshly submitted ticket with no attachments.
    pub fn new(
        id: TicketId,
        subject: impl Into<String>,
        description: impl Into<String>,
        urgency: Urgency,
        affected_system: AffectedSystem,
    ) -> Self {
        Self {
            id,
            subject: subject.into(),
            description: description.into(),
            urgency,
            affected_system,
            attachment_count: 0,
            status: TicketStatus::Submitted,
            classification: None,
            assigned_lead: None,
            threads: Vec::new(),
            resolution: None,
        }
    }

    pub fn with_attachments(mut self, count: u32) -> Self {
        self.attachment_count = count;
        self
    }

    /// Lowercased `subject + " " + description`, the text every keyword scan reads.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.subject, self.description).to_lowercase()
    }

    /// Returns a classified copy of this ticket.
    ///
    /// `lead` and `threads` replace any previous values. Re-classifying an
    /// already classified ticket is allowed.
    ///
    /// # Errors
    ///
    /// [`TriageError::InvalidTransition`] if the ticket is in progress or resolved.
    pub fn classified(
        &self,
        classification: Classification,
        lead: Option<EngineerId>,
        threads: Vec<IssueThread>,
    ) -> Result<Ticket, TriageError> {
        let mut next = self.transitioned(TicketStatus::Classified)?;
        next.classification = Some(classification);
        next.assigned_lead = lead;
        next.threads = threads;
        Ok(next)
    }

    /// Returns a copy of this ticket moved to [`TicketStatus::InProgress`].
    ///
    /// # Errors
    ///
    /// [`TriageError::InvalidTransition`] unless the ticket is classified.
    pub fn begin_work(&self) -> Result<Ticket, TriageError> {
        self.transitioned(TicketStatus::InProgress)
    }

    /// Returns a resolved copy of this ticket carrying `text` and the current time.
    ///
    /// # Errors
    ///
    /// [`TriageError::InvalidTransition`] unless the ticket is classified or in progress.
    pub fn resolve(&self, text: impl Into<String>) -> Result<Ticket, TriageError> {
        let mut next = self.transitioned(TicketStatus::Resolved)?;
        next.resolution = Some(Resolution {
            text: text.into(),
            resolved_at: Timestamp::now(),
        });
        Ok(next)
    }

    fn transitioned(&self, next: TicketStatus) -> Result<Ticket, TriageError> {
        if !self.status.can_transition_to(next) {
            return Err(TriageError::InvalidTransition {
                entity: format!("ticket {}", self.id),
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        let mut copy = self.clone();
        copy.status = next;
        Ok(copy)
    }
}

// ---------------------------------------------------------------------------
// Engineers
// ---------------------------------------------------------------------------

/// Engineer availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Busy,
    Offline,
}

/// A roster entry.
///
/// Mutable external state; the engine only reads snapshots taken through
/// [`crate::ports::EngineerRoster`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engineer {
    pub id: EngineerId,
    pub name: String,
    #[serde(default)]
    pub skills: BTreeSet<Skill>,
    /// Proficiency in `[0, 100]`, only for skills the engineer has meaningfully.
    #[serde(default)]
    pub expertise: BTreeMap<Skill, u8>,
    pub availability: Availability,
    #[serde(default)]
    pub workload: u8,
    #[serde(default)]
    pub is_lead: bool,
}

impl Engineer {
    /// Creates an available, non-lead engineer with no skills.
    pub fn new(id: EngineerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            skills: BTreeSet::new(),
            expertise: BTreeMap::new(),
            availability: Availability::Available,
            workload: 0,
            is_lead: false,
        }
    }

    /// Adds `skill` to the capability set with the given proficiency (capped at 100).
    pub fn with_expertise(mut self, skill: Skill, level: u8) -> Self {
        self.skills.insert(skill);
        self.expertise.insert(skill, level.min(100));
        self
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    pub fn as_lead(mut self) -> Self {
        self.is_lead = true;
        self
    }

    /// Proficiency in `skill`, `0` when the engineer has none recorded.
    pub fn expertise_in(&self, skill: Skill) -> u32 {
        self.expertise.get(&skill).copied().map_or(0, u32::from)
    }

    pub fn is_available(&self) -> bool {
        self.availability == Availability::Available
    }
}

// ---------------------------------------------------------------------------
// Issue threads
// ---------------------------------------------------------------------------

/// Work-thread status: `Open → InProgress → Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadStatus {
    Open,
    InProgress,
    Resolved,
}

impl std::fmt::Display for ThreadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThreadStatus::Open => "open",
            ThreadStatus::InProgress => "in_progress",
            ThreadStatus::Resolved => "resolved",
        };
        f.write_str(label)
    }
}

/// Thread priority, an integer in `[1, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Returns `None` if `value` is outside `[1, 10]`.
    #[must_use]
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Clamps `raw` into `[1, 10]`, then rounds to the nearest integer.
    pub fn from_raw(raw: f64) -> Self {
        let clamped = if raw.is_nan() {
            f64::from(Self::MIN)
        } else {
            raw.clamp(f64::from(Self::MIN), f64::from(Self::MAX))
        };
        // The clamp bounds the value to 1..=10 so the cast cannot truncate.
        Self(clamped.round() as u8)
    }

    pub fn as_u8(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("priority {value} is outside [1, 10]"))
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One skill-scoped unit of collaborative work within a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueThread {
    pub id: ThreadId,
    pub ticket_id: TicketId,
    pub title: String,
    pub description: String,
    /// Never empty.
    pub required_skills: Vec<Skill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_engineer: Option<EngineerId>,
    pub status: ThreadStatus,
    pub priority: Priority,
    pub collaboration_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

impl IssueThread {
    /// Returns a copy assigned to `engineer`. Resolved threads cannot be reassigned.
    ///
    /// # Errors
    ///
    /// [`TriageError::InvalidTransition`] if the thread is already resolved.
    pub fn assign(&self, engineer: EngineerId) -> Result<IssueThread, TriageError> {
        if self.status == ThreadStatus::Resolved {
            return Err(self.invalid(ThreadStatus::Resolved));
        }
        let mut next = self.clone();
        next.assigned_engineer = Some(engineer);
        Ok(next)
    }

    /// Returns a copy moved to [`ThreadStatus::InProgress`].
    ///
    /// # Errors
    ///
    /// [`TriageError::InvalidTransition`] unless the thread is open and assigned.
    pub fn start(&self) -> Result<IssueThread, TriageError> {
        if self.status != ThreadStatus::Open || self.assigned_engineer.is_none() {
            return Err(self.invalid(ThreadStatus::InProgress));
        }
        let mut next = self.clone();
        next.status = ThreadStatus::InProgress;
        Ok(next)
    }

    /// Returns a resolved copy carrying `solution`.
    ///
    /// # Errors
    ///
    /// [`TriageError::InvalidTransition`] if the thread is already resolved.
    pub fn resolve(&self, solution: impl Into<String>) -> Result<IssueThread, TriageError> {
        if self.status == ThreadStatus::Resolved {
            return Err(self.invalid(ThreadStatus::Resolved));
        }
        let mut next = self.clone();
        next.status = ThreadStatus::Resolved;
        next.solution = Some(solution.into());
        Ok(next)
    }

    fn invalid(&self, to: ThreadStatus) -> TriageError {
        TriageError::InvalidTransition {
            entity: format!("thread {}", self.id),
            from: self.status.to_string(),
            to: to.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
