//! Routing decisions.
//!
//! Two related rules exist:
//!
//! - [`should_route_to_crp`] is the classifier's recommendation, a pure
//!   function of complexity tier and urgency.
//! - [`evaluate_for_launch`] decides whether a collaborative resolution process
//!   is actually launched. It accepts a wider set of triggers and reports the
//!   first one that holds as a [`LaunchReason`].

use serde::{Deserialize, Serialize};

use crate::{ComplexityTier, RoutingRecommendation, Ticket, Urgency};

/// Skill-tag count at or above which a ticket launches a CRP.
pub const MULTI_SKILL_TRIGGER: usize = 3;

/// `true` iff the tier is High, or Medium with Critical or High urgency.
pub fn should_route_to_crp(tier: ComplexityTier, urgency: Urgency) -> bool {
    match tier {
        ComplexityTier::High => true,
        ComplexityTier::Medium => matches!(urgency, Urgency::Critical | Urgency::High),
        ComplexityTier::Low => false,
    }
}

/// The classifier's recommendation for `(tier, urgency)`.
pub fn recommend(tier: ComplexityTier, urgency: Urgency) -> RoutingRecommendation {
    if should_route_to_crp(tier, urgency) {
        RoutingRecommendation::Crp
    } else {
        RoutingRecommendation::Standard
    }
}

// ---------------------------------------------------------------------------
// Launch evaluation
// ---------------------------------------------------------------------------

/// Why a launch was accepted, rejected or abandoned.
///
/// A closed set so callers and tests can match on the kind; [`std::fmt::Display`]
/// yields the advisory text shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum LaunchReason {
    /// The ticket has no classification yet.
    NotClassified,
    /// Complexity tier is High.
    HighComplexity,
    /// The classifier recommended CRP routing.
    AiRecommended,
    /// The ticket needs at least [`MULTI_SKILL_TRIGGER`] skills.
    MultiSkill { count: usize },
    /// Critical urgency on a ticket that is not Low complexity.
    CriticalUrgency,
    /// No trigger holds.
    CriteriaNotMet,
    /// The staged launch failed unexpectedly.
    SystemError,
}

impl LaunchReason {
    /// `true` for the reasons that allow a launch.
    pub fn is_trigger(self) -> bool {
        matches!(
            self,
            LaunchReason::HighComplexity
                | LaunchReason::AiRecommended
                | LaunchReason::MultiSkill { .. }
                | LaunchReason::CriticalUrgency
        )
    }
}

impl std::fmt::Display for LaunchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LaunchReason::NotClassified => write!(f, "Ticket has not yet been classified"),
            LaunchReason::HighComplexity => {
                write!(f, "High complexity ticket requires collaborative resolution")
            }
            LaunchReason::AiRecommended => {
                write!(f, "AI classification recommends collaborative resolution")
            }
            LaunchReason::MultiSkill { count } => {
                write!(f, "Ticket requires {count} distinct skills")
            }
            LaunchReason::CriticalUrgency => {
                write!(f, "Critical urgency requires immediate collaborative response")
            }
            LaunchReason::CriteriaNotMet => write!(f, "Ticket does not meet CRP criteria"),
            LaunchReason::SystemError => write!(f, "CRP launch failed due to system error"),
        }
    }
}

/// Result of the synchronous launch evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchDecision {
    pub should_launch: bool,
    pub reason: LaunchReason,
}

impl LaunchDecision {
    fn launch(reason: LaunchReason) -> Self {
        Self {
            should_launch: true,
            reason,
        }
    }

    fn reject(reason: LaunchReason) -> Self {
        Self {
            should_launch: false,
            reason,
        }
    }
}

/// Decides whether `ticket` launches a CRP.
///
/// Triggers are checked in a fixed order and the first one that holds becomes
/// the reason: High complexity, CRP recommendation, three or more skills,
/// Critical urgency on a non-Low ticket.
pub fn evaluate_for_launch(ticket: &Ticket) -> LaunchDecision {
    let Some(classification) = ticket.classification.as_ref() else {
        return LaunchDecision::reject(LaunchReason::NotClassified);
    };

    let tier = classification.tier();
    let skill_count = classification.skill_tags.len();

    if tier == ComplexityTier::High {
        LaunchDecision::launch(LaunchReason::HighComplexity)
    } else if classification.recommendation == RoutingRecommendation::Crp {
        LaunchDecision::launch(LaunchReason::AiRecommended)
    } else if skill_count >= MULTI_SKILL_TRIGGER {
        LaunchDecision::launch(LaunchReason::MultiSkill { count: skill_count })
    } else if ticket.urgency == Urgency::Critical && tier != ComplexityTier::Low {
        LaunchDecision::launch(LaunchReason::CriticalUrgency)
    } else {
        LaunchDecision::reject(LaunchReason::CriteriaNotMet)
    }
}
