//! Assembly of a [`Classification`] from the individual scorers.
//!
//! Complexity and skills are deterministic. Urgency score and confidence carry
//! a decorative jitter drawn from the injected [`JitterSource`], bounded so
//! that each urgency tier spans a 20-point band and confidence stays within
//! `[60, 95]`.

use crate::catalog::{self, URGENCY_BAND_WIDTH};
use crate::ports::JitterSource;
use crate::{complexity, routing, skills};
use crate::{
    Classification, ComplexityAssessment, Score, SkillConfidence, Ticket, Timestamp, Urgency,
};

/// Lower bound of the classifier confidence.
pub const MIN_CONFIDENCE: f64 = 60.0;

/// Upper bound of the classifier confidence.
pub const MAX_CONFIDENCE: f64 = 95.0;

/// Classifies `ticket`. Pure apart from the jitter draws and the timestamp.
pub fn classify(ticket: &Ticket, jitter: &dyn JitterSource) -> Classification {
    let complexity = complexity::assess(ticket);
    let ranked = skills::identify(ticket);
    assemble(ticket.urgency, complexity, &ranked, jitter)
}

/// Builds a classification from already computed complexity and skills.
///
/// Draws the urgency jitter first, then the confidence jitter.
pub fn assemble(
    urgency: Urgency,
    complexity: ComplexityAssessment,
    ranked: &[SkillConfidence],
    jitter: &dyn JitterSource,
) -> Classification {
    Classification {
        urgency_score: urgency_score(urgency, jitter.next_unit()),
        complexity,
        skill_tags: skills::ranked_skills(ranked),
        recommendation: routing::recommend(complexity.tier, urgency),
        confidence: confidence(ranked, jitter.next_unit()),
        classified_at: Timestamp::now(),
    }
}

/// Urgency score: the tier's band floor plus `unit` of the band width, rounded.
pub fn urgency_score(urgency: Urgency, unit: f64) -> Score {
    let raw = catalog::urgency_score_floor(urgency) + unit * URGENCY_BAND_WIDTH;
    Score::clamped(raw.round())
}

/// Confidence: `65 + 0.2 × top skill confidence + 10 × unit`, clamped to `[60, 95]`.
pub fn confidence(ranked: &[SkillConfidence], unit: f64) -> Score {
    let top = ranked.first().map_or(0.0, |entry| entry.confidence);
    let raw = (65.0 + 0.2 * top + 10.0 * unit).round();
    Score::clamped(raw.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE))
}
