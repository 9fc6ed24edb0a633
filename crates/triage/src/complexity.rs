//! Complexity scoring.
//!
//! The score is the sum of five independently capped factors, clamped to
//! `[0, 100]`:
//!
//! | Factor | Contribution |
//! |--------|--------------|
//! | Description length | `>500` → 20, `>300` → 15, `>150` → 10, else 5 |
//! | Attachments | `min(count * 5, 15)` |
//! | Urgency | Critical 20, High 15, Medium 10, Low 5 |
//! | Keywords | sum of matched weights, capped at 25 |
//! | Affected system | per-system weight, 10 when unknown |
//!
//! Scoring is deterministic: identical input always yields the identical score.

use crate::catalog::{self, COMPLEXITY_KEYWORDS, KEYWORD_WEIGHT_CAP};
use crate::{ComplexityAssessment, ComplexityTier, Score, Ticket};

/// Score at or above which a ticket is [`ComplexityTier::High`].
pub const HIGH_THRESHOLD: f64 = 70.0;

/// Score at or above which a ticket is at least [`ComplexityTier::Medium`].
pub const MEDIUM_THRESHOLD: f64 = 40.0;

/// Computes the complexity score and tier of `ticket`.
pub fn assess(ticket: &Ticket) -> ComplexityAssessment {
    let text = ticket.searchable_text();
    let raw = length_weight(ticket.description.chars().count())
        + attachment_weight(ticket.attachment_count)
        + catalog::urgency_complexity_weight(ticket.urgency)
        + keyword_weight(&text)
        + catalog::system_weight(ticket.affected_system);

    let score = Score::clamped(f64::from(raw));
    ComplexityAssessment {
        score,
        tier: tier_for(score),
    }
}

/// Maps a score onto its tier.
pub fn tier_for(score: Score) -> ComplexityTier {
    let value = score.as_f64();
    if value >= HIGH_THRESHOLD {
        ComplexityTier::High
    } else if value >= MEDIUM_THRESHOLD {
        ComplexityTier::Medium
    } else {
        ComplexityTier::Low
    }
}

fn length_weight(chars: usize) -> u32 {
    match chars {
        n if n > 500 => 20,
        n if n > 300 => 15,
        n if n > 150 => 10,
        _ => 5,
    }
}

fn attachment_weight(count: u32) -> u32 {
    count.saturating_mul(5).min(15)
}

/// Sum of the weights of every keyword present in `text`, capped.
///
/// `text` must already be lowercase.
fn keyword_weight(text: &str) -> u32 {
    let total: u32 = COMPLEXITY_KEYWORDS
        .iter()
        .filter(|(keyword, _)| text.contains(keyword))
        .map(|(_, weight)| weight)
        .sum();
    total.min(KEYWORD_WEIGHT_CAP)
}
