//! Lead-engineer selection under the skill-dominance rule.
//!
//! A lead is installed only when one skill clearly dominates the candidate's
//! expertise across the ticket's required skills:
//!
//! 1. Candidates are available, lead-flagged engineers.
//! 2. A candidate's *primary skill* is the required skill with strictly the
//!    highest expertise; on equal expertise the earlier skill in the ticket's
//!    ranked order stays primary.
//! 3. *Dominance* is `expertise[primary] / Σ expertise[required]`, or `0` when
//!    the sum is zero.
//! 4. Candidates with dominance `>= 0.70` qualify. The highest dominance wins;
//!    equal dominance keeps roster order.

use crate::{Engineer, Skill, Ticket};

/// Minimum dominance a lead candidate must reach.
pub const DOMINANCE_THRESHOLD: f64 = 0.70;

/// A chosen lead and the figures that qualified them.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadSelection {
    pub engineer: Engineer,
    pub primary_skill: Skill,
    /// In `[0.0, 1.0]`.
    pub dominance: f64,
}

/// Selects the lead for `ticket` from a roster snapshot.
///
/// Returns `None` when the ticket is unclassified, has no skill tags, or no
/// available lead-flagged engineer reaches [`DOMINANCE_THRESHOLD`].
pub fn select_lead(ticket: &Ticket, roster: &[Engineer]) -> Option<LeadSelection> {
    let required = ticket
        .classification
        .as_ref()
        .map(|c| c.skill_tags.as_slice())
        .filter(|skills| !skills.is_empty())?;

    let mut best: Option<LeadSelection> = None;
    for engineer in roster.iter().filter(|e| e.is_available() && e.is_lead) {
        let Some((primary_skill, dominance)) = dominance(engineer, required) else {
            continue;
        };
        if dominance < DOMINANCE_THRESHOLD {
            continue;
        }
        if best.as_ref().map_or(true, |b| dominance > b.dominance) {
            best = Some(LeadSelection {
                engineer: engineer.clone(),
                primary_skill,
                dominance,
            });
        }
    }

    if let Some(selection) = &best {
        tracing::debug!(
            ticket_id = %ticket.id,
            engineer_id = %selection.engineer.id,
            primary_skill = %selection.primary_skill,
            dominance = selection.dominance,
            "lead engineer selected"
        );
    }
    best
}

/// Returns `(primary_skill, dominance)` of `engineer` over `required`.
///
/// `None` only when `required` is empty.
pub fn dominance(engineer: &Engineer, required: &[Skill]) -> Option<(Skill, f64)> {
    let primary = primary_skill(engineer, required)?;
    let total: u32 = required.iter().map(|s| engineer.expertise_in(*s)).sum();
    let score = if total == 0 {
        0.0
    } else {
        f64::from(engineer.expertise_in(primary)) / f64::from(total)
    };
    Some((primary, score))
}

/// The required skill with strictly maximal expertise; the first skill wins ties.
pub fn primary_skill(engineer: &Engineer, required: &[Skill]) -> Option<Skill> {
    let (&first, rest) = required.split_first()?;
    let mut primary = first;
    let mut max = engineer.expertise_in(first);
    for &skill in rest {
        let level = engineer.expertise_in(skill);
        if level > max {
            max = level;
            primary = skill;
        }
    }
    Some(primary)
}
