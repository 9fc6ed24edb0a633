//! Skill identification from ticket text.
//!
//! Each skill has a fixed keyword list. A skill's confidence is the share of
//! its keywords found in the lowercase subject and description, as a
//! percentage. Skills under 20% are dropped. When nothing survives, the
//! affected system's default skills are used instead, so the result is never
//! empty.

use crate::catalog::{self, MIN_SKILL_CONFIDENCE};
use crate::{Skill, SkillConfidence, Ticket};

/// Returns the skills `ticket` requires, most confident first.
///
/// Equal confidences keep [`Skill::ALL`] order.
pub fn identify(ticket: &Ticket) -> Vec<SkillConfidence> {
    let text = ticket.searchable_text();

    let mut found: Vec<SkillConfidence> = Skill::ALL
        .into_iter()
        .map(|skill| SkillConfidence::new(skill, keyword_confidence(&text, skill)))
        .filter(|entry| entry.confidence >= MIN_SKILL_CONFIDENCE)
        .collect();

    if found.is_empty() {
        tracing::debug!(
            ticket_id = %ticket.id,
            system = %ticket.affected_system,
            "no skill keywords matched, using system defaults"
        );
        found = catalog::fallback_skills(ticket.affected_system);
    }

    sort_by_confidence(&mut found);
    found
}

/// Skill tags only, in ranked order.
pub fn ranked_skills(entries: &[SkillConfidence]) -> Vec<Skill> {
    entries.iter().map(|entry| entry.skill).collect()
}

/// Percentage of `skill`'s keywords present in `text` (already lowercase).
fn keyword_confidence(text: &str, skill: Skill) -> f64 {
    let keywords = catalog::skill_keywords(skill);
    if keywords.is_empty() {
        return 0.0;
    }
    let matched = keywords.iter().filter(|k| text.contains(*k)).count();
    (matched as f64 / keywords.len() as f64 * 100.0).min(100.0)
}

/// Stable descending sort.
fn sort_by_confidence(entries: &mut [SkillConfidence]) {
    entries.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AffectedSystem, TicketId, Urgency};

    fn ticket(subject: &str, description: &str, system: AffectedSystem) -> Ticket {
        Ticket::new(
            TicketId::new("TKT-1").unwrap(),
            subject,
            description,
            Urgency::Medium,
            system,
        )
    }

    #[test]
    fn keyword_share_becomes_confidence() {
        // 3 of 8 database keywords: "database", "query", "index"
        let t = ticket(
            "Slow database query",
            "The index is not used.",
            AffectedSystem::Other,
        );
        let skills = identify(&t);
        assert_eq!(skills[0].skill, Skill::Database);
        assert!((skills[0].confidence - 37.5).abs() < 1e-9);
    }

    #[test]
    fn weak_signals_below_twenty_percent_are_dropped() {
        // 1 of 8 database keywords = 12.5%
        let t = ticket("Check the table", "", AffectedSystem::SapConcur);
        let skills = identify(&t);
        assert!(skills.iter().all(|s| s.skill != Skill::Database));
    }

    #[test]
    fn falls_back_to_system_defaults() {
        let cases = [
            (AffectedSystem::SapErp, vec![(Skill::Backend, 70.0), (Skill::Database, 60.0)]),
            (AffectedSystem::SapS4Hana, vec![(Skill::Backend, 70.0), (Skill::Database, 60.0)]),
            (
                AffectedSystem::SapSuccessFactors,
                vec![(Skill::Frontend, 70.0), (Skill::Integration, 60.0)],
            ),
            (
                AffectedSystem::SapCustomerExperience,
                vec![(Skill::Frontend, 70.0), (Skill::Integration, 60.0)],
            ),
            (
                AffectedSystem::SapBusinessTechnologyPlatform,
                vec![(Skill::Cloud, 80.0), (Skill::Integration, 70.0)],
            ),
            (AffectedSystem::SapAriba, vec![(Skill::Backend, 60.0)]),
            (AffectedSystem::Other, vec![(Skill::Backend, 60.0)]),
        ];
        for (system, expected) in cases {
            let got: Vec<(Skill, f64)> = identify(&ticket("Help", "Nothing works", system))
                .into_iter()
                .map(|s| (s.skill, s.confidence))
                .collect();
            assert_eq!(got, expected, "fallback for {system}");
        }
    }

    #[test]
    fn results_are_sorted_and_in_range() {
        let t = ticket(
            "SSO login fails behind firewall",
            "Users see a certificate error. The network connection drops, DNS is fine. \
             The password policy and authorization roles were changed.",
            AffectedSystem::SapErp,
        );
        let skills = identify(&t);
        assert!(!skills.is_empty());
        for pair in skills.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        for s in &skills {
            assert!((20.0..=100.0).contains(&s.confidence));
        }
        assert_eq!(skills[0].skill, Skill::Security);
    }

    #[test]
    fn ties_keep_declaration_order() {
        // Database: "sql", "table" = 2/8 = 25%; Frontend: "page", "layout" = 2/8 = 25%
        let t = ticket("sql table", "page layout", AffectedSystem::Other);
        let skills = ranked_skills(&identify(&t));
        assert_eq!(skills, vec![Skill::Database, Skill::Frontend]);
    }
}
