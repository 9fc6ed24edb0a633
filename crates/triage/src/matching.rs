//! Thread-to-engineer matching.
//!
//! For each available engineer:
//!
//! ```text
//! matched   = required skills with expertise > 0
//! average   = Σ expertise[matched] / |matched|        (0 when nothing matched)
//! coverage  = |matched| / |required|
//! combined  = average × coverage
//! ```
//!
//! Engineers with `combined <= 0` are discarded; the highest combined score
//! wins and equal scores keep roster order.

use crate::{Engineer, IssueThread, Skill};

/// A matched engineer and the score that selected them.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineerMatch {
    pub engineer: Engineer,
    pub score: MatchScore,
}

/// Breakdown of an engineer's fit for a set of required skills.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScore {
    pub match_count: usize,
    pub average_expertise: f64,
    pub skill_coverage: f64,
    pub combined: f64,
}

/// Scores `engineer` against `required`. All-zero when `required` is empty.
pub fn score(engineer: &Engineer, required: &[Skill]) -> MatchScore {
    let levels: Vec<u32> = required
        .iter()
        .map(|skill| engineer.expertise_in(*skill))
        .filter(|level| *level > 0)
        .collect();

    let match_count = levels.len();
    let average_expertise = if match_count == 0 {
        0.0
    } else {
        f64::from(levels.iter().sum::<u32>()) / match_count as f64
    };
    let skill_coverage = if required.is_empty() {
        0.0
    } else {
        match_count as f64 / required.len() as f64
    };

    MatchScore {
        match_count,
        average_expertise,
        skill_coverage,
        combined: average_expertise * skill_coverage,
    }
}

/// Best-fit available engineer for `thread`, or `None`.
pub fn best_engineer(thread: &IssueThread, roster: &[Engineer]) -> Option<EngineerMatch> {
    let mut best: Option<EngineerMatch> = None;
    for engineer in roster.iter().filter(|e| e.is_available()) {
        let candidate = score(engineer, &thread.required_skills);
        if candidate.combined <= 0.0 {
            continue;
        }
        if best
            .as_ref()
            .map_or(true, |b| candidate.combined > b.score.combined)
        {
            best = Some(EngineerMatch {
                engineer: engineer.clone(),
                score: candidate,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Availability, EngineerId, Priority, ThreadId, ThreadStatus, TicketId};

    fn thread(skills: Vec<Skill>) -> IssueThread {
        IssueThread {
            id: ThreadId::new("TKT-1-T1").unwrap(),
            ticket_id: TicketId::new("TKT-1").unwrap(),
            title: "t".into(),
            description: "d".into(),
            required_skills: skills,
            assigned_engineer: None,
            status: ThreadStatus::Open,
            priority: Priority::new(6).unwrap(),
            collaboration_enabled: true,
            solution: None,
        }
    }

    fn engineer(id: &str, expertise: &[(Skill, u8)]) -> Engineer {
        expertise.iter().fold(
            Engineer::new(EngineerId::new(id).unwrap(), id),
            |e, (skill, level)| e.with_expertise(*skill, *level),
        )
    }

    #[test]
    fn combined_is_average_times_coverage() {
        let e = engineer("ENG-1", &[(Skill::Database, 80), (Skill::Backend, 60)]);
        let s = score(&e, &[Skill::Database, Skill::Backend, Skill::Cloud]);
        assert_eq!(s.match_count, 2);
        assert!((s.average_expertise - 70.0).abs() < 1e-9);
        assert!((s.skill_coverage - 2.0 / 3.0).abs() < 1e-9);
        assert!((s.combined - s.average_expertise * s.skill_coverage).abs() < 1e-9);
    }

    #[test]
    fn no_engineer_with_the_skill_means_no_match() {
        let roster = vec![
            engineer("ENG-1", &[(Skill::Backend, 90)]),
            engineer("ENG-2", &[(Skill::Frontend, 0)]),
        ];
        assert!(best_engineer(&thread(vec![Skill::Frontend]), &roster).is_none());
        assert!(best_engineer(&thread(vec![Skill::Frontend]), &[]).is_none());
    }

    #[test]
    fn best_score_wins_and_ties_keep_roster_order() {
        let roster = vec![
            engineer("ENG-1", &[(Skill::Cloud, 70)]),
            engineer("ENG-2", &[(Skill::Cloud, 85)]),
            engineer("ENG-3", &[(Skill::Cloud, 85)]),
        ];
        let m = best_engineer(&thread(vec![Skill::Cloud]), &roster).unwrap();
        assert_eq!(m.engineer.id.as_str(), "ENG-2");
        assert!((m.score.combined - 85.0).abs() < 1e-9);
    }

    #[test]
    fn unavailable_engineers_are_skipped() {
        let roster = vec![
            engineer("ENG-1", &[(Skill::Cloud, 99)]).with_availability(Availability::Busy),
            engineer("ENG-2", &[(Skill::Cloud, 40)]),
        ];
        let m = best_engineer(&thread(vec![Skill::Cloud]), &roster).unwrap();
        assert_eq!(m.engineer.id.as_str(), "ENG-2");
    }

    #[test]
    fn empty_requirements_score_zero() {
        let e = engineer("ENG-1", &[(Skill::Cloud, 99)]);
        assert_eq!(score(&e, &[]).combined, 0.0);
        assert!(best_engineer(&thread(vec![]), &[e]).is_none());
    }
}
