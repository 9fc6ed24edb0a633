//! A small demonstration roster.

use triage::{Availability, Engineer, EngineerId, Skill};

use crate::InMemoryRoster;

fn engineer(id: &str, name: &str, expertise: &[(Skill, u8)]) -> Option<Engineer> {
    let base = Engineer::new(EngineerId::new(id)?, name);
    Some(
        expertise
            .iter()
            .fold(base, |e, &(skill, level)| e.with_expertise(skill, level)),
    )
}

/// Eight engineers covering every skill, three of them lead-capable.
pub fn demo_engineers() -> Vec<Engineer> {
    let entries = [
        engineer("ENG-001", "Priya Raman", &[(Skill::Database, 95), (Skill::Backend, 30)])
            .map(Engineer::as_lead),
        engineer("ENG-002", "Marcus Feld", &[(Skill::Security, 92), (Skill::Network, 25)])
            .map(Engineer::as_lead),
        engineer(
            "ENG-003",
            "Lena Ortiz",
            &[(Skill::Cloud, 88), (Skill::DevOps, 70), (Skill::Integration, 60)],
        )
        .map(Engineer::as_lead),
        engineer("ENG-004", "Tomas Berg", &[(Skill::Backend, 85), (Skill::Integration, 75)]),
        engineer(
            "ENG-005",
            "Aiko Sato",
            &[(Skill::Frontend, 90), (Skill::Ux, 80), (Skill::Mobile, 55)],
        ),
        engineer("ENG-006", "Noah Kim", &[(Skill::Network, 80), (Skill::Security, 50)]),
        engineer("ENG-007", "Sara Njoku", &[(Skill::Analytics, 85), (Skill::Database, 60)])
            .map(|e| e.with_availability(Availability::Busy)),
        engineer("ENG-008", "Jonas Weber", &[(Skill::Mobile, 80), (Skill::Frontend, 45)])
            .map(|e| e.with_availability(Availability::Offline)),
    ];
    entries.into_iter().flatten().collect()
}

/// [`demo_engineers`] in an [`InMemoryRoster`].
pub fn demo_roster() -> InMemoryRoster {
    InMemoryRoster::new(demo_engineers()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_skill_is_covered() {
        let engineers = demo_engineers();
        assert_eq!(engineers.len(), 8);
        for skill in Skill::ALL {
            assert!(engineers.iter().any(|e| e.skills.contains(&skill)), "{skill} uncovered");
        }
    }
}
