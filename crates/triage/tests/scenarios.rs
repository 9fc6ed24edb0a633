//! End-to-end decision scenarios through the public API of the triage crate.

use triage::{
    classifier, complexity, decomposition, lead, matching, routing, AffectedSystem,
    Classification, ComplexityAssessment, ComplexityTier, Engineer, EngineerId, FixedJitter,
    RoutingRecommendation, Score, SequentialThreadIds, Skill, StaticTemplates, Ticket, TicketId,
    Timestamp, Urgency,
};

fn ticket(subject: &str, description: &str, urgency: Urgency, system: AffectedSystem) -> Ticket {
    Ticket::new(
        TicketId::new("TKT-100").unwrap(),
        subject,
        description,
        urgency,
        system,
    )
}

fn with_classification(mut t: Ticket, tier: ComplexityTier, skills: Vec<Skill>) -> Ticket {
    t.classification = Some(Classification {
        urgency_score: Score::clamped(50.0),
        complexity: ComplexityAssessment {
            score: Score::clamped(match tier {
                ComplexityTier::High => 80.0,
                ComplexityTier::Medium => 55.0,
                ComplexityTier::Low => 20.0,
            }),
            tier,
        },
        skill_tags: skills,
        recommendation: RoutingRecommendation::Standard,
        confidence: Score::clamped(75.0),
        classified_at: Timestamp::now(),
    });
    t
}

fn engineer(id: &str, expertise: &[(Skill, u8)]) -> Engineer {
    expertise.iter().fold(
        Engineer::new(EngineerId::new(id).unwrap(), id),
        |e, (skill, level)| e.with_expertise(*skill, *level),
    )
}

// ============================================================================
// Scenario A: complexity factors add up
// ============================================================================

#[test]
fn long_critical_platform_ticket_is_high_complexity() {
    let t = ticket(
        "Help",
        &"a".repeat(600),
        Urgency::Critical,
        AffectedSystem::from_label("SAP Business Technology Platform"),
    )
    .with_attachments(4);

    let assessment = complexity::assess(&t);
    assert_eq!(assessment.score.as_f64(), 75.0);
    assert_eq!(assessment.tier, ComplexityTier::High);
}

// ============================================================================
// Scenario B: three skills launch a medium ticket
// ============================================================================

#[test]
fn three_skill_medium_ticket_launches() {
    let t = with_classification(
        ticket("s", "d", Urgency::Low, AffectedSystem::SapErp),
        ComplexityTier::Medium,
        vec![Skill::Database, Skill::Security, Skill::Cloud],
    );
    let decision = routing::evaluate_for_launch(&t);
    assert!(decision.should_launch);
    assert_eq!(
        decision.reason,
        triage::LaunchReason::MultiSkill { count: 3 }
    );
    assert!(!routing::should_route_to_crp(ComplexityTier::Medium, Urgency::Low));
}

// ============================================================================
// Scenario C: dominance qualifies a lead
// ============================================================================

#[test]
fn security_specialist_becomes_lead() {
    let t = with_classification(
        ticket("s", "d", Urgency::High, AffectedSystem::SapErp),
        ComplexityTier::High,
        vec![Skill::Security, Skill::Network],
    );
    let roster = vec![
        engineer("ENG-1", &[(Skill::Security, 55), (Skill::Network, 45)]).as_lead(),
        engineer("ENG-2", &[(Skill::Security, 90), (Skill::Network, 10)]).as_lead(),
    ];
    let selection = lead::select_lead(&t, &roster).unwrap();
    assert_eq!(selection.engineer.id.as_str(), "ENG-2");
    assert_eq!(selection.primary_skill, Skill::Security);
    assert!((selection.dominance - 0.9).abs() < 1e-9);
}

// ============================================================================
// Scenario D: no matching expertise
// ============================================================================

#[test]
fn frontend_thread_without_frontend_engineers_is_unmatched() {
    let t = with_classification(
        ticket(
            "Fiori page layout broken",
            "The screen shows a broken button and the browser display is off.",
            Urgency::Medium,
            AffectedSystem::SapSuccessFactors,
        ),
        ComplexityTier::Medium,
        vec![Skill::Frontend],
    );
    let threads = decomposition::decompose(&t, &StaticTemplates, &SequentialThreadIds);
    let frontend = threads
        .iter()
        .find(|th| th.required_skills == vec![Skill::Frontend])
        .unwrap();

    let roster = vec![
        engineer("ENG-1", &[(Skill::Backend, 90)]),
        engineer("ENG-2", &[(Skill::Database, 80), (Skill::Frontend, 0)]),
    ];
    assert!(matching::best_engineer(frontend, &roster).is_none());
}

// ============================================================================
// Scenario E: integration thread only for high complexity
// ============================================================================

#[test]
fn integration_thread_depends_on_tier() {
    let description = "The ABAP batch job on the server fails. \
        The HANA database query hits a deadlock on the index table.";
    let base = ticket("Nightly run", description, Urgency::High, AffectedSystem::SapS4Hana);

    let high = with_classification(base.clone(), ComplexityTier::High, vec![]);
    let threads = decomposition::decompose(&high, &StaticTemplates, &SequentialThreadIds);
    assert_eq!(threads.len(), 3);
    assert_eq!(threads[2].required_skills, vec![Skill::Integration]);
    assert_eq!(threads[2].priority.as_u8(), 5);

    let medium = with_classification(base, ComplexityTier::Medium, vec![]);
    let threads = decomposition::decompose(&medium, &StaticTemplates, &SequentialThreadIds);
    assert_eq!(threads.len(), 2);
}

// ============================================================================
// Classification round trip
// ============================================================================

#[test]
fn classification_is_reproducible_with_fixed_jitter() {
    let t = ticket(
        "Replication deadlock",
        "The HANA database replication stalls with a deadlock on the index table.",
        Urgency::High,
        AffectedSystem::SapS4Hana,
    );
    let jitter = FixedJitter::new(0.25);
    let a = classifier::classify(&t, &jitter);
    let b = classifier::classify(&t, &jitter);
    assert_eq!(a.urgency_score, b.urgency_score);
    assert_eq!(a.confidence, b.confidence);
    assert_eq!(a.complexity, b.complexity);
    assert_eq!(a.skill_tags, b.skill_tags);
    assert_eq!(a.skill_tags[0], Skill::Database);
    assert!((60.0..=95.0).contains(&a.confidence.as_f64()));
    assert!((60.0..=80.0).contains(&a.urgency_score.as_f64()));
}
