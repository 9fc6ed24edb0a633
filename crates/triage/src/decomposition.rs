//! Decomposition of a classified ticket into skill-scoped work threads.
//!
//! One thread is produced per sufficiently confident skill. High-complexity
//! tickets that split into several threads also receive a synthesized
//! Integration thread that ties the findings together.

use crate::catalog;
use crate::ports::{TemplateProvider, ThreadIdGenerator};
use crate::skills;
use crate::{
    ComplexityTier, IssueThread, Priority, Skill, SkillConfidence, ThreadStatus, Ticket, Urgency,
};

/// Confidence a skill must exceed to get its own thread.
pub const THREAD_CONFIDENCE_THRESHOLD: f64 = 40.0;

/// Number of top skills used when none exceeds the threshold.
pub const FALLBACK_THREAD_COUNT: usize = 2;

/// Fixed priority of the synthesized Integration thread.
pub const INTEGRATION_PRIORITY: u8 = 5;

/// Splits `ticket` into work threads, in emission order.
///
/// Unclassified tickets yield no threads.
pub fn decompose(
    ticket: &Ticket,
    templates: &dyn TemplateProvider,
    ids: &dyn ThreadIdGenerator,
) -> Vec<IssueThread> {
    let Some(classification) = ticket.classification.as_ref() else {
        return Vec::new();
    };

    let thread_skills = select_thread_skills(&skills::identify(ticket));

    let mut threads: Vec<IssueThread> = thread_skills
        .iter()
        .enumerate()
        .map(|(position, &skill)| {
            let template = templates.thread_template(skill);
            let (title, mut description) = template.render(&ticket.subject);
            let relevant =
                relevant_sentences(&ticket.description, &templates.content_keywords(skill));
            if !relevant.is_empty() {
                description = format!("{description}\n\nRelevant details: {relevant}.");
            }
            IssueThread {
                id: ids.thread_id(&ticket.id, sequence(position)),
                ticket_id: ticket.id.clone(),
                title,
                description,
                required_skills: vec![skill],
                assigned_engineer: None,
                status: ThreadStatus::Open,
                priority: thread_priority(ticket.urgency, skill, position),
                collaboration_enabled: true,
                solution: None,
            }
        })
        .collect();

    if threads.len() > 1 && classification.tier() == ComplexityTier::High {
        let (title, description) = templates.integration_template().render(&ticket.subject);
        threads.push(IssueThread {
            id: ids.thread_id(&ticket.id, sequence(threads.len())),
            ticket_id: ticket.id.clone(),
            title,
            description,
            required_skills: vec![Skill::Integration],
            assigned_engineer: None,
            status: ThreadStatus::Open,
            priority: Priority::from_raw(f64::from(INTEGRATION_PRIORITY)),
            collaboration_enabled: true,
            solution: None,
        });
    }

    tracing::debug!(
        ticket_id = %ticket.id,
        thread_count = threads.len(),
        "ticket decomposed"
    );
    threads
}

/// Skills that get a thread: those above the confidence threshold, or the top
/// two when none is.
pub fn select_thread_skills(ranked: &[SkillConfidence]) -> Vec<Skill> {
    let confident: Vec<Skill> = ranked
        .iter()
        .filter(|entry| entry.confidence > THREAD_CONFIDENCE_THRESHOLD)
        .map(|entry| entry.skill)
        .collect();
    if confident.is_empty() {
        ranked
            .iter()
            .take(FALLBACK_THREAD_COUNT)
            .map(|entry| entry.skill)
            .collect()
    } else {
        confident
    }
}

/// Priority of the skill thread at 0-based `position`.
///
/// Urgency base (Critical 10, High 8, Medium 6, Low 4), plus 2 for Security or
/// 1 for Database, minus half a point per position; clamped to `[1, 10]` and
/// rounded.
pub fn thread_priority(urgency: Urgency, skill: Skill, position: usize) -> Priority {
    let bonus = match skill {
        Skill::Security => 2.0,
        Skill::Database => 1.0,
        _ => 0.0,
    };
    let raw = catalog::urgency_priority_base(urgency) + bonus - 0.5 * position as f64;
    Priority::from_raw(raw)
}

/// Sentences of `description` that mention any of `keywords`, joined with `". "`.
fn relevant_sentences(description: &str, keywords: &[String]) -> String {
    description
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            keywords.iter().any(|k| lower.contains(k.as_str()))
        })
        .collect::<Vec<_>>()
        .join(". ")
}

fn sequence(position: usize) -> u32 {
    u32::try_from(position + 1).unwrap_or(u32::MAX)
}
