//! Static configuration tables.
//!
//! Keyword weights, system weights, skill keyword lists, fallback skills and
//! thread text templates live here as data keyed by enum, so each table can be
//! inspected and tested on its own and swapped behind the
//! [`crate::ports::TemplateProvider`] port.

use crate::{AffectedSystem, Skill, SkillConfidence, Urgency};

// ---------------------------------------------------------------------------
// Complexity tables
// ---------------------------------------------------------------------------

/// Domain keywords that raise complexity, with their weight.
///
/// Matched as lowercase substrings; each keyword counts once.
pub const COMPLEXITY_KEYWORDS: [(&str, u32); 20] = [
    ("integration", 3),
    ("migration", 4),
    ("performance", 3),
    ("security", 4),
    ("outage", 4),
    ("data loss", 4),
    ("corruption", 4),
    ("deadlock", 4),
    ("timeout", 2),
    ("authentication", 3),
    ("authorization", 3),
    ("interface", 2),
    ("upgrade", 3),
    ("custom", 2),
    ("workflow", 2),
    ("batch", 2),
    ("replication", 3),
    ("encryption", 3),
    ("latency", 2),
    ("crash", 3),
];

/// Upper bound on the summed keyword contribution.
pub const KEYWORD_WEIGHT_CAP: u32 = 25;

/// Complexity contribution of the declared urgency.
pub fn urgency_complexity_weight(urgency: Urgency) -> u32 {
    match urgency {
        Urgency::Critical => 20,
        Urgency::High => 15,
        Urgency::Medium => 10,
        Urgency::Low => 5,
    }
}

/// Complexity contribution of the affected system; unknown systems weigh 10.
pub fn system_weight(system: AffectedSystem) -> u32 {
    match system {
        AffectedSystem::SapErp => 15,
        AffectedSystem::SapS4Hana => 18,
        AffectedSystem::SapSuccessFactors => 12,
        AffectedSystem::SapCustomerExperience => 10,
        AffectedSystem::SapBusinessTechnologyPlatform => 20,
        AffectedSystem::SapAriba => 12,
        AffectedSystem::SapConcur => 8,
        AffectedSystem::SapAnalyticsCloud => 14,
        AffectedSystem::Other => 10,
    }
}

// ---------------------------------------------------------------------------
// Urgency tables
// ---------------------------------------------------------------------------

/// Lower bound of the 20-point urgency-score band for each tier.
pub fn urgency_score_floor(urgency: Urgency) -> f64 {
    match urgency {
        Urgency::Critical => 80.0,
        Urgency::High => 60.0,
        Urgency::Medium => 40.0,
        Urgency::Low => 20.0,
    }
}

/// Width of every urgency-score band.
pub const URGENCY_BAND_WIDTH: f64 = 20.0;

/// Starting thread priority for each urgency tier.
pub fn urgency_priority_base(urgency: Urgency) -> f64 {
    match urgency {
        Urgency::Critical => 10.0,
        Urgency::High => 8.0,
        Urgency::Medium => 6.0,
        Urgency::Low => 4.0,
    }
}

// ---------------------------------------------------------------------------
// Skill tables
// ---------------------------------------------------------------------------

/// Keywords whose presence in the ticket text signals `skill`.
pub fn skill_keywords(skill: Skill) -> &'static [&'static str] {
    match skill {
        Skill::Database => &[
            "database",
            "sql",
            "query",
            "table",
            "index",
            "hana",
            "deadlock",
            "replication",
        ],
        Skill::Frontend => &[
            "frontend",
            "screen",
            "button",
            "page",
            "display",
            "fiori",
            "browser",
            "layout",
        ],
        Skill::Backend => &[
            "backend",
            "abap",
            "server",
            "api",
            "service",
            "batch",
            "job",
            "function module",
        ],
        Skill::Network => &[
            "network",
            "connection",
            "timeout",
            "latency",
            "firewall",
            "dns",
            "vpn",
        ],
        Skill::Security => &[
            "security",
            "authentication",
            "authorization",
            "password",
            "login",
            "roles",
            "certificate",
            "encryption",
            "sso",
        ],
        Skill::DevOps => &[
            "deploy",
            "pipeline",
            "transport",
            "release",
            "monitoring",
            "container",
            "rollback",
        ],
        Skill::Integration => &[
            "integration",
            "interface",
            "idoc",
            "rfc",
            "odata",
            "middleware",
            "sync",
            "cpi",
        ],
        Skill::Analytics => &[
            "report",
            "dashboard",
            "analytics",
            "kpi",
            "chart",
            "forecast",
        ],
        Skill::Mobile => &[
            "mobile",
            "ios",
            "android",
            "mobile app",
            "tablet",
            "offline",
            "push notification",
        ],
        Skill::Cloud => &[
            "cloud",
            "btp",
            "tenant",
            "subaccount",
            "kubernetes",
            "scaling",
            "cloud foundry",
        ],
        Skill::Ux => &[
            "usability",
            "user experience",
            "navigation",
            "accessibility",
            "confusing",
            "intuitive",
            "onboarding",
        ],
    }
}

/// Minimum confidence for an inferred skill to be kept.
pub const MIN_SKILL_CONFIDENCE: f64 = 20.0;

/// Skills assumed when no keyword evidence exists, per affected system.
pub fn fallback_skills(system: AffectedSystem) -> Vec<SkillConfidence> {
    match system {
        AffectedSystem::SapErp | AffectedSystem::SapS4Hana => vec![
            SkillConfidence::new(Skill::Backend, 70.0),
            SkillConfidence::new(Skill::Database, 60.0),
        ],
        AffectedSystem::SapSuccessFactors | AffectedSystem::SapCustomerExperience => vec![
            SkillConfidence::new(Skill::Frontend, 70.0),
            SkillConfidence::new(Skill::Integration, 60.0),
        ],
        AffectedSystem::SapBusinessTechnologyPlatform => vec![
            SkillConfidence::new(Skill::Cloud, 80.0),
            SkillConfidence::new(Skill::Integration, 70.0),
        ],
        _ => vec![SkillConfidence::new(Skill::Backend, 60.0)],
    }
}

// ---------------------------------------------------------------------------
// Thread templates
// ---------------------------------------------------------------------------

/// Title and description text for a skill-scoped thread.
///
/// `{subject}` in either field is replaced with the ticket subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadTemplate {
    pub title: String,
    pub description: String,
}

impl ThreadTemplate {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Returns `(title, description)` with placeholders filled in.
    pub fn render(&self, subject: &str) -> (String, String) {
        (
            self.title.replace("{subject}", subject),
            self.description.replace("{subject}", subject),
        )
    }
}

/// Built-in template for `skill`.
pub fn default_template(skill: Skill) -> ThreadTemplate {
    let (title, description) = match skill {
        Skill::Database => (
            "Database analysis: {subject}",
            "Investigate queries, locks, indexes and data consistency related to the reported issue.",
        ),
        Skill::Frontend => (
            "Frontend investigation: {subject}",
            "Reproduce the problem in the user interface and isolate rendering or client-side faults.",
        ),
        Skill::Backend => (
            "Backend investigation: {subject}",
            "Trace server-side processing, background jobs and service calls involved in the issue.",
        ),
        Skill::Network => (
            "Network diagnostics: {subject}",
            "Check connectivity, latency, DNS and firewall paths between the affected components.",
        ),
        Skill::Security => (
            "Security review: {subject}",
            "Assess authentication, authorization and certificate configuration for the affected flow.",
        ),
        Skill::DevOps => (
            "Deployment review: {subject}",
            "Review recent transports, releases and monitoring signals that may relate to the issue.",
        ),
        Skill::Integration => (
            "Integration analysis: {subject}",
            "Verify interfaces, message flows and middleware mappings between the connected systems.",
        ),
        Skill::Analytics => (
            "Analytics validation: {subject}",
            "Validate report definitions, data sources and KPI calculations affected by the issue.",
        ),
        Skill::Mobile => (
            "Mobile investigation: {subject}",
            "Reproduce the issue on mobile clients and check offline and synchronisation behaviour.",
        ),
        Skill::Cloud => (
            "Cloud platform review: {subject}",
            "Inspect tenant, subaccount and runtime configuration on the cloud platform.",
        ),
        Skill::Ux => (
            "User experience review: {subject}",
            "Evaluate navigation, accessibility and usability problems reported by users.",
        ),
    };
    ThreadTemplate::new(title, description)
}

/// Template for the synthesized cross-skill integration thread.
pub fn integration_thread_template() -> ThreadTemplate {
    ThreadTemplate::new(
        "Cross-team integration: {subject}",
        "Consolidate findings from all threads and validate the end-to-end resolution.",
    )
}
