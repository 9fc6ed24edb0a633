//! Stage checkpoints and their pacing.
//!
//! Every pipeline reports a fixed, ordered sequence of `(percent, label)`
//! checkpoints. The pacing configuration assigns each stage a duration that
//! is awaited on the tokio clock after the checkpoint is reported, emulating
//! variable-latency work. Under `tokio::time::pause` the wait is virtual.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Launch stages
// ---------------------------------------------------------------------------

/// The six stages of a running CRP launch, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaunchStage {
    LeadLookup,
    ComplexityReview,
    Decomposition,
    EngineerMatching,
    CollaborationChannels,
    Ready,
}

impl LaunchStage {
    pub const ALL: [LaunchStage; 6] = [
        LaunchStage::LeadLookup,
        LaunchStage::ComplexityReview,
        LaunchStage::Decomposition,
        LaunchStage::EngineerMatching,
        LaunchStage::CollaborationChannels,
        LaunchStage::Ready,
    ];

    pub fn percent(self) -> u8 {
        match self {
            LaunchStage::LeadLookup => 15,
            LaunchStage::ComplexityReview => 30,
            LaunchStage::Decomposition => 50,
            LaunchStage::EngineerMatching => 75,
            LaunchStage::CollaborationChannels => 90,
            LaunchStage::Ready => 100,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LaunchStage::LeadLookup => "Identifying lead engineer",
            LaunchStage::ComplexityReview => "Analyzing ticket complexity",
            LaunchStage::Decomposition => "Decomposing into issue threads",
            LaunchStage::EngineerMatching => "Matching engineers to threads",
            LaunchStage::CollaborationChannels => "Initializing collaboration channels",
            LaunchStage::Ready => "CRP ready",
        }
    }
}

// ---------------------------------------------------------------------------
// Classification stages
// ---------------------------------------------------------------------------

/// Checkpoints of the classification pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationStage {
    Start,
    Extraction,
    Complexity,
    ComplexityScored,
    Skills,
    Routing,
    LeadSelection,
    Decomposition,
    Complete,
}

impl ClassificationStage {
    pub const ALL: [ClassificationStage; 9] = [
        ClassificationStage::Start,
        ClassificationStage::Extraction,
        ClassificationStage::Complexity,
        ClassificationStage::ComplexityScored,
        ClassificationStage::Skills,
        ClassificationStage::Routing,
        ClassificationStage::LeadSelection,
        ClassificationStage::Decomposition,
        ClassificationStage::Complete,
    ];

    pub fn percent(self) -> u8 {
        match self {
            ClassificationStage::Start => 0,
            ClassificationStage::Extraction => 10,
            ClassificationStage::Complexity => 20,
            ClassificationStage::ComplexityScored => 25,
            ClassificationStage::Skills => 30,
            ClassificationStage::Routing => 50,
            ClassificationStage::LeadSelection => 60,
            ClassificationStage::Decomposition => 80,
            ClassificationStage::Complete => 100,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClassificationStage::Start => "Starting AI analysis",
            ClassificationStage::Extraction => "Extracting ticket features",
            ClassificationStage::Complexity => "Scoring complexity",
            ClassificationStage::ComplexityScored => "Complexity scored",
            ClassificationStage::Skills => "Identifying required skills",
            ClassificationStage::Routing => "Determining routing",
            ClassificationStage::LeadSelection => "Selecting lead engineer",
            ClassificationStage::Decomposition => "Creating issue threads",
            ClassificationStage::Complete => "Classification complete",
        }
    }
}

// ---------------------------------------------------------------------------
// Pacing
// ---------------------------------------------------------------------------

/// Per-stage durations, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagePacing {
    /// Wait after each classification checkpoint except the last.
    pub classification_step_ms: u64,
    /// Wait after each standalone decomposition or matching checkpoint.
    pub auxiliary_step_ms: u64,
    pub lead_lookup_ms: u64,
    pub complexity_review_ms: u64,
    pub decomposition_ms: u64,
    pub engineer_matching_ms: u64,
    pub collaboration_channels_ms: u64,
    pub ready_ms: u64,
}

impl Default for StagePacing {
    fn default() -> Self {
        Self {
            classification_step_ms: 300,
            auxiliary_step_ms: 200,
            lead_lookup_ms: 800,
            complexity_review_ms: 600,
            decomposition_ms: 1000,
            engineer_matching_ms: 1200,
            collaboration_channels_ms: 800,
            ready_ms: 400,
        }
    }
}

impl StagePacing {
    /// No waits at all.
    pub fn immediate() -> Self {
        Self {
            classification_step_ms: 0,
            auxiliary_step_ms: 0,
            lead_lookup_ms: 0,
            complexity_review_ms: 0,
            decomposition_ms: 0,
            engineer_matching_ms: 0,
            collaboration_channels_ms: 0,
            ready_ms: 0,
        }
    }

    pub fn launch_stage(&self, stage: LaunchStage) -> Duration {
        let ms = match stage {
            LaunchStage::LeadLookup => self.lead_lookup_ms,
            LaunchStage::ComplexityReview => self.complexity_review_ms,
            LaunchStage::Decomposition => self.decomposition_ms,
            LaunchStage::EngineerMatching => self.engineer_matching_ms,
            LaunchStage::CollaborationChannels => self.collaboration_channels_ms,
            LaunchStage::Ready => self.ready_ms,
        };
        Duration::from_millis(ms)
    }

    /// Total time a completed launch spends in its stages.
    pub fn launch_total(&self) -> Duration {
        LaunchStage::ALL
            .into_iter()
            .map(|stage| self.launch_stage(stage))
            .sum()
    }

    pub fn classification_step(&self) -> Duration {
        Duration::from_millis(self.classification_step_ms)
    }

    pub fn auxiliary_step(&self) -> Duration {
        Duration::from_millis(self.auxiliary_step_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_checkpoints_are_fixed_and_increasing() {
        let percents: Vec<u8> = LaunchStage::ALL.iter().map(|s| s.percent()).collect();
        assert_eq!(percents, vec![15, 30, 50, 75, 90, 100]);
    }

    #[test]
    fn classification_checkpoints_are_fixed_and_increasing() {
        let percents: Vec<u8> = ClassificationStage::ALL.iter().map(|s| s.percent()).collect();
        assert_eq!(percents, vec![0, 10, 20, 25, 30, 50, 60, 80, 100]);
    }

    #[test]
    fn default_launch_total_sums_stage_durations() {
        assert_eq!(StagePacing::default().launch_total(), Duration::from_millis(4800));
        assert_eq!(StagePacing::immediate().launch_total(), Duration::ZERO);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let pacing: StagePacing = serde_json::from_str(r#"{ "ready_ms": 5 }"#).unwrap();
        assert_eq!(pacing.ready_ms, 5);
        assert_eq!(pacing.lead_lookup_ms, 800);
    }
}
