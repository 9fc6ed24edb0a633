//! The staged CRP launch.
//!
//! ```text
//! Evaluating ──reject──▶ Rejected
//!     │
//!   accept
//!     ▼
//!  Running ──ok──▶ Completed
//!     │
//!   error ──▶ Failed
//! ```
//!
//! `Running` executes the six [`LaunchStage`]s in order. Each stage reports
//! its checkpoint, waits out its pacing, and then does its work. Cancellation
//! is observed at those two suspension points only, so a stage's work is
//! never half-applied; a cancelled launch yields no result at all.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::Instrument;
use triage::{
    complexity, decomposition, lead, matching, routing, Engineer, EngineerId, IssueThread,
    LaunchDecision, LaunchReason, LaunchRunId, Ticket, TicketId,
};

use crate::{Collaborators, LaunchStage, OrchestrationError, StageControl, StagePacing};

/// Lifecycle of one launch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LaunchState {
    Evaluating,
    Rejected,
    Running,
    Completed,
    Failed,
}

impl LaunchState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            LaunchState::Rejected | LaunchState::Completed | LaunchState::Failed
        )
    }
}

/// Outcome of a launch that was not cancelled.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchResult {
    pub run_id: LaunchRunId,
    pub ticket_id: TicketId,
    /// Always terminal.
    pub state: LaunchState,
    pub should_launch: bool,
    pub reason: LaunchReason,
    pub lead: Option<Engineer>,
    pub threads: Vec<IssueThread>,
    /// Labels of the stages that reported, in order.
    pub stages: Vec<String>,
    /// Sum of the configured stage durations; zero unless the launch ran.
    pub estimated_duration: Duration,
    /// Wall time on the tokio clock.
    pub elapsed: Duration,
}

/// What the six stages produce.
struct StageOutput {
    lead: Option<Engineer>,
    threads: Vec<IssueThread>,
}

/// Runs launches. Holds no per-run state.
#[derive(Debug, Clone)]
pub struct LaunchOrchestrator {
    collaborators: Collaborators,
    pacing: StagePacing,
}

impl LaunchOrchestrator {
    pub fn new(collaborators: Collaborators, pacing: StagePacing) -> Self {
        Self {
            collaborators,
            pacing,
        }
    }

    /// The synchronous "would this launch" check.
    pub fn evaluate(&self, ticket: &Ticket) -> LaunchDecision {
        routing::evaluate_for_launch(ticket)
    }

    /// Evaluates `ticket` and, if accepted, runs every stage.
    ///
    /// # Errors
    ///
    /// [`OrchestrationError::Cancelled`] when the run is cancelled. Every
    /// other failure produces a [`LaunchState::Failed`] result.
    pub async fn execute(
        &self,
        ticket: &Ticket,
        control: &mut StageControl,
    ) -> Result<LaunchResult, OrchestrationError> {
        let run_id = LaunchRunId::new_random();
        let span = tracing::info_span!("crp_launch", %run_id, ticket_id = %ticket.id);
        self.execute_run(run_id, ticket, control)
            .instrument(span)
            .await
    }

    async fn execute_run(
        &self,
        run_id: LaunchRunId,
        ticket: &Ticket,
        control: &mut StageControl,
    ) -> Result<LaunchResult, OrchestrationError> {
        let started = Instant::now();
        control.begin_run();
        control.ensure_active()?;

        let mut state = LaunchState::Evaluating;
        let decision = self.evaluate(ticket);
        let base = LaunchResult {
            run_id,
            ticket_id: ticket.id.clone(),
            state,
            should_launch: decision.should_launch,
            reason: decision.reason,
            lead: None,
            threads: Vec::new(),
            stages: Vec::new(),
            estimated_duration: Duration::ZERO,
            elapsed: Duration::ZERO,
        };

        if !decision.should_launch {
            state = transition(state, LaunchState::Rejected);
            tracing::info!(reason = %decision.reason, "launch rejected");
            return Ok(LaunchResult {
                state,
                elapsed: started.elapsed(),
                ..base
            });
        }

        state = transition(state, LaunchState::Running);
        tracing::info!(reason = %decision.reason, "launch accepted");

        match self.run_stages(ticket, control).await {
            Ok(output) => {
                state = transition(state, LaunchState::Completed);
                tracing::info!(
                    lead = output.lead.as_ref().map(|e| e.id.as_str()),
                    threads = output.threads.len(),
                    "launch completed"
                );
                Ok(LaunchResult {
                    state,
                    lead: output.lead,
                    threads: output.threads,
                    stages: control.labels().to_vec(),
                    estimated_duration: self.pacing.launch_total(),
                    elapsed: started.elapsed(),
                    ..base
                })
            }
            Err(OrchestrationError::Cancelled) => {
                tracing::info!("launch cancelled");
                Err(OrchestrationError::Cancelled)
            }
            Err(err) => {
                state = transition(state, LaunchState::Failed);
                tracing::error!(error = %err, "launch failed");
                Ok(LaunchResult {
                    state,
                    should_launch: false,
                    reason: LaunchReason::SystemError,
                    stages: control.labels().to_vec(),
                    estimated_duration: self.pacing.launch_total(),
                    elapsed: started.elapsed(),
                    ..base
                })
            }
        }
    }

    async fn run_stages(
        &self,
        ticket: &Ticket,
        control: &mut StageControl,
    ) -> Result<StageOutput, OrchestrationError> {
        self.enter(control, LaunchStage::LeadLookup).await?;
        let leads = self.collaborators.roster.list_leads().await?;
        let lead = lead::select_lead(ticket, &leads).map(|selection| selection.engineer);

        self.enter(control, LaunchStage::ComplexityReview).await?;
        let review = complexity::assess(ticket);
        tracing::debug!(score = review.score.as_f64(), tier = ?review.tier, "complexity reviewed");

        self.enter(control, LaunchStage::Decomposition).await?;
        let threads = decomposition::decompose(
            ticket,
            self.collaborators.templates.as_ref(),
            self.collaborators.thread_ids.as_ref(),
        );

        self.enter(control, LaunchStage::EngineerMatching).await?;
        let threads = self.assign_engineers(threads).await?;

        self.enter(control, LaunchStage::CollaborationChannels).await?;
        tracing::debug!(threads = threads.len(), "collaboration channels ready");

        self.enter(control, LaunchStage::Ready).await?;
        Ok(StageOutput { lead, threads })
    }

    /// Matches every thread concurrently against one roster snapshot, then
    /// assigns the winners in thread order.
    async fn assign_engineers(
        &self,
        threads: Vec<IssueThread>,
    ) -> Result<Vec<IssueThread>, OrchestrationError> {
        let available = Arc::new(self.collaborators.roster.list_available().await?);

        let mut tasks = JoinSet::new();
        for (index, thread) in threads.iter().cloned().enumerate() {
            let roster = Arc::clone(&available);
            tasks.spawn(async move {
                let winner = matching::best_engineer(&thread, &roster).map(|m| m.engineer.id);
                (index, winner)
            });
        }

        let mut winners: Vec<Option<EngineerId>> = vec![None; threads.len()];
        while let Some(joined) = tasks.join_next().await {
            let (index, winner) = joined.map_err(|err| OrchestrationError::StageTask {
                reason: err.to_string(),
            })?;
            winners[index] = winner;
        }

        threads
            .into_iter()
            .zip(winners)
            .map(|(thread, winner)| match winner {
                Some(engineer) => thread.assign(engineer),
                None => Ok(thread),
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(OrchestrationError::from)
    }

    async fn enter(
        &self,
        control: &mut StageControl,
        stage: LaunchStage,
    ) -> Result<(), OrchestrationError> {
        control.checkpoint(stage.percent(), stage.label())?;
        control.pace(self.pacing.launch_stage(stage)).await
    }
}

fn transition(from: LaunchState, to: LaunchState) -> LaunchState {
    debug_assert!(!from.is_terminal(), "launch already finished as {from:?}");
    tracing::debug!(from = ?from, to = ?to, "launch state changed");
    to
}
