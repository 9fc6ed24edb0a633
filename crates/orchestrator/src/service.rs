//! The exposed surface: [`TriageService`] and the collaborators it is built from.

use std::sync::Arc;

use triage::{
    EngineerRoster, IssueThread, JitterSource, LaunchDecision, SeededJitter, SequentialThreadIds,
    StaticTemplates, TemplateProvider, ThreadIdGenerator, Ticket,
};

use crate::classification::{ClassificationPipeline, ThreadMatch};
use crate::launch::{LaunchOrchestrator, LaunchResult};
use crate::{OrchestrationError, StageControl, StagePacing};

/// The external collaborators every pipeline reads from.
#[derive(Clone)]
pub struct Collaborators {
    pub roster: Arc<dyn EngineerRoster>,
    pub templates: Arc<dyn TemplateProvider>,
    pub thread_ids: Arc<dyn ThreadIdGenerator>,
    pub jitter: Arc<dyn JitterSource>,
}

impl Collaborators {
    /// Uses the built-in templates, sequential thread identifiers and an
    /// entropy-seeded jitter source.
    pub fn new(roster: Arc<dyn EngineerRoster>) -> Self {
        Self {
            roster,
            templates: Arc::new(StaticTemplates),
            thread_ids: Arc::new(SequentialThreadIds),
            jitter: Arc::new(SeededJitter::from_entropy()),
        }
    }

    pub fn with_templates(mut self, templates: Arc<dyn TemplateProvider>) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_thread_ids(mut self, thread_ids: Arc<dyn ThreadIdGenerator>) -> Self {
        self.thread_ids = thread_ids;
        self
    }

    pub fn with_jitter(mut self, jitter: Arc<dyn JitterSource>) -> Self {
        self.jitter = jitter;
        self
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Classification, decomposition, matching and launch for one ticket at a time.
///
/// Instances hold no per-ticket state, so one service can drive any number of
/// concurrent runs, each with its own [`StageControl`].
#[derive(Debug, Clone)]
pub struct TriageService {
    classification: Arc<ClassificationPipeline>,
    launch: Arc<LaunchOrchestrator>,
}

impl TriageService {
    pub fn new(collaborators: Collaborators, pacing: StagePacing) -> Self {
        Self {
            classification: Arc::new(ClassificationPipeline::new(
                collaborators.clone(),
                pacing.clone(),
            )),
            launch: Arc::new(LaunchOrchestrator::new(collaborators, pacing)),
        }
    }

    /// Returns a classified copy of `ticket`, with a lead when one qualifies
    /// and threads when it routes to CRP.
    ///
    /// # Errors
    ///
    /// [`OrchestrationError::Cancelled`] if cancelled, or a domain error if the
    /// roster fails or the ticket can no longer be classified.
    pub async fn classify(
        &self,
        ticket: &Ticket,
        control: &mut StageControl,
    ) -> Result<Ticket, OrchestrationError> {
        self.classification.classify(ticket, control).await
    }

    /// Work threads for a classified ticket; empty for an unclassified one.
    ///
    /// # Errors
    ///
    /// [`OrchestrationError::Cancelled`] if cancelled.
    pub async fn decompose(
        &self,
        ticket: &Ticket,
        control: &mut StageControl,
    ) -> Result<Vec<IssueThread>, OrchestrationError> {
        self.classification.decompose(ticket, control).await
    }

    /// Best available engineer for each thread, in thread order.
    ///
    /// # Errors
    ///
    /// [`OrchestrationError::Cancelled`] if cancelled, or a domain error if the
    /// roster fails.
    pub async fn match_engineers_for_threads(
        &self,
        threads: &[IssueThread],
        control: &mut StageControl,
    ) -> Result<Vec<ThreadMatch>, OrchestrationError> {
        self.classification
            .match_engineers_for_threads(threads, control)
            .await
    }

    /// Would `ticket` launch a CRP? No side effects and no progress.
    pub fn evaluate_launch(&self, ticket: &Ticket) -> LaunchDecision {
        self.launch.evaluate(ticket)
    }

    /// Runs the full staged launch.
    ///
    /// # Errors
    ///
    /// Only [`OrchestrationError::Cancelled`]. Failures inside the stages are
    /// reported as a failed [`LaunchResult`].
    pub async fn execute_launch(
        &self,
        ticket: &Ticket,
        control: &mut StageControl,
    ) -> Result<LaunchResult, OrchestrationError> {
        self.launch.execute(ticket, control).await
    }
}
