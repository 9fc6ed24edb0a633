//! The pre-commit pipelines: classify a raw ticket, decompose it, and match
//! engineers to its threads.
//!
//! Each pipeline reports its own independent checkpoint sequence through a
//! [`StageControl`] and suspends between checkpoints according to
//! [`StagePacing`]. The domain work itself is delegated to the pure functions
//! of the `triage` crate; this module only sequences it and reads the roster.

use serde::Serialize;
use tracing::instrument;
use triage::{
    classifier, complexity, decomposition, lead, matching, skills, Engineer, IssueThread,
    RoutingRecommendation, Ticket,
};

use crate::{ClassificationStage, Collaborators, OrchestrationError, StageControl, StagePacing};

/// A thread paired with the engineer chosen for it, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadMatch {
    pub thread: IssueThread,
    pub engineer: Option<Engineer>,
}

/// Sequences classification, standalone decomposition, and thread matching.
#[derive(Debug, Clone)]
pub struct ClassificationPipeline {
    collaborators: Collaborators,
    pacing: StagePacing,
}

impl ClassificationPipeline {
    pub fn new(collaborators: Collaborators, pacing: StagePacing) -> Self {
        Self {
            collaborators,
            pacing,
        }
    }

    /// Classifies `ticket`, selects a lead, and decomposes it when CRP-routed.
    ///
    /// Checkpoints: 0, 10, 20, 25, 30, 50, 60, 80, 100. The decomposition
    /// checkpoint is reported even when no threads are created.
    #[instrument(skip_all, fields(ticket_id = %ticket.id))]
    pub async fn classify(
        &self,
        ticket: &Ticket,
        control: &mut StageControl,
    ) -> Result<Ticket, OrchestrationError> {
        control.begin_run();
        self.step(control, ClassificationStage::Start).await?;
        self.step(control, ClassificationStage::Extraction).await?;

        self.step(control, ClassificationStage::Complexity).await?;
        let assessment = complexity::assess(ticket);

        self.step(control, ClassificationStage::ComplexityScored).await?;
        tracing::debug!(
            score = assessment.score.as_f64(),
            tier = ?assessment.tier,
            "complexity scored"
        );

        self.step(control, ClassificationStage::Skills).await?;
        let ranked = skills::identify(ticket);

        self.step(control, ClassificationStage::Routing).await?;
        let classification = classifier::assemble(
            ticket.urgency,
            assessment,
            &ranked,
            self.collaborators.jitter.as_ref(),
        );
        let routed_to_crp = classification.recommendation == RoutingRecommendation::Crp;
        // Lead selection and decomposition read the classification from the ticket.
        let staged = ticket.classified(classification.clone(), None, Vec::new())?;

        self.step(control, ClassificationStage::LeadSelection).await?;
        let leads = self.collaborators.roster.list_leads().await?;
        let lead_id = lead::select_lead(&staged, &leads).map(|selection| selection.engineer.id);

        self.step(control, ClassificationStage::Decomposition).await?;
        let threads = if routed_to_crp {
            decomposition::decompose(
                &staged,
                self.collaborators.templates.as_ref(),
                self.collaborators.thread_ids.as_ref(),
            )
        } else {
            Vec::new()
        };

        control.checkpoint(
            ClassificationStage::Complete.percent(),
            ClassificationStage::Complete.label(),
        )?;

        tracing::info!(
            urgency_score = classification.urgency_score.as_f64(),
            complexity = classification.complexity.score.as_f64(),
            recommendation = ?classification.recommendation,
            skills = classification.skill_tags.len(),
            lead = lead_id.as_ref().map(|id| id.as_str()),
            threads = threads.len(),
            "ticket classified"
        );
        Ok(ticket.classified(classification, lead_id, threads)?)
    }

    /// Decomposes an already classified ticket. Checkpoints: 0, 50, 100.
    #[instrument(skip_all, fields(ticket_id = %ticket.id))]
    pub async fn decompose(
        &self,
        ticket: &Ticket,
        control: &mut StageControl,
    ) -> Result<Vec<IssueThread>, OrchestrationError> {
        control.begin_run();
        control.checkpoint(0, "Analyzing required skills")?;
        control.pace(self.pacing.auxiliary_step()).await?;

        control.checkpoint(50, "Generating issue threads")?;
        control.pace(self.pacing.auxiliary_step()).await?;
        let threads = decomposition::decompose(
            ticket,
            self.collaborators.templates.as_ref(),
            self.collaborators.thread_ids.as_ref(),
        );

        control.checkpoint(100, "Issue threads ready")?;
        tracing::debug!(threads = threads.len(), "ticket decomposed");
        Ok(threads)
    }

    /// Matches every thread against one roster snapshot taken up front.
    ///
    /// Checkpoints: 0, then one per thread at `100 × (i + 1) / n`; a single
    /// 100 checkpoint when there are no threads.
    #[instrument(skip_all, fields(threads = threads.len()))]
    pub async fn match_engineers_for_threads(
        &self,
        threads: &[IssueThread],
        control: &mut StageControl,
    ) -> Result<Vec<ThreadMatch>, OrchestrationError> {
        control.begin_run();
        control.checkpoint(0, "Loading engineer roster")?;
        let available = self.collaborators.roster.list_available().await?;

        if threads.is_empty() {
            control.checkpoint(100, "No threads to match")?;
            return Ok(Vec::new());
        }

        let total = threads.len();
        let mut matches = Vec::with_capacity(total);
        for (index, thread) in threads.iter().enumerate() {
            control.pace(self.pacing.auxiliary_step()).await?;
            let engineer = matching::best_engineer(thread, &available).map(|m| m.engineer);
            let percent = u8::try_from((index + 1) * 100 / total).unwrap_or(100);
            control.checkpoint(percent, &format!("Matched thread {}", thread.id))?;
            matches.push(ThreadMatch {
                thread: thread.clone(),
                engineer,
            });
        }
        Ok(matches)
    }

    async fn step(
        &self,
        control: &mut StageControl,
        stage: ClassificationStage,
    ) -> Result<(), OrchestrationError> {
        control.checkpoint(stage.percent(), stage.label())?;
        control.pace(self.pacing.classification_step()).await
    }
}
