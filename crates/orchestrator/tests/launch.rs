//! Staged launch behavior against an in-memory roster, on tokio's paused clock.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use orchestrator::{
    Collaborators, LaunchState, OrchestrationError, ProgressEvent, StageControl, StagePacing,
    TriageService,
};
use roster::demo_roster;
use tokio::sync::mpsc::UnboundedReceiver;
use triage::{
    AffectedSystem, Engineer, EngineerId, EngineerRoster, FixedJitter, LaunchReason, RosterError,
    Skill, Ticket, TicketId, Urgency,
};

// ============================================================================
// Fixtures
// ============================================================================

fn service_with(roster: Arc<dyn EngineerRoster>) -> TriageService {
    let collaborators = Collaborators::new(roster).with_jitter(Arc::new(FixedJitter::new(0.5)));
    TriageService::new(collaborators, StagePacing::default())
}

fn service() -> TriageService {
    service_with(Arc::new(demo_roster()))
}

fn outage_ticket(id: &str) -> Ticket {
    let description = "The HANA database replication hits a deadlock on the index table \
        after the upgrade. Users cannot login because authentication against the SSO \
        certificate fails. "
        .repeat(4);
    Ticket::new(
        TicketId::new(id).unwrap(),
        "Replication deadlock after upgrade",
        description,
        Urgency::Critical,
        AffectedSystem::SapS4Hana,
    )
    .with_attachments(3)
}

async fn classified(service: &TriageService, id: &str) -> Ticket {
    service
        .classify(&outage_ticket(id), &mut StageControl::detached())
        .await
        .unwrap()
}

async fn drain(mut rx: UnboundedReceiver<ProgressEvent>) -> Vec<ProgressEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

struct BrokenRoster;

#[async_trait]
impl EngineerRoster for BrokenRoster {
    async fn find_by_id(&self, id: &EngineerId) -> Result<Engineer, RosterError> {
        Err(RosterError::NotFound { id: id.clone() })
    }

    async fn list_available(&self) -> Result<Vec<Engineer>, RosterError> {
        Err(RosterError::Unavailable {
            reason: "directory offline".into(),
        })
    }

    async fn list_by_skill(&self, _skill: Skill) -> Result<Vec<Engineer>, RosterError> {
        Ok(Vec::new())
    }

    async fn list_leads(&self) -> Result<Vec<Engineer>, RosterError> {
        Ok(Vec::new())
    }
}

// ============================================================================
// Completed launches
// ============================================================================

#[tokio::test(start_paused = true)]
async fn launch_reports_six_stages_and_assigns_threads() {
    let service = service();
    let ticket = classified(&service, "TKT-1").await;

    let (mut control, rx) = StageControl::channel();
    let result = service.execute_launch(&ticket, &mut control).await.unwrap();
    drop(control);
    let events = drain(rx).await;

    let percents: Vec<u8> = events.iter().map(|e| e.percent).collect();
    assert_eq!(percents, vec![15, 30, 50, 75, 90, 100]);
    assert_eq!(events[5].label, "CRP ready");
    assert_eq!(result.stages.len(), 6);

    assert_eq!(result.state, LaunchState::Completed);
    assert!(result.should_launch);
    assert_eq!(result.reason, LaunchReason::HighComplexity);
    assert_eq!(result.lead.as_ref().unwrap().id.as_str(), "ENG-001");

    let assigned: Vec<Option<&str>> = result
        .threads
        .iter()
        .map(|t| t.assigned_engineer.as_ref().map(|id| id.as_str()))
        .collect();
    assert_eq!(assigned, vec![Some("ENG-001"), Some("ENG-002"), Some("ENG-004")]);
}

#[tokio::test(start_paused = true)]
async fn one_control_serves_classify_then_launch() {
    let service = service();
    let (mut control, rx) = StageControl::channel();

    let ticket = service
        .classify(&outage_ticket("TKT-11"), &mut control)
        .await
        .unwrap();
    let result = service.execute_launch(&ticket, &mut control).await.unwrap();
    drop(control);

    let percents: Vec<u8> = drain(rx).await.iter().map(|e| e.percent).collect();
    assert_eq!(
        percents,
        vec![0, 10, 20, 25, 30, 50, 60, 80, 100, 15, 30, 50, 75, 90, 100]
    );
    assert_eq!(result.state, LaunchState::Completed);
    assert_eq!(result.stages.len(), 6);
    assert_eq!(result.stages[0], "Identifying lead engineer");
}

#[tokio::test(start_paused = true)]
async fn launch_takes_the_configured_time() {
    let service = service();
    let ticket = classified(&service, "TKT-2").await;

    let result = service
        .execute_launch(&ticket, &mut StageControl::detached())
        .await
        .unwrap();
    assert_eq!(result.estimated_duration, Duration::from_millis(4800));
    assert!(result.elapsed >= Duration::from_millis(4800));
    assert!(result.elapsed < Duration::from_millis(4900));
}

#[tokio::test(start_paused = true)]
async fn concurrent_launches_are_independent() {
    let service = service();
    let first = classified(&service, "TKT-3").await;
    let second = classified(&service, "TKT-4").await;

    let (mut a, rx_a) = StageControl::channel();
    let (mut b, rx_b) = StageControl::channel();
    let (ra, rb) = tokio::join!(
        service.execute_launch(&first, &mut a),
        service.execute_launch(&second, &mut b)
    );
    drop((a, b));

    let (ra, rb) = (ra.unwrap(), rb.unwrap());
    assert_eq!(ra.state, LaunchState::Completed);
    assert_eq!(rb.state, LaunchState::Completed);
    assert_ne!(ra.run_id, rb.run_id);
    assert_eq!(ra.threads[0].ticket_id.as_str(), "TKT-3");
    assert_eq!(rb.threads[0].ticket_id.as_str(), "TKT-4");
    assert_eq!(drain(rx_a).await.len(), 6);
    assert_eq!(drain(rx_b).await.len(), 6);
}

// ============================================================================
// Rejected, failed and cancelled launches
// ============================================================================

#[tokio::test(start_paused = true)]
async fn unclassified_ticket_is_rejected_without_progress() {
    let service = service();
    let (mut control, rx) = StageControl::channel();
    let result = service
        .execute_launch(&outage_ticket("TKT-5"), &mut control)
        .await
        .unwrap();
    drop(control);

    assert_eq!(result.state, LaunchState::Rejected);
    assert!(!result.should_launch);
    assert_eq!(result.reason, LaunchReason::NotClassified);
    assert!(result.threads.is_empty());
    assert!(result.lead.is_none());
    assert_eq!(result.elapsed, Duration::ZERO);
    assert!(drain(rx).await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn roster_failure_fails_the_launch_without_partial_data() {
    let ticket = classified(&service(), "TKT-6").await;
    let broken = service_with(Arc::new(BrokenRoster));

    let result = broken
        .execute_launch(&ticket, &mut StageControl::detached())
        .await
        .unwrap();
    assert_eq!(result.state, LaunchState::Failed);
    assert!(!result.should_launch);
    assert_eq!(result.reason, LaunchReason::SystemError);
    assert!(result.threads.is_empty());
    assert!(result.lead.is_none());
    // Matching is the first stage that lists available engineers.
    assert_eq!(result.stages.len(), 4);
}

#[tokio::test(start_paused = true)]
async fn cancellation_between_stages_stops_progress_and_result() {
    let service = service();
    let ticket = classified(&service, "TKT-7").await;

    let (mut control, rx) = StageControl::channel();
    let token = control.cancellation();
    tokio::spawn(async move {
        // Inside the decomposition stage's pacing (starts at 1400ms).
        tokio::time::sleep(Duration::from_millis(2000)).await;
        token.cancel();
    });

    let err = service
        .execute_launch(&ticket, &mut control)
        .await
        .unwrap_err();
    drop(control);

    assert!(matches!(err, OrchestrationError::Cancelled));
    let percents: Vec<u8> = drain(rx).await.iter().map(|e| e.percent).collect();
    assert_eq!(percents, vec![15, 30, 50]);
}

#[tokio::test(start_paused = true)]
async fn already_cancelled_launch_does_nothing() {
    let service = service();
    let ticket = classified(&service, "TKT-8").await;
    let (mut control, rx) = StageControl::channel();
    control.cancellation().cancel();

    let err = service
        .execute_launch(&ticket, &mut control)
        .await
        .unwrap_err();
    drop(control);
    assert!(err.is_cancelled());
    assert!(drain(rx).await.is_empty());
}

// ============================================================================
// Evaluation
// ============================================================================

#[tokio::test(start_paused = true)]
async fn evaluation_matches_launch_decision() {
    let service = service();
    let ticket = classified(&service, "TKT-9").await;
    let decision = service.evaluate_launch(&ticket);
    assert!(decision.should_launch);
    assert_eq!(decision.reason, LaunchReason::HighComplexity);

    let raw = service.evaluate_launch(&outage_ticket("TKT-10"));
    assert_eq!(raw.reason, LaunchReason::NotClassified);
}
