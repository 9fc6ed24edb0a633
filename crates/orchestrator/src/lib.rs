//! Staged, cancellable pipelines over the `triage` decision engine.
//!
//! This crate sequences the pure scoring, routing, decomposition and matching
//! functions of [`triage`] into the asynchronous runs the outside world uses:
//!
//! | Operation | Checkpoints |
//! |-----------|-------------|
//! | [`TriageService::classify`] | 0, 10, 20, 25, 30, 50, 60, 80, 100 |
//! | [`TriageService::decompose`] | 0, 50, 100 |
//! | [`TriageService::match_engineers_for_threads`] | 0, then one per thread |
//! | [`TriageService::evaluate_launch`] | none (synchronous) |
//! | [`TriageService::execute_launch`] | 15, 30, 50, 75, 90, 100 |
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Pipelines read the engineer roster through the
//! [`triage::EngineerRoster`] port and contain no scoring rules of their own.
//! Progress goes out as [`ProgressEvent`]s on a tokio channel owned by the
//! caller's [`StageControl`], which also carries the cancellation token.

pub mod classification;
pub mod control;
pub mod errors;
pub mod launch;
pub mod service;
pub mod stages;

pub use classification::{ClassificationPipeline, ThreadMatch};
pub use control::{ProgressEvent, StageControl};
pub use errors::OrchestrationError;
pub use launch::{LaunchOrchestrator, LaunchResult, LaunchState};
pub use service::{Collaborators, TriageService};
pub use stages::{ClassificationStage, LaunchStage, StagePacing};
