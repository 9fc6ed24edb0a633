//! Subcommand execution.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand};
use orchestrator::{ProgressEvent, StageControl, TriageService};
use roster::InMemoryRoster;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use triage::Ticket;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a submitted ticket and print the classified ticket.
    Classify(TicketArgs),
    /// Print whether a ticket would launch a CRP.
    Evaluate(TicketArgs),
    /// Run the staged CRP launch and print its result.
    Launch(TicketArgs),
    /// Print the issue threads of a ticket.
    Decompose(TicketArgs),
    /// Match engineers to the threads of a ticket.
    Match(TicketArgs),
    /// Print the engineer roster.
    Roster,
}

#[derive(Debug, Args)]
pub struct TicketArgs {
    /// Ticket JSON file.
    #[arg(long, short)]
    pub ticket: PathBuf,

    /// Classify the ticket first if it has no classification.
    #[arg(long)]
    pub classify: bool,

    /// Do not print stage progress.
    #[arg(long)]
    pub quiet: bool,
}

pub async fn run(
    command: Command,
    service: &TriageService,
    roster: &InMemoryRoster,
) -> anyhow::Result<()> {
    match command {
        Command::Classify(args) => {
            let ticket = read_ticket(&args.ticket).await?;
            let mut progress = Progress::start(args.quiet);
            let classified = service.classify(&ticket, &mut progress.control).await;
            progress.finish().await;
            print_json(&classified?)
        }
        Command::Evaluate(args) => {
            let ticket = prepare(service, &args).await?;
            print_json(&service.evaluate_launch(&ticket))
        }
        Command::Launch(args) => {
            let ticket = prepare(service, &args).await?;
            let mut progress = Progress::start(args.quiet);
            let result = service.execute_launch(&ticket, &mut progress.control).await;
            progress.finish().await;
            print_json(&result?)
        }
        Command::Decompose(args) => {
            let ticket = prepare(service, &args).await?;
            let mut progress = Progress::start(args.quiet);
            let threads = service.decompose(&ticket, &mut progress.control).await;
            progress.finish().await;
            print_json(&threads?)
        }
        Command::Match(args) => {
            let ticket = prepare(service, &args).await?;
            let mut progress = Progress::start(args.quiet);
            let matches = service
                .match_engineers_for_threads(&ticket.threads, &mut progress.control)
                .await;
            progress.finish().await;
            print_json(&matches?)
        }
        Command::Roster => print_json(&roster.engineers().await),
    }
}

pub async fn read_ticket(path: &Path) -> anyhow::Result<Ticket> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read ticket file '{}'", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse ticket file '{}'", path.display()))
}

async fn prepare(service: &TriageService, args: &TicketArgs) -> anyhow::Result<Ticket> {
    let ticket = read_ticket(&args.ticket).await?;
    if !args.classify || ticket.classification.is_some() {
        return Ok(ticket);
    }
    tracing::info!(ticket_id = %ticket.id, "classifying ticket first");
    let mut progress = Progress::start(args.quiet);
    let classified = service.classify(&ticket, &mut progress.control).await;
    progress.finish().await;
    Ok(classified?)
}

/// A stage control whose progress is printed to stderr and which is
/// cancelled on Ctrl-C.
struct Progress {
    control: StageControl,
    printer: JoinHandle<()>,
    interrupt: JoinHandle<()>,
}

impl Progress {
    fn start(quiet: bool) -> Self {
        let token = CancellationToken::new();
        let (control, rx) = StageControl::channel();
        let control = control.with_cancellation(token.clone());
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupted, cancelling run");
                token.cancel();
            }
        });
        Self {
            control,
            printer: spawn_printer(rx, quiet),
            interrupt,
        }
    }

    /// Waits until every reported event has been printed.
    async fn finish(self) {
        let Progress {
            control,
            printer,
            interrupt,
        } = self;
        interrupt.abort();
        drop(control);
        let _ = printer.await;
    }
}

fn spawn_printer(mut rx: UnboundedReceiver<ProgressEvent>, quiet: bool) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if !quiet {
                eprintln!("[{:>3}%] {}", event.percent, event.label);
            }
        }
    })
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
