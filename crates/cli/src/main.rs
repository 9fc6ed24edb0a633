//! CRP triage CLI entry point.
//!
//! This binary is the composition root for the whole workspace:
//!
//! 1. **Parse configuration**: load the TOML config named by `--config` (or
//!    `CRP_TRIAGE_CONFIG`) and apply command-line overrides.
//! 2. **Wire observability**: install a `tracing-subscriber` with a JSON or
//!    pretty layer, plus an OpenTelemetry OTLP exporter when an endpoint is
//!    configured. Every span and event from every crate flows through it.
//! 3. **Construct infrastructure**: load the engineer roster and build the
//!    jitter source, then inject both into a [`TriageService`].
//! 4. **Run one command** against a ticket JSON file and print JSON on stdout.
//!    Stage progress goes to stderr; Ctrl-C cancels the run between stages.

mod commands;
mod config;
mod telemetry;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use orchestrator::{Collaborators, TriageService};
use roster::InMemoryRoster;
use triage::SeededJitter;

use crate::commands::Command;
use crate::config::{Config, LogFormat};

/// Classify support tickets and launch collaborative resolution.
#[derive(Debug, Parser)]
#[command(name = "crp-triage", author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, short, env = "CRP_TRIAGE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Roster JSON file (overrides `[roster] path`).
    #[arg(long, global = true)]
    roster: Option<PathBuf>,

    /// Jitter seed for reproducible scores (overrides `[jitter] seed`).
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log filter directive (overrides `[logging] level`).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format (overrides `[logging] format`).
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    /// Wait zero time between stages.
    #[arg(long, global = true)]
    immediate: bool,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.roster {
            config.roster.path = Some(path.clone());
        }
        if let Some(seed) = self.seed {
            config.jitter.seed = Some(seed);
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
        if self.immediate {
            config.pacing = orchestrator::StagePacing::immediate();
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    let _telemetry = telemetry::init(&config.logging)?;

    let roster = Arc::new(load_roster(&config).await?);
    let jitter = match config.jitter.seed {
        Some(seed) => SeededJitter::from_seed(seed),
        None => SeededJitter::from_entropy(),
    };
    let collaborators = Collaborators::new(roster.clone()).with_jitter(Arc::new(jitter));
    let service = TriageService::new(collaborators, config.pacing.clone());

    tracing::debug!(
        roster_size = roster.len().await,
        seeded = config.jitter.seed.is_some(),
        "service ready"
    );
    commands::run(cli.command, &service, &roster).await
}

async fn load_roster(config: &Config) -> anyhow::Result<InMemoryRoster> {
    match &config.roster.path {
        Some(path) => InMemoryRoster::from_json_file(path)
            .await
            .with_context(|| format!("Failed to load roster '{}'", path.display())),
        None => {
            tracing::info!("no roster file configured, using the demo roster");
            Ok(roster::demo_roster())
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "crp-triage",
            "--seed",
            "9",
            "--log-format",
            "json",
            "--immediate",
            "launch",
            "--ticket",
            "t.json",
            "--classify",
        ]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.jitter.seed, Some(9));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.pacing, orchestrator::StagePacing::immediate());
        assert!(matches!(cli.command, Command::Launch(ref args) if args.classify));
    }
}
