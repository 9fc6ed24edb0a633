//! `crp-triage.toml` configuration.
//!
//! Every section and field is optional; a missing file is the same as an
//! empty one.
//!
//! ```toml
//! [logging]
//! level = "info"            # any EnvFilter directive
//! format = "json"           # "json" | "pretty"
//! otlp_endpoint = "http://localhost:4317"
//!
//! [roster]
//! path = "roster.json"      # demo roster when omitted
//!
//! [jitter]
//! seed = 42                 # entropy when omitted
//!
//! [pacing]
//! lead_lookup_ms = 800      # see StagePacing for every stage
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use orchestrator::StagePacing;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub logging: LoggingConfig,
    pub roster: RosterConfig,
    pub jitter: JitterConfig,
    pub pacing: StagePacing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    /// Spans are exported over OTLP/gRPC when set.
    pub otlp_endpoint: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            otlp_endpoint: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RosterConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JitterConfig {
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Invalid configuration")
    }

    /// Reads `path`, or returns the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let mut config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;

        // Relative roster paths are resolved against the config file's directory.
        if let (Some(roster), Some(dir)) = (config.roster.path.as_mut(), path.parent()) {
            if roster.is_relative() {
                *roster = dir.join(&*roster);
            }
        }
        Ok(config)
    }
}
