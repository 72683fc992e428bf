use crate::config::{self, Config};
use crate::logging;
use crate::outage::{health, NesClient};
use crate::tui::runner;
use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

/// Track a single NES power outage event in the terminal
#[derive(Debug, Parser)]
#[command(name = "nes-outage", version, about)]
pub struct Cli {
    /// Outage event ID to track, e.g. 1971637
    #[arg(value_name = "EVENT_ID")]
    pub event_id: Option<String>,

    /// Check that the outage API is reachable and well-formed, then exit
    #[arg(long)]
    pub health: bool,

    /// Override the outage feed URL
    #[arg(long, env = "NES_OUTAGE_API_URL")]
    pub api_url: Option<String>,

    /// Write debug logs to a file
    #[arg(long)]
    pub debug: bool,
}

/// What the process was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Dashboard { event_id: i64 },
    Health,
}

/// Bad command-line input. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartupError {
    #[error("missing event ID")]
    MissingEventId,

    #[error("invalid event ID: {0}")]
    InvalidEventId(String),
}

impl Cli {
    pub fn mode(&self) -> Result<Mode, StartupError> {
        if self.health {
            return Ok(Mode::Health);
        }
        let event_id = parse_event_id(self.event_id.as_deref())?;
        Ok(Mode::Dashboard { event_id })
    }

    /// Command-line flags win over the config file
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if self.debug {
            config.debug = true;
        }
    }
}

pub fn parse_event_id(raw: Option<&str>) -> Result<i64, StartupError> {
    let raw = raw.ok_or(StartupError::MissingEventId)?;
    raw.trim()
        .parse()
        .map_err(|_| StartupError::InvalidEventId(raw.to_string()))
}

/// Parse arguments and run the requested mode
pub async fn run() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too and are not failures.
            let code = if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            e.print().context("Failed to print usage")?;
            return Ok(code);
        }
    };

    let mode = match cli.mode() {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Usage: nes-outage <EVENT_ID>");
            eprintln!("Example: nes-outage 1971637");
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut config = config::load()?;
    cli.apply_overrides(&mut config);
    let _log_guard = logging::init(&config)?;

    match mode {
        Mode::Health => run_health(&config).await,
        Mode::Dashboard { event_id } => {
            runner::run(&config, event_id).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_health(config: &Config) -> Result<ExitCode> {
    let client = NesClient::from_config(config)?;
    let report = health::check(&client).await;

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize health report")?;
    println!("{json}");

    Ok(if report.healthy {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
