use crate::config::{Config, LogRotation};
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "nes-outage-debug.log";

/// Keeps the background log writer alive. Drop it only at exit.
#[allow(dead_code)]
pub struct LogGuard(WorkerGuard);

/// Initialize debug logging.
///
/// The terminal belongs to the dashboard, so logs only ever go to a file, and
/// only when `debug` is enabled. Otherwise this is a no-op.
pub fn init(config: &Config) -> Result<Option<LogGuard>> {
    if !config.debug {
        return Ok(None);
    }

    let base = resolve_log_path(config.debug_log_path.as_deref())?;

    let (writer, guard): (NonBlocking, WorkerGuard) = match config.debug_log_rotation {
        LogRotation::None => {
            ensure_parent_dir(&base)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&base)
                .with_context(|| format!("Failed to open log file: {}", base.display()))?;
            tracing_appender::non_blocking(file)
        }
        LogRotation::Daily => {
            let (dir, base_name) = split_dir_and_name(&base)?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

            prune_daily_logs(&dir, &base_name, config.debug_log_keep.unwrap_or(7))?;

            tracing_appender::non_blocking(tracing_appender::rolling::daily(&dir, &base_name))
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("nes_outage=debug,warn"))
        .unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .try_init()
        .ok(); // Already initialized in tests.

    tracing::info!(
        log_file = %base.display(),
        rotation = ?config.debug_log_rotation,
        "debug logging enabled"
    );

    Ok(Some(LogGuard(guard)))
}

fn resolve_log_path(raw: Option<&str>) -> Result<PathBuf> {
    let Some(raw) = raw else {
        return Ok(crate::config::config_dir()?.join(LOG_FILE_NAME));
    };

    let path = PathBuf::from(expand_tilde(raw));
    if raw.ends_with(std::path::MAIN_SEPARATOR) || path.is_dir() {
        return Ok(path.join(LOG_FILE_NAME));
    }
    Ok(path)
}

fn expand_tilde(raw: &str) -> String {
    if let Some(suffix) = raw.strip_prefix('~') {
        if suffix.is_empty() || suffix.starts_with('/') {
            if let Some(home) = dirs::home_dir() {
                return format!("{}{}", home.display(), suffix);
            }
        }
    }
    raw.to_string()
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    Ok(())
}

fn split_dir_and_name(path: &Path) -> Result<(PathBuf, String)> {
    let dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .context("Invalid debug_log_path: not valid UTF-8")?
        .to_string();
    Ok((dir, name))
}

/// Remove all but the newest `keep` daily files (`{base_name}.YYYY-MM-DD`).
fn prune_daily_logs(dir: &Path, base_name: &str, keep: usize) -> Result<()> {
    if keep == 0 {
        return Ok(());
    }

    let prefix = format!("{base_name}.");
    let mut candidates: Vec<String> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read log directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.starts_with(&prefix))
        .collect();

    // Date suffixes sort lexicographically; newest first.
    candidates.sort_unstable_by(|a, b| b.cmp(a));

    for name in candidates.iter().skip(keep) {
        let path = dir.join(name);
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::debug!(error = %e, file = %path.display(), "failed to remove old log file");
        }
    }

    Ok(())
}
