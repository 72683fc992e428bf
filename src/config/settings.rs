use crate::outage::DEFAULT_API_URL;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Dashboard configuration
///
/// Every field has a default, so a partial (or absent) config file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Outage feed endpoint
    pub api_url: String,

    /// Seconds between automatic re-fetches
    pub refresh_interval_secs: u64,

    /// Milliseconds between status blink toggles
    pub blink_interval_ms: u64,

    /// Milliseconds between spinner frames
    pub spinner_interval_ms: u64,

    /// HTTP timeout for a single fetch
    pub request_timeout_secs: u64,

    /// Write debug logs to a file
    pub debug: bool,

    /// Log file or directory. Defaults to the config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_log_path: Option<String>,

    pub debug_log_rotation: LogRotation,

    /// Rotated log files to keep (daily rotation only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_log_keep: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            refresh_interval_secs: 30,
            blink_interval_ms: 500,
            spinner_interval_ms: 100,
            request_timeout_secs: 10,
            debug: false,
            debug_log_path: None,
            debug_log_rotation: LogRotation::None,
            debug_log_keep: None,
        }
    }
}

// tokio intervals panic on a zero period, so every duration is at least one unit.
impl Config {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms.max(1))
    }

    pub fn spinner_interval(&self) -> Duration {
        Duration::from_millis(self.spinner_interval_ms.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// How the debug log file is rotated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Append to a single file
    #[default]
    None,
    /// One file per day, old files pruned
    Daily,
}
