//! One-shot health check for the outage feed.
//!
//! Checks that the endpoint answers, that the body is a JSON array and that
//! the sampled records carry a `status` field. Used by `nes-outage --health`.

use crate::outage::{FeedResponse, FetchError, NesClient};
use serde::Serialize;
use std::collections::BTreeSet;

/// Records inspected for the `status` field
const STATUS_SAMPLE_SIZE: usize = 5;
/// Records whose status values are echoed back in the report
const STATUS_VALUE_SAMPLE_SIZE: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HealthChecks {
    pub api_reachable: bool,
    pub json_parseable: bool,
    pub status_field_present: bool,
}

impl HealthChecks {
    pub fn all_passed(&self) -> bool {
        self.api_reachable && self.json_parseable && self.status_field_present
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub healthy: bool,
    pub checks: HealthChecks,
    pub errors: Option<Vec<String>>,
    pub event_count: usize,
    pub api_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_status_values: Option<Vec<String>>,
}

/// Check the live feed once
pub async fn check(client: &NesClient) -> HealthReport {
    let response = client.fetch_response().await;
    let report = assess(client.api_url(), response);

    tracing::info!(
        healthy = report.healthy,
        event_count = report.event_count,
        "health check finished"
    );

    report
}

/// Build a report from whatever the feed returned
///
/// Only a 200 counts as reachable; any other status skips the body checks.
pub fn assess(api_url: &str, response: Result<FeedResponse, FetchError>) -> HealthReport {
    let mut checks = HealthChecks::default();
    let mut errors = Vec::new();

    let raw = match response {
        Ok(FeedResponse { status: 200, body }) => {
            checks.api_reachable = true;
            Some(body)
        }
        Ok(FeedResponse { status, .. }) => {
            errors.push(format!("API returned status {status}"));
            None
        }
        Err(e) => {
            errors.push(format!("API unreachable: {e}"));
            None
        }
    };

    let records = raw.and_then(|raw| match serde_json::from_slice::<serde_json::Value>(&raw) {
        Ok(serde_json::Value::Array(records)) => {
            checks.json_parseable = true;
            Some(records)
        }
        Ok(_) => {
            errors.push("API response is not a JSON array".to_string());
            None
        }
        Err(e) => {
            errors.push(format!("Invalid JSON: {e}"));
            None
        }
    });

    let mut sample_status_values = None;
    if let Some(records) = &records {
        if records.is_empty() {
            // No current outages is a valid answer.
            checks.status_field_present = true;
        } else {
            let sampled = &records[..records.len().min(STATUS_SAMPLE_SIZE)];
            let with_status = sampled
                .iter()
                .filter(|record| record.get("status").is_some())
                .count();

            if with_status == sampled.len() {
                checks.status_field_present = true;
            } else {
                errors.push(format!(
                    "Status field missing in {}/{} sampled events",
                    sampled.len() - with_status,
                    sampled.len()
                ));
            }

            let values: BTreeSet<String> = records
                .iter()
                .take(STATUS_VALUE_SAMPLE_SIZE)
                .map(|record| {
                    record
                        .get("status")
                        .and_then(|s| s.as_str())
                        .unwrap_or("N/A")
                        .to_string()
                })
                .collect();
            sample_status_values = Some(values.into_iter().collect());
        }
    }

    HealthReport {
        healthy: checks.all_passed(),
        checks,
        errors: if errors.is_empty() { None } else { Some(errors) },
        event_count: records.as_ref().map_or(0, Vec::len),
        api_url: api_url.to_string(),
        sample_status_values,
    }
}
