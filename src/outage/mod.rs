pub mod client;
pub mod health;

pub use client::{FeedResponse, NesClient};

use serde::{Deserialize, Deserializer};

/// Public NES outage map feed. Returns every active outage as a JSON array.
pub const DEFAULT_API_URL: &str = "https://utilisocial.io/datacapable/v2/p/NES/map/events";

/// Status value the feed uses while no crew has been dispatched.
pub const UNASSIGNED_STATUS: &str = "Unassigned";

/// A single outage record as published by the feed
///
/// Missing or `null` fields decode to their zero value, so one sloppy record
/// never hides the rest of the feed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutageEvent {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Epoch milliseconds
    #[serde(deserialize_with = "null_as_default")]
    pub start_time: i64,
    /// Epoch milliseconds
    #[serde(deserialize_with = "null_as_default")]
    pub last_updated_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub num_people: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub cause: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub identifier: String,
    #[serde(deserialize_with = "null_as_default")]
    pub latitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub longitude: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl OutageEvent {
    /// Whether the outage is still waiting for a technician
    pub fn is_unassigned(&self) -> bool {
        self.status == UNASSIGNED_STATUS
    }

    /// Cause text, if the feed reported a non-empty one
    pub fn cause_text(&self) -> Option<&str> {
        self.cause.as_deref().filter(|c| !c.is_empty())
    }
}

/// Fetch-time errors. None of these are fatal to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("failed to fetch: {0}")]
    Transport(String),

    #[error("failed to parse JSON: {0}")]
    Decode(String),

    #[error("event ID {0} not found")]
    NotFound(i64),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

/// Anything that can look up the current state of one outage event
#[async_trait::async_trait]
pub trait OutageSource: Send + Sync {
    /// Fetch the latest copy of `event_id`. Every call is a fresh lookup.
    async fn fetch(&self, event_id: i64) -> Result<OutageEvent, FetchError>;
}

/// Decode a feed body and return the first record whose id is `event_id`.
pub fn find_event(body: &[u8], event_id: i64) -> Result<OutageEvent, FetchError> {
    let events: Vec<OutageEvent> =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    events
        .into_iter()
        .find(|event| event.id == event_id)
        .ok_or(FetchError::NotFound(event_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"[
        {"id": 1, "startTime": 1700000000000, "lastUpdatedTime": 1700000600000,
         "title": "Outage A", "numPeople": 12, "status": "Unassigned", "cause": null,
         "identifier": "NES-1", "latitude": 36.16, "longitude": -86.78},
        {"id": 123, "startTime": 1700000000000, "lastUpdatedTime": 1700000900000,
         "title": "Outage B", "numPeople": 340, "status": "En Route", "cause": "Tree on line",
         "identifier": "NES-123", "latitude": 36.1, "longitude": -86.7},
        {"id": 123, "title": "Duplicate", "status": "Restored"}
    ]"#;

    #[test]
    fn test_find_event_returns_matching_record() {
        let event = find_event(FEED.as_bytes(), 123).unwrap();
        assert_eq!(
            event,
            OutageEvent {
                id: 123,
                start_time: 1_700_000_000_000,
                last_updated_time: 1_700_000_900_000,
                title: "Outage B".to_string(),
                num_people: 340,
                status: "En Route".to_string(),
                cause: Some("Tree on line".to_string()),
                identifier: "NES-123".to_string(),
                latitude: 36.1,
                longitude: -86.7,
            }
        );
    }

    #[test]
    fn test_find_event_missing_id() {
        let err = find_event(FEED.as_bytes(), 999).unwrap_err();
        assert_eq!(err, FetchError::NotFound(999));
        assert_eq!(err.to_string(), "event ID 999 not found");
    }

    #[test]
    fn test_find_event_malformed_json() {
        let err = find_event(b"[{\"id\": 1,", 1).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_find_event_rejects_non_array() {
        let err = find_event(br#"{"id": 1}"#, 1).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_find_event_tolerates_nulls() {
        let body = br#"[
            {"id": 1, "title": null, "startTime": null, "latitude": null, "status": "Unassigned"},
            {"id": 2, "numPeople": null, "status": "En Route", "identifier": null, "cause": null}
        ]"#;

        let event = find_event(body, 2).unwrap();
        assert_eq!(event.id, 2);
        assert_eq!(event.num_people, 0);
        assert_eq!(event.status, "En Route");
        assert_eq!(event.identifier, "");
        assert_eq!(event.cause, None);

        let first = find_event(body, 1).unwrap();
        assert_eq!(first.title, "");
        assert_eq!(first.start_time, 0);
        assert_eq!(first.latitude, 0.0);
    }

    #[test]
    fn test_find_event_still_rejects_wrong_types() {
        let err = find_event(br#"[{"id": 2, "numPeople": "many"}]"#, 2).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_find_event_empty_array() {
        assert_eq!(find_event(b"[]", 5).unwrap_err(), FetchError::NotFound(5));
    }

    #[test]
    fn test_cause_text_skips_empty_and_null() {
        let mut event = find_event(FEED.as_bytes(), 1).unwrap();
        assert_eq!(event.cause, None);
        assert_eq!(event.cause_text(), None);

        event.cause = Some(String::new());
        assert_eq!(event.cause_text(), None);

        event.cause = Some("Storm".to_string());
        assert_eq!(event.cause_text(), Some("Storm"));
    }

    #[test]
    fn test_is_unassigned_is_exact_match() {
        let mut event = OutageEvent {
            status: "Unassigned".to_string(),
            ..Default::default()
        };
        assert!(event.is_unassigned());

        event.status = "unassigned".to_string();
        assert!(!event.is_unassigned());
    }
}
