use crate::config::Config;
use crate::outage::{find_event, FetchError, OutageEvent, OutageSource};
use anyhow::{Context, Result};
use std::time::Duration;

/// HTTP client for the NES outage feed
///
/// One GET per call, bounded by the configured timeout. No retries and no
/// caching: the dashboard's timers decide when to ask again.
#[derive(Clone)]
pub struct NesClient {
    client: reqwest::Client,
    api_url: String,
}

impl NesClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("nes-outage/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_url.clone(), config.request_timeout())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Issue the GET and return status and body without judging either
    pub async fn fetch_response(&self) -> Result<FeedResponse, FetchError> {
        tracing::debug!(url = %self.api_url, "requesting outage feed");

        let response = self
            .client
            .get(&self.api_url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        tracing::trace!(status, bytes = body.len(), "outage feed downloaded");

        Ok(FeedResponse {
            status,
            body: body.to_vec(),
        })
    }

    /// Download the raw feed body. Non-2xx responses count as transport failures.
    pub async fn fetch_body(&self) -> Result<Vec<u8>, FetchError> {
        let response = self.fetch_response().await?;
        if !response.is_success() {
            tracing::warn!(status = response.status, url = %self.api_url, "outage feed returned error status");
            return Err(FetchError::Transport(format!("HTTP {}", response.status)));
        }
        Ok(response.body)
    }
}

/// Raw answer from the feed endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FeedResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait::async_trait]
impl OutageSource for NesClient {
    async fn fetch(&self, event_id: i64) -> Result<OutageEvent, FetchError> {
        let body = self.fetch_body().await?;
        let result = find_event(&body, event_id);

        match &result {
            Ok(event) => tracing::debug!(
                event_id,
                status = %event.status,
                num_people = event.num_people,
                "outage event fetched"
            ),
            Err(e) => tracing::debug!(event_id, error = %e, "outage event lookup failed"),
        }

        result
    }
}
