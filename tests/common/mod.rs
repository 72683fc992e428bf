//! Common test utilities and fixtures for dashboard testing

#![allow(dead_code)]

use nes_outage::outage::{FetchError, OutageEvent, OutageSource};
use ratatui::text::Line;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A three-record feed; ids 1971637, 123 and 42
pub const SAMPLE_FEED: &str = r#"[
  {"id": 1971637, "startTime": 1717430400000, "lastUpdatedTime": 1717434000000,
   "title": "Power Outage", "numPeople": 57, "status": "Unassigned", "cause": null,
   "identifier": "NES-1971637", "latitude": 36.1627, "longitude": -86.7816},
  {"id": 123, "startTime": 1717430400000, "lastUpdatedTime": 1717437600000,
   "title": "Power Outage", "numPeople": 1204, "status": "En Route", "cause": "Equipment failure",
   "identifier": "NES-123", "latitude": 36.1, "longitude": -86.8},
  {"id": 42, "startTime": 1717430400000, "lastUpdatedTime": 1717430400000,
   "title": "Planned Work", "numPeople": 3, "status": "Crew Working", "cause": "",
   "identifier": "NES-42", "latitude": 36.0, "longitude": -86.6}
]"#;

/// Build an event with the given id and status
pub fn outage(id: i64, status: &str) -> OutageEvent {
    OutageEvent {
        id,
        start_time: 1_717_430_400_000,
        last_updated_time: 1_717_434_000_000,
        title: "Power Outage".to_string(),
        num_people: 57,
        status: status.to_string(),
        cause: None,
        identifier: format!("NES-{id}"),
        latitude: 36.16,
        longitude: -86.78,
    }
}

/// Scripted outage source: hands out queued results in order, then repeats the last one
pub struct FakeSource {
    results: Mutex<VecDeque<Result<OutageEvent, FetchError>>>,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn new(results: Vec<Result<OutageEvent, FetchError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl OutageSource for FakeSource {
    async fn fetch(&self, event_id: i64) -> Result<OutageEvent, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut results = self.results.lock().unwrap();
        let next = if results.len() > 1 {
            results.pop_front()
        } else {
            results.front().cloned()
        };
        next.unwrap_or(Err(FetchError::NotFound(event_id)))
    }
}

/// Serve exactly one HTTP response on a local port and return its URL
pub async fn serve_once(status_line: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        // The request is small enough to arrive in one read.
        let _ = socket.read(&mut buf).await;

        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    format!("http://{addr}/events")
}

/// URL of a local port with nothing listening on it
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/events")
}

/// Concatenate span contents, one string per line
pub fn plain_lines(lines: &[Line<'_>]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect()
}

pub fn plain_text(lines: &[Line<'_>]) -> String {
    plain_lines(lines).join("\n")
}
