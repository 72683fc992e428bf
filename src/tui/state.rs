use crate::outage::{FetchError, OutageEvent};
use crate::tui::spinner::Spinner;
use chrono::{DateTime, Local};

/// Coarse state of the dashboard, derived from [`DashboardState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No fetch has completed yet
    Loading,
    /// An event is on screen, possibly mid-refresh
    Displaying,
    /// The last fetch failed and no event is shown
    Failed,
}

/// Snapshot rendered by the dashboard
///
/// Only the event loop mutates this. Fetches are tagged with increasing
/// sequence numbers and a completion older than the last applied one is
/// dropped, so a slow response can never overwrite fresher data.
#[derive(Debug, Clone)]
pub struct DashboardState {
    event_id: i64,
    event: Option<OutageEvent>,
    error: Option<FetchError>,
    loading: bool,
    spinner: Spinner,
    blink_on: bool,
    should_blink: bool,
    last_checked: Option<DateTime<Local>>,
    issued_seq: u64,
    applied_seq: u64,
}

impl DashboardState {
    pub fn new(event_id: i64) -> Self {
        Self {
            event_id,
            event: None,
            error: None,
            loading: true,
            spinner: Spinner::new(),
            blink_on: true,
            should_blink: false,
            last_checked: None,
            issued_seq: 0,
            applied_seq: 0,
        }
    }

    pub fn event_id(&self) -> i64 {
        self.event_id
    }

    pub fn event(&self) -> Option<&OutageEvent> {
        self.event.as_ref()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn spinner(&self) -> &Spinner {
        &self.spinner
    }

    pub fn blink_on(&self) -> bool {
        self.blink_on
    }

    pub fn should_blink(&self) -> bool {
        self.should_blink
    }

    pub fn last_checked(&self) -> Option<DateTime<Local>> {
        self.last_checked
    }

    pub fn phase(&self) -> Phase {
        if self.event.is_some() {
            Phase::Displaying
        } else if self.error.is_some() {
            Phase::Failed
        } else {
            Phase::Loading
        }
    }

    /// Mark a new fetch as outstanding and return its sequence number
    pub fn begin_fetch(&mut self) -> u64 {
        self.issued_seq += 1;
        self.loading = true;
        self.issued_seq
    }

    /// Apply a finished fetch. Returns `false` if it was stale and ignored.
    pub fn apply_fetch(
        &mut self,
        seq: u64,
        result: Result<OutageEvent, FetchError>,
        now: DateTime<Local>,
    ) -> bool {
        if seq <= self.applied_seq {
            return false;
        }
        self.applied_seq = seq;
        self.loading = self.issued_seq > self.applied_seq;
        self.last_checked = Some(now);

        match result {
            Ok(event) => {
                self.should_blink = !event.is_unassigned();
                self.event = Some(event);
                self.error = None;
            }
            Err(e) => {
                self.event = None;
                self.error = Some(e);
            }
        }
        true
    }

    pub fn toggle_blink(&mut self) {
        self.blink_on = !self.blink_on;
    }

    pub fn advance_spinner(&mut self) {
        self.spinner.advance();
    }
}
